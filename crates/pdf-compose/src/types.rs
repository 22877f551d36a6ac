use crate::metrics::FontStyle;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Character {ch:?} cannot be measured in {font}")]
    UnsupportedCharacter { ch: char, font: FontStyle },
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Reasons a metadata record is rejected before composition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} is {len} characters, limit is {limit}")]
    TooLong {
        field: &'static str,
        len: usize,
        limit: usize,
    },
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Maximum abstract length in characters
pub const ABSTRACT_LIMIT: usize = 1200;
/// Maximum JEL code length in characters
pub const JEL_CODE_LIMIT: usize = 80;
/// Maximum keywords length in characters
pub const KEYWORDS_LIMIT: usize = 200;
/// Maximum acknowledgement length in characters
pub const ACKNOWLEDGEMENT_LIMIT: usize = 500;

/// Publication series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Policy papers
    #[default]
    PP,
    /// Working papers
    WP,
    /// Monographs
    MN,
    /// Book reviews
    BR,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::PP, Category::WP, Category::MN, Category::BR];

    pub fn code(self) -> &'static str {
        match self {
            Category::PP => "PP",
            Category::WP => "WP",
            Category::MN => "MN",
            Category::BR => "BR",
        }
    }

    /// Name of the ledger sheet holding this series
    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::PP => "PP Series",
            Category::WP => "WP Series",
            Category::MN => "MN Series",
            Category::BR => "Book Review",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = MetadataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PP" => Ok(Category::PP),
            "WP" => Ok(Category::WP),
            "MN" => Ok(Category::MN),
            "BR" => Ok(Category::BR),
            _ => Err(MetadataError::UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Bibliographic metadata submitted with a manuscript
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Metadata {
    pub category: Category,
    pub author: String,
    pub email: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "abstract"))]
    pub abstract_text: String,
    #[cfg_attr(feature = "serde", serde(alias = "jelcode"))]
    pub jel_code: String,
    pub keywords: String,
    #[cfg_attr(feature = "serde", serde(alias = "acknow", alias = "acknowledgment"))]
    pub acknowledgement: String,
}

impl Metadata {
    /// Check required fields and length limits
    pub fn validate(&self) -> std::result::Result<(), MetadataError> {
        require("author", &self.author)?;
        require("email", &self.email)?;
        require("title", &self.title)?;
        require("abstract", &self.abstract_text)?;

        check_email(&self.email)?;

        limit("abstract", &self.abstract_text, ABSTRACT_LIMIT)?;
        limit("JEL code", &self.jel_code, JEL_CODE_LIMIT)?;
        limit("keywords", &self.keywords, KEYWORDS_LIMIT)?;
        limit("acknowledgement", &self.acknowledgement, ACKNOWLEDGEMENT_LIMIT)?;

        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> std::result::Result<(), MetadataError> {
    if value.trim().is_empty() {
        return Err(MetadataError::Missing(field));
    }
    Ok(())
}

fn limit(field: &'static str, value: &str, limit: usize) -> std::result::Result<(), MetadataError> {
    let len = value.chars().count();
    if len > limit {
        return Err(MetadataError::TooLong { field, len, limit });
    }
    Ok(())
}

fn check_email(email: &str) -> std::result::Result<(), MetadataError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(MetadataError::InvalidEmail(email.to_string())),
    }
}
