use crate::canvas::RgbColor;
use crate::constants::{A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::letterhead::Letterhead;
use crate::types::{ComposeError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page geometry and house style for generated pages
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComposeOptions {
    // Page
    pub page_width_pt: f32,
    pub page_height_pt: f32,

    // Abstract page column
    pub margin_left_pt: f32,
    /// Right edge of justified text
    pub text_right_pt: f32,
    /// Baseline of the first line on every abstract page
    pub flow_top_pt: f32,
    /// Lowest baseline allowed before a page break
    pub flow_bottom_pt: f32,

    // Body text
    pub body_size_pt: f32,
    /// Character budget per line for the abstract and acknowledgement
    pub body_wrap_chars: usize,

    // Cover
    pub cover_background: Option<RgbColor>,
    pub letterhead: Letterhead,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            page_width_pt: A4_WIDTH_PT,
            page_height_pt: A4_HEIGHT_PT,
            margin_left_pt: 50.0,
            text_right_pt: 590.0,
            flow_top_pt: 780.0,
            flow_bottom_pt: 80.0,
            body_size_pt: 11.0,
            body_wrap_chars: 95,
            cover_background: Some(RgbColor::rgb(0.851, 1.0, 1.0)),
            letterhead: Letterhead::default(),
        }
    }
}

impl ComposeOptions {
    /// Width of the justified column
    pub fn column_width(&self) -> f32 {
        self.text_right_pt - self.margin_left_pt
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.page_width_pt <= 0.0 || self.page_height_pt <= 0.0 {
            return Err(ComposeError::Config(
                "Page dimensions must be positive".to_string(),
            ));
        }

        if self.margin_left_pt < 0.0 || self.text_right_pt > self.page_width_pt {
            return Err(ComposeError::Config(
                "Text column must lie within the page".to_string(),
            ));
        }

        if self.column_width() <= 0.0 {
            return Err(ComposeError::Config(
                "Right text edge must be to the right of the left margin".to_string(),
            ));
        }

        if self.flow_top_pt > self.page_height_pt || self.flow_bottom_pt < 0.0 {
            return Err(ComposeError::Config(
                "Flow area must lie within the page".to_string(),
            ));
        }

        if self.flow_top_pt <= self.flow_bottom_pt {
            return Err(ComposeError::Config(
                "Flow top must be above flow bottom".to_string(),
            ));
        }

        if self.body_size_pt <= 0.0 {
            return Err(ComposeError::Config("Body size must be positive".to_string()));
        }

        if self.body_wrap_chars == 0 {
            return Err(ComposeError::Config(
                "Body wrap budget must be at least one character".to_string(),
            ));
        }

        // A body line plus its leading has to fit on an empty page
        if self.body_size_pt * 2.0 > self.flow_top_pt - self.flow_bottom_pt {
            return Err(ComposeError::Config(
                "Flow area is too short for the body size".to_string(),
            ));
        }

        Ok(())
    }
}
