use pdf_compose::{ComposeError, MetadataError};
use pdf_merge::MergeError;
use std::fmt;
use thiserror::Error;

/// Steps of a submission, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Configure,
    Validate,
    Reserve,
    Compose,
    Merge,
    Upload,
    Finalize,
    Delete,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Configure => "configure",
            Stage::Validate => "validate",
            Stage::Reserve => "reserve",
            Stage::Compose => "compose",
            Stage::Merge => "merge",
            Stage::Upload => "upload",
            Stage::Finalize => "finalize",
            Stage::Delete => "delete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures reported by a ledger backend
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Ledger rejected the request: {0}")]
    Rejected(String),
    #[error("Unexpected ledger response: {0}")]
    Protocol(String),
    #[error("Publication number {0} is not in the ledger")]
    NotFound(String),
    #[error("Publication number {0} is already finalized")]
    Finalized(String),
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid metadata: {0}")]
    Metadata(#[from] MetadataError),
    #[error("Layout failed: {0}")]
    Compose(#[from] ComposeError),
    #[error("Merge failed: {0}")]
    Merge(#[from] MergeError),
    #[error("Could not reserve a publication number: {0}")]
    Reservation(#[source] LedgerError),
    #[error("Could not upload {number}: {source}")]
    Persistence {
        number: String,
        #[source]
        source: LedgerError,
    },
    #[error("Could not {stage} {number}: {source}")]
    Lifecycle {
        stage: Stage,
        number: String,
        #[source]
        source: LedgerError,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl PublishError {
    /// Pipeline stage that produced the error
    pub fn stage(&self) -> Stage {
        match self {
            PublishError::InvalidInput(_) | PublishError::Metadata(_) => Stage::Validate,
            PublishError::Compose(_) => Stage::Compose,
            PublishError::Merge(_) => Stage::Merge,
            PublishError::Reservation(_) => Stage::Reserve,
            PublishError::Persistence { .. } => Stage::Upload,
            PublishError::Lifecycle { stage, .. } => *stage,
            // Blocking work only runs for composition and merging
            PublishError::TaskJoin(_) => Stage::Compose,
            PublishError::Config(_) | PublishError::Io(_) => Stage::Configure,
        }
    }
}

pub type Result<T> = std::result::Result<T, PublishError>;

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Receipt {
    pub number: String,
    pub file_url: String,
    pub generated_pages: usize,
    pub total_pages: usize,
}

/// Progress reported while a submission runs
#[derive(Debug, Clone)]
pub enum PublishUpdate {
    Stage(Stage),
    Complete(Receipt),
    Failed { stage: Stage, message: String },
}
