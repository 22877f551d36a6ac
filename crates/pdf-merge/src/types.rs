use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Manuscript is not a readable PDF: {0}")]
    MalformedInput(lopdf::Error),
    #[error("Generated document could not be read back: {0}")]
    Generated(lopdf::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("The {0} document has no pages")]
    NoPages(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, MergeError>;

/// Serialized result of a merge
#[derive(Debug, Clone)]
pub struct MergedPdf {
    pub bytes: Vec<u8>,
    pub generated_pages: usize,
    pub manuscript_pages: usize,
}

impl MergedPdf {
    pub fn total_pages(&self) -> usize {
        self.generated_pages + self.manuscript_pages
    }
}
