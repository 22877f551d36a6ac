//! Document I/O

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from disk
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Parse a user-supplied manuscript
pub fn parse_manuscript(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(MergeError::MalformedInput)
}

/// Parse a document produced by the composer
pub fn parse_generated(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(MergeError::Generated)
}

/// Serialize a document to bytes
pub fn to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save a document to disk
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || to_bytes(&mut doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
