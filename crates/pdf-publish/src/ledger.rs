//! Publication ledger: number reservation and archive of submitted files

use crate::numbering::PublicationNumber;
use crate::types::{LedgerError, LedgerResult};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Datelike, Local};
use pdf_compose::{Category, Metadata};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::Mutex;

/// MIME type recorded for every upload
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Lifecycle of a ledger row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerStatus {
    Reserved,
    Uploaded,
    Finalized,
}

impl LedgerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LedgerStatus::Reserved => "RESERVED",
            LedgerStatus::Uploaded => "UPLOADED",
            LedgerStatus::Finalized => "FINALIZED",
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merged document and the metadata recorded with it
#[derive(Debug, Clone)]
pub struct Upload {
    pub number: String,
    pub metadata: Metadata,
    /// Base64 encoded file body
    pub file_content: String,
    pub file_type: String,
    pub file_name: String,
}

impl Upload {
    pub fn new(number: impl Into<String>, metadata: Metadata, bytes: &[u8]) -> Self {
        let number = number.into();
        Self {
            file_name: format!("{}.pdf", number),
            number,
            metadata,
            file_content: STANDARD.encode(bytes),
            file_type: PDF_MIME_TYPE.to_string(),
        }
    }

    pub fn decode(&self) -> LedgerResult<Vec<u8>> {
        STANDARD
            .decode(self.file_content.as_bytes())
            .map_err(|e| LedgerError::InvalidUpload(format!("fileContent is not base64: {}", e)))
    }

    fn check(&self) -> LedgerResult<()> {
        if self.number.trim().is_empty() {
            return Err(LedgerError::InvalidUpload("Missing publicationNo".to_string()));
        }
        if self.file_content.is_empty() {
            return Err(LedgerError::InvalidUpload("Missing fileContent".to_string()));
        }
        Ok(())
    }
}

/// Store that hands out publication numbers and archives submissions
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Reserve the next number in `category` for the current year
    async fn reserve(&self, category: Category) -> LedgerResult<String>;

    /// Archive a merged document against its reserved number, returning the
    /// file URL
    async fn upload(&self, upload: &Upload) -> LedgerResult<String>;

    /// Lock an uploaded submission against further changes
    async fn finalize(&self, number: &str) -> LedgerResult<()>;

    /// Remove a submission that has not been finalized
    async fn delete(&self, number: &str) -> LedgerResult<()>;
}

/// One row of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub number: String,
    pub category: Category,
    pub metadata: Metadata,
    pub file_url: Option<String>,
    pub updated: DateTime<Local>,
    pub status: LedgerStatus,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<LedgerRow>,
    files: HashMap<String, Vec<u8>>,
    /// Deleted numbers, never reissued
    retired: Vec<(Category, String)>,
}

impl MemoryState {
    fn row_mut(&mut self, number: &str) -> LedgerResult<&mut LedgerRow> {
        self.rows
            .iter_mut()
            .find(|r| r.number == number)
            .ok_or_else(|| LedgerError::NotFound(number.to_string()))
    }
}

/// In-process ledger. A single lock serializes reservations and uploads.
#[derive(Debug)]
pub struct MemoryLedger {
    year: Option<i32>,
    state: Mutex<MemoryState>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    /// Ledger numbering by the current calendar year
    pub fn new() -> Self {
        Self {
            year: None,
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Ledger numbering by a fixed year
    pub fn with_year(year: i32) -> Self {
        Self {
            year: Some(year),
            state: Mutex::new(MemoryState::default()),
        }
    }

    pub async fn rows(&self) -> Vec<LedgerRow> {
        self.state.lock().await.rows.clone()
    }

    pub async fn row(&self, number: &str) -> Option<LedgerRow> {
        let state = self.state.lock().await;
        state.rows.iter().find(|r| r.number == number).cloned()
    }

    /// Stored file for an uploaded number
    pub async fn file(&self, number: &str) -> Option<Vec<u8>> {
        self.state.lock().await.files.get(number).cloned()
    }

    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }

    fn file_url(number: &str) -> String {
        format!("memory://{}.pdf", number)
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn reserve(&self, category: Category) -> LedgerResult<String> {
        let mut state = self.state.lock().await;

        let existing = state
            .rows
            .iter()
            .map(|r| (r.category, r.number.as_str()))
            .chain(state.retired.iter().map(|(c, n)| (*c, n.as_str())))
            .filter(|(c, _)| *c == category)
            .map(|(_, n)| n);
        let number = PublicationNumber::next_in_sequence(category, self.year(), existing).to_string();

        state.rows.push(LedgerRow {
            number: number.clone(),
            category,
            metadata: Metadata {
                category,
                ..Default::default()
            },
            file_url: None,
            updated: Local::now(),
            status: LedgerStatus::Reserved,
        });

        log::debug!("Reserved {} in {}", number, category.sheet_name());
        Ok(number)
    }

    async fn upload(&self, upload: &Upload) -> LedgerResult<String> {
        upload.check()?;
        let bytes = upload.decode()?;
        let number = upload.number.trim().to_string();
        let file_url = Self::file_url(&number);

        let mut state = self.state.lock().await;
        let row = LedgerRow {
            number: number.clone(),
            category: upload.metadata.category,
            metadata: upload.metadata.clone(),
            file_url: Some(file_url.clone()),
            updated: Local::now(),
            status: LedgerStatus::Uploaded,
        };

        match state.rows.iter_mut().find(|r| r.number == number) {
            Some(existing) if existing.status == LedgerStatus::Finalized => {
                return Err(LedgerError::Finalized(number));
            }
            Some(existing) => *existing = row,
            None => {
                log::warn!("No reservation for {}, appending a new row", number);
                state.rows.push(row);
            }
        }
        state.files.insert(number, bytes);

        Ok(file_url)
    }

    async fn finalize(&self, number: &str) -> LedgerResult<()> {
        let mut state = self.state.lock().await;
        let row = state.row_mut(number)?;

        match row.status {
            LedgerStatus::Uploaded => {
                row.status = LedgerStatus::Finalized;
                row.updated = Local::now();
                Ok(())
            }
            LedgerStatus::Reserved => Err(LedgerError::Rejected(format!(
                "{} has no uploaded file",
                number
            ))),
            LedgerStatus::Finalized => Err(LedgerError::Finalized(number.to_string())),
        }
    }

    async fn delete(&self, number: &str) -> LedgerResult<()> {
        let mut state = self.state.lock().await;
        let row = state.row_mut(number)?;
        if row.status == LedgerStatus::Finalized {
            return Err(LedgerError::Finalized(number.to_string()));
        }
        let category = row.category;

        state.rows.retain(|r| r.number != number);
        state.retired.push((category, number.to_string()));
        state.files.remove(number);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
