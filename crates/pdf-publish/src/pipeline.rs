//! Submission pipeline
//!
//! validate → reserve → compose → merge → upload. Composition and merging
//! run on the blocking pool; every failure carries the stage it came from.
//! A number reserved before a later failure stays reserved in the ledger.

use crate::ledger::{Ledger, Upload};
use crate::types::*;
use chrono::NaiveDate;
use pdf_compose::{Composer, Metadata};
use pdf_merge::MergedPdf;
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;

/// Leading bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check a manuscript before any work is done on it
pub fn validate_manuscript(bytes: &[u8], max_bytes: usize) -> Result<()> {
    if bytes.is_empty() {
        return Err(PublishError::InvalidInput("Manuscript is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(PublishError::InvalidInput(format!(
            "Manuscript is {} bytes, limit is {} bytes",
            bytes.len(),
            max_bytes
        )));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PublishError::InvalidInput(
            "Manuscript is not a PDF file".to_string(),
        ));
    }
    Ok(())
}

/// Read and check a manuscript file
pub async fn load_manuscript(path: impl AsRef<Path>, max_bytes: usize) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(PublishError::InvalidInput(format!(
            "{} is not a .pdf file",
            path.display()
        )));
    }

    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes as u64 {
        return Err(PublishError::InvalidInput(format!(
            "{} is {} bytes, limit is {} bytes",
            path.display(),
            size,
            max_bytes
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    validate_manuscript(&bytes, max_bytes)?;
    Ok(bytes)
}

/// Compose the cover and abstract pages into PDF bytes
pub async fn compose_pdf(
    composer: &Composer,
    number: &str,
    metadata: &Metadata,
    date: NaiveDate,
) -> Result<(Vec<u8>, usize)> {
    Ok(pdf_compose::compose_pdf(composer, number, metadata, date).await?)
}

/// Compose and merge without a ledger
pub async fn assemble(
    composer: &Composer,
    number: &str,
    metadata: &Metadata,
    date: NaiveDate,
    manuscript: Vec<u8>,
) -> Result<MergedPdf> {
    let (generated, _) = compose_pdf(composer, number, metadata, date).await?;
    Ok(pdf_merge::merge(generated, manuscript).await?)
}

/// Runs submissions against a ledger
pub struct Publisher<L: Ledger> {
    ledger: L,
    composer: Composer,
    max_manuscript_bytes: usize,
    updates: Option<UnboundedSender<PublishUpdate>>,
}

impl<L: Ledger> Publisher<L> {
    pub fn new(ledger: L, composer: Composer) -> Self {
        Self {
            ledger,
            composer,
            max_manuscript_bytes: crate::config::DEFAULT_MAX_MANUSCRIPT_BYTES,
            updates: None,
        }
    }

    pub fn with_max_manuscript_bytes(mut self, max_bytes: usize) -> Self {
        self.max_manuscript_bytes = max_bytes;
        self
    }

    /// Report progress on `updates`
    pub fn with_updates(mut self, updates: UnboundedSender<PublishUpdate>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn notify(&self, update: PublishUpdate) {
        if let Some(tx) = &self.updates {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(update);
        }
    }

    /// Run one submission to completion
    pub async fn submit(&self, metadata: &Metadata, manuscript: Vec<u8>) -> Result<Receipt> {
        let result = self.run(metadata, manuscript).await;

        match &result {
            Ok(receipt) => self.notify(PublishUpdate::Complete(receipt.clone())),
            Err(e) => {
                log::error!("Submission failed at {}: {}", e.stage(), e);
                self.notify(PublishUpdate::Failed {
                    stage: e.stage(),
                    message: e.to_string(),
                });
            }
        }

        result
    }

    async fn run(&self, metadata: &Metadata, manuscript: Vec<u8>) -> Result<Receipt> {
        self.notify(PublishUpdate::Stage(Stage::Validate));
        metadata.validate()?;
        validate_manuscript(&manuscript, self.max_manuscript_bytes)?;

        self.notify(PublishUpdate::Stage(Stage::Reserve));
        let number = self
            .ledger
            .reserve(metadata.category)
            .await
            .map_err(PublishError::Reservation)?;
        log::info!("Reserved publication number {}", number);

        let result = self.produce(&number, metadata, manuscript).await;
        if let Err(e) = &result {
            log::warn!("{} remains reserved without a file after {} failed", number, e.stage());
        }
        result
    }

    async fn produce(
        &self,
        number: &str,
        metadata: &Metadata,
        manuscript: Vec<u8>,
    ) -> Result<Receipt> {
        let date = chrono::Local::now().date_naive();

        self.notify(PublishUpdate::Stage(Stage::Compose));
        let (generated, generated_pages) =
            compose_pdf(&self.composer, number, metadata, date).await?;

        self.notify(PublishUpdate::Stage(Stage::Merge));
        let merged = pdf_merge::merge(generated, manuscript).await?;

        self.notify(PublishUpdate::Stage(Stage::Upload));
        let upload = Upload::new(number, metadata.clone(), &merged.bytes);
        let file_url = self
            .ledger
            .upload(&upload)
            .await
            .map_err(|source| PublishError::Persistence {
                number: number.to_string(),
                source,
            })?;
        log::info!("Uploaded {} to {}", number, file_url);

        Ok(Receipt {
            number: number.to_string(),
            file_url,
            generated_pages,
            total_pages: merged.total_pages(),
        })
    }

    pub async fn finalize(&self, number: &str) -> Result<()> {
        self.ledger
            .finalize(number)
            .await
            .map_err(|source| lifecycle(Stage::Finalize, number, source))?;
        log::info!("Finalized {}", number);
        Ok(())
    }

    pub async fn delete(&self, number: &str) -> Result<()> {
        self.ledger
            .delete(number)
            .await
            .map_err(|source| lifecycle(Stage::Delete, number, source))?;
        log::info!("Deleted {}", number);
        Ok(())
    }
}

fn lifecycle(stage: Stage, number: &str, source: LedgerError) -> PublishError {
    PublishError::Lifecycle {
        stage,
        number: number.to_string(),
        source,
    }
}
