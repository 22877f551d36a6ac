mod config;
pub mod ledger;
pub mod numbering;
mod pipeline;
mod remote;
mod types;

pub use config::{DEFAULT_MAX_MANUSCRIPT_BYTES, ServiceConfig, WEB_APP_URL_ENV};
pub use ledger::{Ledger, LedgerRow, LedgerStatus, MemoryLedger, Upload};
pub use numbering::PublicationNumber;
pub use pipeline::{Publisher, assemble, compose_pdf, load_manuscript, validate_manuscript};
pub use remote::WebAppLedger;
pub use types::*;

// Re-export the document crates so front ends depend on one library
pub use pdf_compose;
pub use pdf_merge;
