mod copy;
mod io;
mod merge;
mod types;

pub use copy::copy_object_deep;
pub use io::{load_pdf, parse_generated, parse_manuscript, save_pdf, to_bytes};
pub use merge::{merge, merge_bytes, merge_documents, merge_files};
pub use types::*;
