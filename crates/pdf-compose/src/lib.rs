pub mod canvas;
mod compose;
pub mod constants;
pub mod emblem;
pub mod flow;
pub mod justify;
mod letterhead;
pub mod metrics;
mod options;
mod types;
pub mod wrap;

pub use canvas::{DrawCommand, PageCanvas, PathPoint, RgbColor};
pub use compose::{ComposedDocument, Composer, compose_pdf, document_title, generate_pdf};
pub use flow::{Advance, Cursor, PageFlow};
pub use justify::{LinePlacement, PlacedWord, justify, place_paragraph};
pub use letterhead::Letterhead;
pub use metrics::{FontHandle, FontStyle, Fonts};
pub use options::*;
pub use types::*;
pub use wrap::{Line, wrap_by_approx_chars, wrap_by_width};
