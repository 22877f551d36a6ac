//! Fixed layout constants for the generated pages
//!
//! All values are in PDF points (1/72 inch) with the origin at the
//! bottom-left corner of the page.

// =============================================================================
// Page
// =============================================================================

/// A4 width in points
pub const A4_WIDTH_PT: f32 = 595.0;

/// A4 height in points
pub const A4_HEIGHT_PT: f32 = 842.0;

// =============================================================================
// Cover Page
// =============================================================================

/// Publication number font size (bold)
pub const PUB_NUMBER_SIZE: f32 = 14.0;

/// Distance of the publication number from the right and top edges
pub const PUB_NUMBER_INSET: f32 = 50.0;

/// Distance from the top edge to the first title baseline
pub const COVER_TITLE_DROP: f32 = 100.0;

/// Horizontal inset on each side for cover title and author lines
pub const COVER_TEXT_INSET: f32 = 50.0;

pub const COVER_TITLE_SIZE: f32 = 19.0;
pub const COVER_TITLE_LEADING: f32 = 25.0;

/// Gap between the cover title block and the author block
pub const COVER_AUTHOR_GAP: f32 = 80.0;

pub const COVER_AUTHOR_SIZE: f32 = 13.0;
pub const COVER_AUTHOR_LEADING: f32 = 18.0;

/// Baseline of the institute name
pub const ADDRESS_TOP: f32 = 200.0;
pub const ADDRESS_NAME_SIZE: f32 = 14.0;
pub const ADDRESS_LINE_SIZE: f32 = 13.0;
pub const ADDRESS_LEADING: f32 = 20.0;

/// Gap between the last address line and the date stamp
pub const DATE_GAP: f32 = 30.0;
pub const DATE_SIZE: f32 = 12.0;

// =============================================================================
// Abstract Pages
// =============================================================================

pub const TITLE_SIZE: f32 = 18.0;
pub const TITLE_LEADING: f32 = 26.0;
pub const TITLE_GAP: f32 = 20.0;

pub const AUTHOR_SIZE: f32 = 12.0;
pub const AUTHOR_LEADING: f32 = 20.0;
pub const AUTHOR_GAP: f32 = 10.0;

pub const EMAIL_SIZE: f32 = 11.0;
pub const EMAIL_LEADING: f32 = 16.0;
pub const EMAIL_GAP: f32 = 40.0;
pub const EMAIL_PREFIX: &str = "Email (corresponding author): ";

pub const HEADING_TEXT: &str = "ABSTRACT";
pub const HEADING_SIZE: f32 = 14.0;
pub const HEADING_GAP: f32 = 45.0;

/// Body line leading beyond the body font size (abstract and acknowledgement)
pub const BODY_LEADING_EXTRA: f32 = 6.0;

/// Keyword line leading beyond the body font size
pub const KEYWORD_LEADING_EXTRA: f32 = 5.0;

/// Gap after the abstract body
pub const ABSTRACT_GAP: f32 = 35.0;

/// Drop from a section label to its first content line, beyond the label size
pub const LABEL_DROP_EXTRA: f32 = 4.0;

/// Slack added to labelled block heights when checking for room
pub const LABEL_BLOCK_EXTRA: f32 = 10.0;

pub const KEYWORDS_LABEL: &str = "Keywords:";
pub const KEYWORDS_GAP: f32 = 15.0;

pub const JEL_LABEL: &str = "JEL Code: ";
/// Offset of the JEL code from the left margin
pub const JEL_VALUE_OFFSET: f32 = 70.0;
/// Minimum room required for the JEL block
pub const JEL_BLOCK_HEIGHT: f32 = 55.0;
pub const JEL_GAP: f32 = 45.0;

pub const ACKNOWLEDGEMENT_LABEL: &str = "Acknowledgment:";
pub const ACKNOWLEDGEMENT_GAP: f32 = 10.0;
