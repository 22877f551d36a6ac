//! Glyph metrics for the builtin Helvetica faces
//!
//! Widths are taken from the Adobe Font Metrics of the standard 14 fonts and
//! are expressed in thousandths of an em. Helvetica-Oblique shares the
//! widths of Helvetica.

use crate::types::{ComposeError, Result};
use printpdf::BuiltinFont;
use std::fmt;

/// Widths of U+0020..=U+007E in Helvetica
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Widths of U+0020..=U+007E in Helvetica-Bold
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Typographic punctuation outside the ASCII range: (char, regular, bold)
const PUNCTUATION_WIDTHS: [(char, u16, u16); 8] = [
    ('\u{00A0}', 278, 278), // no-break space
    ('\u{2013}', 556, 556), // en dash
    ('\u{2014}', 1000, 1000), // em dash
    ('\u{2018}', 222, 278), // left single quote
    ('\u{2019}', 222, 278), // right single quote
    ('\u{201C}', 333, 500), // left double quote
    ('\u{201D}', 333, 500), // right double quote
    ('\u{2026}', 1000, 1000), // ellipsis
];

/// Typeface style used by the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub fn builtin(self) -> BuiltinFont {
        match self {
            FontStyle::Regular => BuiltinFont::Helvetica,
            FontStyle::Bold => BuiltinFont::HelveticaBold,
            FontStyle::Italic => BuiltinFont::HelveticaOblique,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to one face of the document's font family.
///
/// The handle measures text; drawing goes through the page canvas, which
/// records the handle's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHandle {
    style: FontStyle,
}

impl FontHandle {
    pub fn new(style: FontStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Advance width of a single character in thousandths of an em
    pub fn char_width(&self, ch: char) -> Result<u16> {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            let idx = (code - 0x20) as usize;
            return Ok(match self.style {
                FontStyle::Bold => HELVETICA_BOLD_WIDTHS[idx],
                FontStyle::Regular | FontStyle::Italic => HELVETICA_WIDTHS[idx],
            });
        }

        PUNCTUATION_WIDTHS
            .iter()
            .find(|(c, _, _)| *c == ch)
            .map(|&(_, regular, bold)| match self.style {
                FontStyle::Bold => bold,
                FontStyle::Regular | FontStyle::Italic => regular,
            })
            .ok_or(ComposeError::UnsupportedCharacter {
                ch,
                font: self.style,
            })
    }

    /// Width of `text` set at `size` points
    pub fn width_of(&self, text: &str, size: f32) -> Result<f32> {
        let mut units: u32 = 0;
        for ch in text.chars() {
            units += u32::from(self.char_width(ch)?);
        }
        Ok(units as f32 / 1000.0 * size)
    }
}

/// The three faces owned by a composer
#[derive(Debug, Clone, Copy)]
pub struct Fonts {
    pub regular: FontHandle,
    pub bold: FontHandle,
    pub italic: FontHandle,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            regular: FontHandle::new(FontStyle::Regular),
            bold: FontHandle::new(FontStyle::Bold),
            italic: FontHandle::new(FontStyle::Italic),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths() {
        let regular = FontHandle::new(FontStyle::Regular);
        assert_eq!(regular.char_width(' ').unwrap(), 278);
        assert_eq!(regular.char_width('A').unwrap(), 667);
        assert_eq!(regular.char_width('i').unwrap(), 222);
        assert_eq!(regular.char_width('~').unwrap(), 584);

        let bold = FontHandle::new(FontStyle::Bold);
        assert_eq!(bold.char_width('i').unwrap(), 278);
        assert_eq!(bold.char_width('m').unwrap(), 889);
    }

    #[test]
    fn test_italic_shares_regular_widths() {
        let regular = FontHandle::new(FontStyle::Regular);
        let italic = FontHandle::new(FontStyle::Italic);
        let text = "Economic Growth in South Asia";
        assert_eq!(
            regular.width_of(text, 11.0).unwrap(),
            italic.width_of(text, 11.0).unwrap()
        );
    }

    #[test]
    fn test_width_scales_with_size() {
        let font = FontHandle::new(FontStyle::Regular);
        // "Hi" = 722 + 222 units
        assert!((font.width_of("Hi", 10.0).unwrap() - 9.44).abs() < 1e-4);
        assert!((font.width_of("Hi", 20.0).unwrap() - 18.88).abs() < 1e-4);
        assert_eq!(font.width_of("", 12.0).unwrap(), 0.0);
    }

    #[test]
    fn test_unsupported_character() {
        let font = FontHandle::new(FontStyle::Bold);
        match font.width_of("naïve", 12.0) {
            Err(ComposeError::UnsupportedCharacter { ch, font }) => {
                assert_eq!(ch, 'ï');
                assert_eq!(font, FontStyle::Bold);
            }
            other => panic!("Expected UnsupportedCharacter, got {:?}", other),
        }
    }

    #[test]
    fn test_typographic_punctuation() {
        let font = FontHandle::new(FontStyle::Regular);
        assert_eq!(font.char_width('\u{2014}').unwrap(), 1000);
        assert_eq!(font.char_width('\u{2019}').unwrap(), 222);
    }
}
