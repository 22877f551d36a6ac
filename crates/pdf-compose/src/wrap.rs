//! Greedy line breaking
//!
//! Words are maximal runs of non-whitespace. Lines are filled greedily and a
//! word is never split, so a word wider than the budget sits alone on its
//! own line.

use crate::metrics::FontHandle;
use crate::types::Result;

/// One wrapped line of text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub words: Vec<String>,
}

impl Line {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// The line as drawn with natural single spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Wrap `text` so each line measures at most `max_width` points in `font` at `size`.
pub fn wrap_by_width(text: &str, font: &FontHandle, size: f32, max_width: f32) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_text = String::new();

    for word in text.split_whitespace() {
        let candidate = if current_text.is_empty() {
            word.to_string()
        } else {
            format!("{current_text} {word}")
        };

        if font.width_of(&candidate, size)? <= max_width {
            current.push(word.to_string());
            current_text = candidate;
        } else {
            if !current.is_empty() {
                lines.push(Line::new(std::mem::take(&mut current)));
            }
            current.push(word.to_string());
            current_text = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(Line::new(current));
    }

    Ok(lines)
}

/// Wrap `text` so each line holds at most `max_chars` characters, counting
/// one character per separating space.
pub fn wrap_by_approx_chars(text: &str, max_chars: usize) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let candidate_len = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if candidate_len <= max_chars || current.is_empty() {
            current.push(word.to_string());
            current_len = candidate_len;
        } else {
            lines.push(Line::new(std::mem::take(&mut current)));
            current.push(word.to_string());
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(Line::new(current));
    }

    lines
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FontStyle;

    fn words_of(lines: &[Line]) -> Vec<String> {
        lines.iter().flat_map(|l| l.words.iter().cloned()).collect()
    }

    #[test]
    fn test_empty_text() {
        let font = FontHandle::new(FontStyle::Regular);
        assert!(wrap_by_width("", &font, 12.0, 100.0).unwrap().is_empty());
        assert!(wrap_by_width("   \n\t ", &font, 12.0, 100.0).unwrap().is_empty());
        assert!(wrap_by_approx_chars("", 95).is_empty());
    }

    #[test]
    fn test_width_wrap_respects_budget() {
        let font = FontHandle::new(FontStyle::Bold);
        let text = "Trade Liberalisation and Regional Growth Convergence in South Asian Economies";
        let lines = wrap_by_width(text, &font, 19.0, 200.0).unwrap();

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(font.width_of(&line.text(), 19.0).unwrap() <= 200.0);
        }
        let original: Vec<String> = text.split_whitespace().map(String::from).collect();
        assert_eq!(words_of(&lines), original);
    }

    #[test]
    fn test_oversized_word_alone() {
        let font = FontHandle::new(FontStyle::Regular);
        let lines = wrap_by_width("Pneumonoultramicroscopic", &font, 12.0, 20.0).unwrap();
        assert_eq!(lines, vec![Line::new(vec!["Pneumonoultramicroscopic".into()])]);

        let lines = wrap_by_width("a Pneumonoultramicroscopic b", &font, 12.0, 20.0).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text(), "Pneumonoultramicroscopic");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let font = FontHandle::new(FontStyle::Regular);
        let lines = wrap_by_width("J.\n  Doe", &font, 12.0, 500.0).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "J. Doe");
    }

    #[test]
    fn test_char_wrap_budget() {
        let lines = wrap_by_approx_chars("aaa bbb ccc ddd", 7);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_char_wrap_long_word() {
        let lines = wrap_by_approx_chars("tiny extraordinarily tiny", 5);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["tiny", "extraordinarily", "tiny"]);
    }

    #[test]
    fn test_char_wrap_preserves_words() {
        let text = "growth, trade, productivity, convergence, institutions, South Asia";
        let lines = wrap_by_approx_chars(text, 20);
        for line in &lines {
            assert!(line.text().chars().count() <= 20);
        }
        let original: Vec<String> = text.split_whitespace().map(String::from).collect();
        assert_eq!(words_of(&lines), original);
    }
}
