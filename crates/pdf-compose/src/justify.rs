//! Inter-word justification
//!
//! A justified line starts at the left margin and its word widths plus gaps
//! add up to the column width. Each gap is the natural space widened by an
//! equal share of the slack.

use crate::metrics::FontHandle;
use crate::types::Result;
use crate::wrap::Line;

/// A word positioned on the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub x: f32,
}

/// Horizontal placement of one line
#[derive(Debug, Clone, PartialEq)]
pub enum LinePlacement {
    /// Whole line drawn at the margin with natural spacing
    Natural { text: String, x: f32 },
    /// Words drawn individually with widened gaps
    Justified {
        words: Vec<PlacedWord>,
        /// Space between adjacent words: the word widths plus this gap
        /// between each pair fill the column
        extra_space: f32,
    },
}

/// Spread the words of `line` across `target_width`, starting at `left`.
///
/// Returns `None` when the line cannot be justified: a single word, or a line
/// whose natural width already reaches the target.
pub fn justify(
    line: &Line,
    font: &FontHandle,
    size: f32,
    left: f32,
    target_width: f32,
) -> Result<Option<Vec<PlacedWord>>> {
    Ok(justify_with_slack(line, font, size, left, target_width)?.map(|(words, _)| words))
}

fn justify_with_slack(
    line: &Line,
    font: &FontHandle,
    size: f32,
    left: f32,
    target_width: f32,
) -> Result<Option<(Vec<PlacedWord>, f32)>> {
    let count = line.word_count();
    if count < 2 {
        return Ok(None);
    }

    let natural_width = font.width_of(&line.text(), size)?;
    if natural_width >= target_width {
        log::warn!(
            "Line of {} words is {:.1}pt wide, column is {:.1}pt; leaving it unjustified",
            count,
            natural_width,
            target_width
        );
        return Ok(None);
    }

    let slack = (target_width - natural_width) / (count - 1) as f32;
    let gap = font.width_of(" ", size)? + slack;

    let mut placed = Vec::with_capacity(count);
    let mut x = left;
    for word in &line.words {
        placed.push(PlacedWord {
            word: word.clone(),
            x,
        });
        x += font.width_of(word, size)? + gap;
    }

    Ok(Some((placed, gap)))
}

/// Place every line of a paragraph: all lines justified except the last.
pub fn place_paragraph(
    lines: &[Line],
    font: &FontHandle,
    size: f32,
    left: f32,
    target_width: f32,
) -> Result<Vec<LinePlacement>> {
    let mut placements = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let is_last = i + 1 == lines.len();
        let justified = if is_last {
            None
        } else {
            justify_with_slack(line, font, size, left, target_width)?
        };

        placements.push(match justified {
            Some((words, extra_space)) => LinePlacement::Justified { words, extra_space },
            None => LinePlacement::Natural {
                text: line.text(),
                x: left,
            },
        });
    }

    Ok(placements)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FontStyle;

    fn line(text: &str) -> Line {
        Line::new(text.split_whitespace().map(String::from).collect())
    }

    #[test]
    fn test_single_word_not_justified() {
        let font = FontHandle::new(FontStyle::Regular);
        assert!(justify(&line("growth"), &font, 11.0, 50.0, 540.0).unwrap().is_none());
    }

    #[test]
    fn test_first_word_at_margin() {
        let font = FontHandle::new(FontStyle::Regular);
        let placed = justify(&line("a b c"), &font, 11.0, 50.0, 300.0).unwrap().unwrap();
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].x, 50.0);
        assert!(placed[1].x < placed[2].x);
    }

    #[test]
    fn test_last_word_ends_at_target() {
        let font = FontHandle::new(FontStyle::Italic);
        let l = line("We study the effect of trade openness on regional growth");
        let placed = justify(&l, &font, 11.0, 50.0, 400.0).unwrap().unwrap();

        let last = placed.last().unwrap();
        let right_edge = last.x + font.width_of(&last.word, 11.0).unwrap();
        assert!((right_edge - 450.0).abs() < 0.01);
    }

    #[test]
    fn test_words_and_gaps_fill_target() {
        let font = FontHandle::new(FontStyle::Regular);
        let l = line("We study the effect of trade openness");
        let placements = place_paragraph(&[l.clone(), line("growth")], &font, 11.0, 50.0, 540.0)
            .unwrap();

        let LinePlacement::Justified { words, extra_space } = &placements[0] else {
            panic!("expected a justified line, got {:?}", placements[0]);
        };
        let widths: f32 = words
            .iter()
            .map(|w| font.width_of(&w.word, 11.0).unwrap())
            .sum();
        let total = widths + (words.len() - 1) as f32 * extra_space;
        assert!((total - 540.0).abs() < 0.01, "total {} != 540", total);
    }

    #[test]
    fn test_overfull_line_left_natural() {
        let font = FontHandle::new(FontStyle::Regular);
        let l = line("this line is far too wide for the column");
        assert!(justify(&l, &font, 11.0, 50.0, 40.0).unwrap().is_none());
    }

    #[test]
    fn test_paragraph_last_line_natural() {
        let font = FontHandle::new(FontStyle::Regular);
        let lines = vec![line("one two three"), line("four five")];
        let placements = place_paragraph(&lines, &font, 11.0, 50.0, 300.0).unwrap();

        assert!(matches!(placements[0], LinePlacement::Justified { .. }));
        assert_eq!(
            placements[1],
            LinePlacement::Natural {
                text: "four five".into(),
                x: 50.0
            }
        );
    }
}
