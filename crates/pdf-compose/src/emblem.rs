//! Vector emblem drawn on the cover page
//!
//! Outlines are given as path data (`M m L l H h V v C c Z z`) in their own
//! coordinate space and mapped onto the page with an origin and per-axis
//! scale. Each subpath becomes one ring of a single non-zero fill.

use crate::canvas::PathPoint;
use crate::types::{ComposeError, Result};

/// Placement of an outline path on the page
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTransform {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl PathTransform {
    fn apply(&self, x: f32, y: f32, control: bool) -> PathPoint {
        PathPoint {
            x: self.origin_x + self.scale_x * x,
            y: self.origin_y + self.scale_y * y,
            control,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f32),
}

fn tokenize(data: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = data.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_ascii_whitespace() || ch == ',' {
            chars.next();
        } else if "MmLlHhVvCcZz".contains(ch) {
            tokens.push(Token::Command(ch));
            chars.next();
        } else if ch == '-' || ch == '+' || ch == '.' || ch.is_ascii_digit() {
            let mut end = start + ch.len_utf8();
            let mut seen_dot = ch == '.';
            chars.next();
            while let Some(&(idx, next)) = chars.peek() {
                if next.is_ascii_digit() || (next == '.' && !seen_dot) {
                    seen_dot |= next == '.';
                    end = idx + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let number = data[start..end]
                .parse::<f32>()
                .map_err(|_| invalid(&format!("bad number {:?}", &data[start..end])))?;
            tokens.push(Token::Number(number));
        } else {
            return Err(invalid(&format!("unexpected character {:?}", ch)));
        }
    }

    Ok(tokens)
}

fn invalid(reason: &str) -> ComposeError {
    ComposeError::Layout(format!("Invalid emblem path: {}", reason))
}

/// Convert path data to page-space rings
pub fn path_rings(data: &str, transform: &PathTransform) -> Result<Vec<Vec<PathPoint>>> {
    let tokens = tokenize(data)?;
    let mut rings: Vec<Vec<PathPoint>> = Vec::new();
    let mut ring: Vec<PathPoint> = Vec::new();

    let (mut cx, mut cy) = (0.0f32, 0.0f32);
    let (mut sx, mut sy) = (0.0f32, 0.0f32);
    let mut command: Option<char> = None;
    let mut i = 0;

    let number = |i: &mut usize| -> Result<f32> {
        match tokens.get(*i) {
            Some(Token::Number(n)) => {
                *i += 1;
                Ok(*n)
            }
            _ => Err(invalid("expected a number")),
        }
    };

    while i < tokens.len() {
        let cmd = match tokens[i] {
            Token::Command(c) => {
                i += 1;
                c
            }
            // Repeated arguments reuse the previous command; moveto repeats as lineto
            Token::Number(_) => match command {
                Some('M') => 'L',
                Some('m') => 'l',
                Some(c) if c != 'Z' && c != 'z' => c,
                _ => return Err(invalid("coordinates before any command")),
            },
        };
        let relative = cmd.is_ascii_lowercase();
        let (bx, by) = if relative { (cx, cy) } else { (0.0, 0.0) };

        match cmd.to_ascii_uppercase() {
            'M' => {
                if ring.len() > 1 {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.clear();
                cx = bx + number(&mut i)?;
                cy = by + number(&mut i)?;
                sx = cx;
                sy = cy;
                ring.push(transform.apply(cx, cy, false));
            }
            'L' => {
                cx = bx + number(&mut i)?;
                cy = by + number(&mut i)?;
                ring.push(transform.apply(cx, cy, false));
            }
            'H' => {
                cx = bx + number(&mut i)?;
                ring.push(transform.apply(cx, cy, false));
            }
            'V' => {
                cy = by + number(&mut i)?;
                ring.push(transform.apply(cx, cy, false));
            }
            'C' => {
                let x1 = bx + number(&mut i)?;
                let y1 = by + number(&mut i)?;
                let x2 = bx + number(&mut i)?;
                let y2 = by + number(&mut i)?;
                cx = bx + number(&mut i)?;
                cy = by + number(&mut i)?;
                ring.push(transform.apply(x1, y1, true));
                ring.push(transform.apply(x2, y2, true));
                ring.push(transform.apply(cx, cy, false));
            }
            'Z' => {
                if ring.len() > 1 {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.clear();
                cx = sx;
                cy = sy;
            }
            _ => unreachable!("tokenizer only yields path commands"),
        }

        command = Some(cmd);
    }

    if ring.len() > 1 {
        rings.push(ring);
    }

    Ok(rings)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: PathTransform = PathTransform {
        origin_x: 0.0,
        origin_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    fn xy(points: &[PathPoint]) -> Vec<(f32, f32)> {
        points.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_relative_lines() {
        let rings = path_rings("M10 10 l5 0 0 5 -5 0z", &IDENTITY).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(
            xy(&rings[0]),
            vec![(10.0, 10.0), (15.0, 10.0), (15.0, 15.0), (10.0, 15.0)]
        );
    }

    #[test]
    fn test_relative_curve_flags_controls() {
        let rings = path_rings("M0 0 c1 2 3 4 5 6", &IDENTITY).unwrap();
        let ring = &rings[0];
        assert_eq!(ring.len(), 4);
        assert!(ring[1].control && ring[2].control);
        assert!(!ring[3].control);
        assert_eq!((ring[3].x, ring[3].y), (5.0, 6.0));
    }

    #[test]
    fn test_subpaths_after_close() {
        let rings = path_rings("M0 0 l10 0 0 10z m2 2 l1 0 0 1z", &IDENTITY).unwrap();
        assert_eq!(rings.len(), 2);
        assert_eq!((rings[1][0].x, rings[1][0].y), (2.0, 2.0));
    }

    #[test]
    fn test_transform_applied() {
        let transform = PathTransform {
            origin_x: 100.0,
            origin_y: 200.0,
            scale_x: -0.05,
            scale_y: 0.05,
        };
        let rings = path_rings("M100 100 L200 100", &transform).unwrap();
        let expected = [(95.0, 205.0), (90.0, 205.0)];
        for ((x, y), (ex, ey)) in xy(&rings[0]).into_iter().zip(expected) {
            assert!((x - ex).abs() < 1e-3 && (y - ey).abs() < 1e-3);
        }
    }

    #[test]
    fn test_negative_numbers_without_separator() {
        let rings = path_rings("M629 4183 l-586 -3 -6-83", &IDENTITY).unwrap();
        assert_eq!(xy(&rings[0])[2], (37.0, 4097.0));
    }

    #[test]
    fn test_invalid_path() {
        assert!(path_rings("M0 0 Q1 1 2 2", &IDENTITY).is_err());
        assert!(path_rings("M0", &IDENTITY).is_err());
        assert!(path_rings("10 10", &IDENTITY).is_err());
    }
}
