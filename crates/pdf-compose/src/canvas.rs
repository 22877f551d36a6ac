//! Page display lists and their conversion to printpdf operations

use crate::metrics::FontStyle;
use printpdf::{
    Color, LinePoint, Mm, Op, PaintMode, PdfPage, Point, Polygon, PolygonRing, Pt, Rgb, TextItem,
    WindingOrder,
};

/// RGB color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::rgb(0.0, 0.0, 0.0);
    pub const MAROON: RgbColor = RgbColor::rgb(0.5, 0.0, 0.0);
    pub const BLUE: RgbColor = RgbColor::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    fn to_pdf(self) -> Color {
        Color::Rgb(Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
            icc_profile: None,
        })
    }
}

/// A point of a filled outline; control points of cubic curves are flagged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,
    pub control: bool,
}

/// One drawing primitive in page coordinates (points, origin bottom-left)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontStyle,
        size: f32,
        color: RgbColor,
    },
    /// Closed outlines filled with the non-zero rule
    Fill {
        rings: Vec<Vec<PathPoint>>,
        color: RgbColor,
    },
}

/// Ordered drawing surface for a single page
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl PageCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, font: FontStyle, size: f32) {
        self.colored_text(x, y, text, font, size, RgbColor::BLACK);
    }

    pub fn colored_text(
        &mut self,
        x: f32,
        y: f32,
        text: impl Into<String>,
        font: FontStyle,
        size: f32,
        color: RgbColor,
    ) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font,
            size,
            color,
        });
    }

    pub fn fill(&mut self, rings: Vec<Vec<PathPoint>>, color: RgbColor) {
        if rings.iter().any(|r| r.len() >= 2) {
            self.commands.push(DrawCommand::Fill { rings, color });
        }
    }

    /// Fill the whole page
    pub fn background(&mut self, color: RgbColor) {
        let corner = |x, y| PathPoint {
            x,
            y,
            control: false,
        };
        let ring = vec![
            corner(0.0, 0.0),
            corner(self.width, 0.0),
            corner(self.width, self.height),
            corner(0.0, self.height),
        ];
        self.fill(vec![ring], color);
    }

    /// Text commands in drawing order
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            DrawCommand::Fill { .. } => None,
        })
    }

    pub fn to_ops(&self) -> Vec<Op> {
        let mut ops = Vec::new();

        for cmd in &self.commands {
            match cmd {
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font,
                    size,
                    color,
                } => {
                    ops.push(Op::SetFillColor {
                        col: color.to_pdf(),
                    });
                    ops.push(Op::StartTextSection);
                    ops.push(Op::SetTextCursor {
                        pos: Point { x: Pt(*x), y: Pt(*y) },
                    });
                    ops.push(Op::SetFontSizeBuiltinFont {
                        font: font.builtin(),
                        size: Pt(*size),
                    });
                    ops.push(Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(text.clone())],
                        font: font.builtin(),
                    });
                    ops.push(Op::EndTextSection);
                }
                DrawCommand::Fill { rings, color } => {
                    ops.push(Op::SetFillColor {
                        col: color.to_pdf(),
                    });
                    ops.push(Op::DrawPolygon {
                        polygon: Polygon {
                            rings: rings
                                .iter()
                                .map(|ring| PolygonRing {
                                    points: ring
                                        .iter()
                                        .map(|p| LinePoint {
                                            p: Point {
                                                x: Pt(p.x),
                                                y: Pt(p.y),
                                            },
                                            bezier: p.control,
                                        })
                                        .collect(),
                                })
                                .collect(),
                            mode: PaintMode::Fill,
                            winding_order: WindingOrder::NonZero,
                        },
                    });
                }
            }
        }

        ops
    }

    pub fn to_pdf_page(&self) -> PdfPage {
        PdfPage::new(
            Mm::from(Pt(self.width)),
            Mm::from(Pt(self.height)),
            self.to_ops(),
        )
    }
}
