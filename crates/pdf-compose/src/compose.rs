//! Cover and abstract page composition
//!
//! Each page kind is an ordered list of sections. A section pairs a presence
//! check with a renderer, so optional blocks are skipped without leaving
//! their spacing behind.

use crate::canvas::{PageCanvas, RgbColor};
use crate::constants::*;
use crate::emblem::path_rings;
use crate::flow::{Cursor, PageFlow};
use crate::justify::{LinePlacement, place_paragraph};
use crate::metrics::{FontHandle, FontStyle, Fonts};
use crate::options::ComposeOptions;
use crate::types::{Metadata, Result};
use crate::wrap::{Line, wrap_by_approx_chars, wrap_by_width};
use chrono::NaiveDate;
use printpdf::{PdfDocument, PdfSaveOptions};
use std::path::Path;

/// Everything drawn for one submission
struct Submission<'a> {
    number: &'a str,
    metadata: &'a Metadata,
    date: NaiveDate,
}

/// The single cover page and its cursor
struct CoverPage {
    canvas: PageCanvas,
    cursor: Cursor,
    /// Lowest title or author baseline drawn so far
    lowest_text: f32,
}

type Present = fn(&Submission<'_>) -> bool;
type RenderCover = fn(&Composer, &Submission<'_>, &mut CoverPage) -> Result<()>;
type RenderAbstract = fn(&Composer, &Submission<'_>, &mut PageFlow) -> Result<()>;

const COVER_SECTIONS: &[(&str, Present, RenderCover)] = &[
    ("background", always, Composer::cover_background),
    ("publication number", always, Composer::cover_number),
    ("title", always, Composer::cover_title),
    ("author", always, Composer::cover_author),
    ("emblem", always, Composer::cover_emblem),
    ("address", always, Composer::cover_address),
    ("date", always, Composer::cover_date),
];

const ABSTRACT_SECTIONS: &[(&str, Present, RenderAbstract)] = &[
    ("title", always, Composer::abstract_title),
    ("author", always, Composer::abstract_author),
    ("email", has_email, Composer::abstract_email),
    ("heading", always, Composer::abstract_heading),
    ("abstract", always, Composer::abstract_body),
    ("keywords", has_keywords, Composer::abstract_keywords),
    ("JEL code", has_jel_code, Composer::abstract_jel_code),
    ("acknowledgement", has_acknowledgement, Composer::abstract_acknowledgement),
];

fn always(_: &Submission<'_>) -> bool {
    true
}

fn has_email(s: &Submission<'_>) -> bool {
    !s.metadata.email.trim().is_empty()
}

fn has_keywords(s: &Submission<'_>) -> bool {
    !s.metadata.keywords.trim().is_empty()
}

fn has_jel_code(s: &Submission<'_>) -> bool {
    !s.metadata.jel_code.trim().is_empty()
}

fn has_acknowledgement(s: &Submission<'_>) -> bool {
    !s.metadata.acknowledgement.trim().is_empty()
}

/// Generated pages ready to be serialized or merged
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub pages: Vec<PageCanvas>,
}

impl ComposedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize through printpdf
    pub fn to_pdf_bytes(&self, title: &str) -> Vec<u8> {
        let mut doc = PdfDocument::new(title);
        doc.pages = self.pages.iter().map(PageCanvas::to_pdf_page).collect();

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF serialization produced {} warnings", warnings.len());
        }
        bytes
    }
}

/// Lays out the cover page and abstract pages for a submission
#[derive(Debug, Clone, Default)]
pub struct Composer {
    fonts: Fonts,
    options: ComposeOptions,
}

impl Composer {
    pub fn new(options: ComposeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            fonts: Fonts::default(),
            options,
        })
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose the cover page followed by the abstract pages.
    ///
    /// Any measurement failure aborts the whole document.
    pub fn compose(
        &self,
        number: &str,
        metadata: &Metadata,
        date: NaiveDate,
    ) -> Result<ComposedDocument> {
        let submission = Submission {
            number,
            metadata,
            date,
        };

        let mut pages = vec![self.compose_cover(&submission)?];
        pages.extend(self.compose_abstract(&submission)?);

        log::info!("Composed {} pages for {}", pages.len(), number);
        Ok(ComposedDocument { pages })
    }

    /// Compose only the cover page
    pub fn compose_cover_page(
        &self,
        number: &str,
        metadata: &Metadata,
        date: NaiveDate,
    ) -> Result<ComposedDocument> {
        let submission = Submission {
            number,
            metadata,
            date,
        };
        Ok(ComposedDocument {
            pages: vec![self.compose_cover(&submission)?],
        })
    }

    fn compose_cover(&self, submission: &Submission<'_>) -> Result<PageCanvas> {
        let opts = &self.options;
        let mut page = CoverPage {
            canvas: PageCanvas::new(opts.page_width_pt, opts.page_height_pt),
            cursor: Cursor::fixed(opts.page_height_pt - COVER_TITLE_DROP),
            lowest_text: opts.page_height_pt,
        };

        for (name, present, render) in COVER_SECTIONS {
            if present(submission) {
                log::trace!("Cover section: {}", name);
                render(self, submission, &mut page)?;
            }
        }

        Ok(page.canvas)
    }

    fn compose_abstract(&self, submission: &Submission<'_>) -> Result<Vec<PageCanvas>> {
        let opts = &self.options;
        let mut flow = PageFlow::new(
            opts.page_width_pt,
            opts.page_height_pt,
            opts.flow_top_pt,
            opts.flow_bottom_pt,
        );

        for (name, present, render) in ABSTRACT_SECTIONS {
            if present(submission) {
                log::trace!("Abstract section: {}", name);
                render(self, submission, &mut flow)?;
            }
        }

        Ok(flow.into_pages())
    }

    // =========================================================================
    // Drawing helpers
    // =========================================================================

    fn font(&self, style: FontStyle) -> &FontHandle {
        match style {
            FontStyle::Regular => &self.fonts.regular,
            FontStyle::Bold => &self.fonts.bold,
            FontStyle::Italic => &self.fonts.italic,
        }
    }

    /// Draw text at `x`, measuring it first so unsupported characters fail
    fn draw(
        &self,
        canvas: &mut PageCanvas,
        x: f32,
        y: f32,
        text: &str,
        style: FontStyle,
        size: f32,
        color: RgbColor,
    ) -> Result<f32> {
        let width = self.font(style).width_of(text, size)?;
        canvas.colored_text(x, y, text, style, size, color);
        Ok(width)
    }

    fn draw_centered(
        &self,
        canvas: &mut PageCanvas,
        y: f32,
        text: &str,
        style: FontStyle,
        size: f32,
        color: RgbColor,
    ) -> Result<()> {
        let width = self.font(style).width_of(text, size)?;
        let x = (canvas.width - width) / 2.0;
        canvas.colored_text(x, y, text, style, size, color);
        Ok(())
    }

    fn draw_placement(
        &self,
        canvas: &mut PageCanvas,
        y: f32,
        placement: &LinePlacement,
        style: FontStyle,
        size: f32,
    ) -> Result<()> {
        match placement {
            LinePlacement::Natural { text, x } => {
                self.draw(canvas, *x, y, text, style, size, RgbColor::BLACK)?;
            }
            LinePlacement::Justified { words, .. } => {
                for placed in words {
                    canvas.text(placed.x, y, placed.word.as_str(), style, size);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Cover page
    // =========================================================================

    fn cover_background(&self, _: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        if let Some(color) = self.options.cover_background {
            page.canvas.background(color);
        }
        Ok(())
    }

    /// Right-aligned stamp in the top-right corner
    fn cover_number(&self, submission: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        let width = self
            .font(FontStyle::Bold)
            .width_of(submission.number, PUB_NUMBER_SIZE)?;
        let x = page.canvas.width - width - PUB_NUMBER_INSET;
        let y = page.canvas.height - PUB_NUMBER_INSET;
        page.canvas
            .text(x, y, submission.number, FontStyle::Bold, PUB_NUMBER_SIZE);
        Ok(())
    }

    fn cover_title(&self, submission: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        let max_width = page.canvas.width - 2.0 * COVER_TEXT_INSET;
        let lines = wrap_by_width(
            &submission.metadata.title,
            self.font(FontStyle::Bold),
            COVER_TITLE_SIZE,
            max_width,
        )?;

        for line in &lines {
            let y = page.cursor.y();
            self.draw_centered(
                &mut page.canvas,
                y,
                &line.text(),
                FontStyle::Bold,
                COVER_TITLE_SIZE,
                RgbColor::MAROON,
            )?;
            page.lowest_text = y;
            let _ = page.cursor.advance(COVER_TITLE_LEADING);
        }

        let _ = page.cursor.advance(COVER_AUTHOR_GAP);
        Ok(())
    }

    fn cover_author(&self, submission: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        let max_width = page.canvas.width - 2.0 * COVER_TEXT_INSET;
        let lines = wrap_by_width(
            &submission.metadata.author,
            self.font(FontStyle::Regular),
            COVER_AUTHOR_SIZE,
            max_width,
        )?;

        for line in &lines {
            let y = page.cursor.y();
            self.draw_centered(
                &mut page.canvas,
                y,
                &line.text(),
                FontStyle::Regular,
                COVER_AUTHOR_SIZE,
                RgbColor::BLACK,
            )?;
            page.lowest_text = y;
            let _ = page.cursor.advance(COVER_AUTHOR_LEADING);
        }
        Ok(())
    }

    /// Emblem outlines; warns when the title or author block reaches down
    /// into the letterhead
    fn cover_emblem(&self, submission: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        let letterhead = &self.options.letterhead;
        let mut top = ADDRESS_TOP + ADDRESS_NAME_SIZE;

        for data in &letterhead.emblem_paths {
            let rings = path_rings(data, &letterhead.emblem_transform)?;
            top = rings
                .iter()
                .flatten()
                .map(|p| p.y)
                .fold(top, f32::max);
            page.canvas.fill(rings, RgbColor::BLACK);
        }

        if page.lowest_text < top {
            log::warn!(
                "Cover text for {} reaches y={:.1}, below the letterhead top at y={:.1}",
                submission.number,
                page.lowest_text,
                top
            );
        }
        Ok(())
    }

    fn cover_address(&self, _: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        let letterhead = &self.options.letterhead;
        let mut y = ADDRESS_TOP;

        self.draw_centered(
            &mut page.canvas,
            y,
            &letterhead.name,
            FontStyle::Bold,
            ADDRESS_NAME_SIZE,
            RgbColor::BLACK,
        )?;

        for line in &letterhead.address_lines {
            y -= ADDRESS_LEADING;
            self.draw_centered(
                &mut page.canvas,
                y,
                line,
                FontStyle::Regular,
                ADDRESS_LINE_SIZE,
                RgbColor::BLACK,
            )?;
        }

        // The date hangs off the last address line
        page.cursor = Cursor::fixed(y - DATE_GAP);
        Ok(())
    }

    fn cover_date(&self, submission: &Submission<'_>, page: &mut CoverPage) -> Result<()> {
        let stamp = submission.date.format("%B %Y").to_string();
        let y = page.cursor.y();
        self.draw_centered(
            &mut page.canvas,
            y,
            &stamp,
            FontStyle::Italic,
            DATE_SIZE,
            RgbColor::BLACK,
        )
    }

    // =========================================================================
    // Abstract pages
    // =========================================================================

    /// Centered lines, each followed by `leading`
    fn centered_lines(
        &self,
        flow: &mut PageFlow,
        lines: &[Line],
        style: FontStyle,
        size: f32,
        leading: f32,
        color: RgbColor,
    ) -> Result<()> {
        for line in lines {
            let y = flow.y();
            self.draw_centered(flow.canvas(), y, &line.text(), style, size, color)?;
            let _ = flow.advance(leading);
        }
        Ok(())
    }

    /// Justified paragraph that may continue onto following pages
    fn paragraph(
        &self,
        flow: &mut PageFlow,
        lines: &[Line],
        style: FontStyle,
        leading: f32,
    ) -> Result<()> {
        let opts = &self.options;
        let placements = place_paragraph(
            lines,
            self.font(style),
            opts.body_size_pt,
            opts.margin_left_pt,
            opts.column_width(),
        )?;

        for placement in &placements {
            let y = flow.y();
            self.draw_placement(flow.canvas(), y, placement, style, opts.body_size_pt)?;
            let _ = flow.advance(leading);
        }
        Ok(())
    }

    /// Bold label followed by a justified paragraph.
    ///
    /// The whole block moves to a fresh page when it does not fit below the
    /// cursor; a block taller than a page keeps at least the label and its
    /// first line together.
    fn labelled_paragraph(
        &self,
        flow: &mut PageFlow,
        label: &str,
        lines: &[Line],
        style: FontStyle,
        leading: f32,
    ) -> Result<()> {
        let size = self.options.body_size_pt;
        let label_drop = size + LABEL_DROP_EXTRA;
        let full = size + LABEL_BLOCK_EXTRA + lines.len() as f32 * (size + BODY_LEADING_EXTRA);
        let keep = if full <= flow.cursor().capacity() {
            full
        } else {
            label_drop + leading
        };
        let _ = flow.reserve(keep);

        let y = flow.y();
        let x = self.options.margin_left_pt;
        self.draw(flow.canvas(), x, y, label, FontStyle::Bold, size, RgbColor::BLACK)?;
        let _ = flow.advance(label_drop);

        self.paragraph(flow, lines, style, leading)
    }

    fn abstract_title(&self, submission: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        let lines = wrap_by_width(
            &submission.metadata.title,
            self.font(FontStyle::Bold),
            TITLE_SIZE,
            self.options.column_width(),
        )?;
        self.centered_lines(
            flow,
            &lines,
            FontStyle::Bold,
            TITLE_SIZE,
            TITLE_LEADING,
            RgbColor::BLACK,
        )?;
        let _ = flow.advance(TITLE_GAP);
        Ok(())
    }

    fn abstract_author(&self, submission: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        let lines = wrap_by_width(
            &submission.metadata.author,
            self.font(FontStyle::Regular),
            AUTHOR_SIZE,
            self.options.column_width(),
        )?;
        self.centered_lines(
            flow,
            &lines,
            FontStyle::Regular,
            AUTHOR_SIZE,
            AUTHOR_LEADING,
            RgbColor::BLACK,
        )?;
        let _ = flow.advance(AUTHOR_GAP);
        Ok(())
    }

    fn abstract_email(&self, submission: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        let text = format!("{}{}", EMAIL_PREFIX, submission.metadata.email.trim());
        let lines = wrap_by_width(
            &text,
            self.font(FontStyle::Regular),
            EMAIL_SIZE,
            self.options.column_width(),
        )?;
        self.centered_lines(
            flow,
            &lines,
            FontStyle::Regular,
            EMAIL_SIZE,
            EMAIL_LEADING,
            RgbColor::BLUE,
        )?;
        let _ = flow.advance(EMAIL_GAP);
        Ok(())
    }

    fn abstract_heading(&self, _: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        // Keep the heading with the first body line
        let _ = flow.reserve(HEADING_GAP + self.options.body_size_pt);
        let y = flow.y();
        self.draw_centered(
            flow.canvas(),
            y,
            HEADING_TEXT,
            FontStyle::Bold,
            HEADING_SIZE,
            RgbColor::BLACK,
        )?;
        let _ = flow.advance(HEADING_GAP);
        Ok(())
    }

    fn abstract_body(&self, submission: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        let lines = wrap_by_approx_chars(
            &submission.metadata.abstract_text,
            self.options.body_wrap_chars,
        );
        let leading = self.options.body_size_pt + BODY_LEADING_EXTRA;
        self.paragraph(flow, &lines, FontStyle::Regular, leading)?;
        let _ = flow.advance(ABSTRACT_GAP);
        Ok(())
    }

    fn abstract_keywords(&self, submission: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        let lines = wrap_by_approx_chars(
            &submission.metadata.keywords,
            self.options.body_wrap_chars,
        );
        let leading = self.options.body_size_pt + KEYWORD_LEADING_EXTRA;
        self.labelled_paragraph(flow, KEYWORDS_LABEL, &lines, FontStyle::Regular, leading)?;
        let _ = flow.advance(KEYWORDS_GAP);
        Ok(())
    }

    fn abstract_jel_code(&self, submission: &Submission<'_>, flow: &mut PageFlow) -> Result<()> {
        let opts = &self.options;
        let size = opts.body_size_pt;
        let value_x = opts.margin_left_pt + JEL_VALUE_OFFSET;
        let lines = wrap_by_width(
            submission.metadata.jel_code.trim(),
            self.font(FontStyle::Regular),
            size,
            opts.text_right_pt - value_x,
        )?;
        let leading = size + KEYWORD_LEADING_EXTRA;

        let full = JEL_BLOCK_HEIGHT + lines.len().saturating_sub(1) as f32 * leading;
        let _ = flow.reserve(full.min(flow.cursor().capacity()));

        let y = flow.y();
        self.draw(
            flow.canvas(),
            opts.margin_left_pt,
            y,
            JEL_LABEL,
            FontStyle::Bold,
            size,
            RgbColor::BLACK,
        )?;

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                let _ = flow.advance(leading);
            }
            let y = flow.y();
            self.draw(
                flow.canvas(),
                value_x,
                y,
                &line.text(),
                FontStyle::Regular,
                size,
                RgbColor::BLACK,
            )?;
        }

        let _ = flow.advance(JEL_GAP);
        Ok(())
    }

    fn abstract_acknowledgement(
        &self,
        submission: &Submission<'_>,
        flow: &mut PageFlow,
    ) -> Result<()> {
        let lines = wrap_by_approx_chars(
            &submission.metadata.acknowledgement,
            self.options.body_wrap_chars,
        );
        let leading = self.options.body_size_pt + BODY_LEADING_EXTRA;
        self.labelled_paragraph(
            flow,
            ACKNOWLEDGEMENT_LABEL,
            &lines,
            FontStyle::Italic,
            leading,
        )?;
        let _ = flow.advance(ACKNOWLEDGEMENT_GAP);
        Ok(())
    }
}

/// Compose a submission on the blocking pool, returning the serialized
/// document and its page count
pub async fn compose_pdf(
    composer: &Composer,
    number: &str,
    metadata: &Metadata,
    date: NaiveDate,
) -> Result<(Vec<u8>, usize)> {
    let composer = composer.clone();
    let number = number.to_string();
    let metadata = metadata.clone();

    // Layout is CPU-bound, spawn blocking
    let composed = tokio::task::spawn_blocking(move || {
        let document = composer.compose(&number, &metadata, date)?;
        let title = document_title(&number, &metadata);
        Ok::<_, crate::types::ComposeError>((document.to_pdf_bytes(&title), document.page_count()))
    })
    .await??;

    Ok(composed)
}

/// Compose a submission and write the generated pages to `output_path`
pub async fn generate_pdf(
    composer: &Composer,
    number: &str,
    metadata: &Metadata,
    date: NaiveDate,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let output_path = output_path.as_ref().to_owned();
    let (bytes, pages) = compose_pdf(composer, number, metadata, date).await?;

    tokio::fs::write(&output_path, bytes).await?;

    log::info!("Wrote {} generated pages to {}", pages, output_path.display());
    Ok(pages)
}

/// Title stored in the PDF info dictionary
pub fn document_title(number: &str, metadata: &Metadata) -> String {
    if metadata.title.trim().is_empty() {
        number.to_string()
    } else {
        format!("{} {}", number, metadata.title.trim())
    }
}
