//! Vertical page flow
//!
//! The cursor only moves down the page. When content would cross the bottom
//! margin the cursor jumps back to the top margin and a page break is
//! reported; the flow appends the new page the next time something is drawn.

use crate::canvas::PageCanvas;

/// Outcome of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Advance {
    SamePage,
    NewPage,
}

/// Baseline position on the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f32,
    top: f32,
    bottom: f32,
}

impl Cursor {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self {
            y: top,
            top,
            bottom,
        }
    }

    /// Cursor for single-page layouts that never break
    pub fn fixed(start: f32) -> Self {
        Self {
            y: start,
            top: start,
            bottom: f32::NEG_INFINITY,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Space left above the bottom margin
    pub fn remaining(&self) -> f32 {
        self.y - self.bottom
    }

    /// Height available on a fresh page
    pub fn capacity(&self) -> f32 {
        self.top - self.bottom
    }

    /// Move down by `height`, breaking the page if the cursor lands below the
    /// bottom margin. With `keep` set the move is a reservation: the cursor
    /// stays put and only breaks if `height` does not fit.
    fn step(&mut self, height: f32, keep: bool) -> Advance {
        let target = self.y - height;
        if target < self.bottom {
            self.y = self.top;
            Advance::NewPage
        } else {
            if !keep {
                self.y = target;
            }
            Advance::SamePage
        }
    }

    /// Move down after drawing a block of `height`
    pub fn advance(&mut self, height: f32) -> Advance {
        self.step(height, false)
    }

    /// Ensure a block of `height` fits below the cursor, breaking first if not
    pub fn reserve(&mut self, height: f32) -> Advance {
        self.step(height, true)
    }
}

/// Pages produced by a flowing layout
#[derive(Debug, Clone)]
pub struct PageFlow {
    width: f32,
    height: f32,
    cursor: Cursor,
    pages: Vec<PageCanvas>,
    pending_page: bool,
}

impl PageFlow {
    /// Start a flow whose first page is allocated immediately
    pub fn new(width: f32, height: f32, top: f32, bottom: f32) -> Self {
        Self {
            width,
            height,
            cursor: Cursor::new(top.min(height), bottom),
            pages: vec![PageCanvas::new(width, height)],
            pending_page: false,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn y(&self) -> f32 {
        self.cursor.y()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn advance(&mut self, height: f32) -> Advance {
        let advance = self.cursor.advance(height);
        self.note(advance);
        advance
    }

    pub fn reserve(&mut self, height: f32) -> Advance {
        let advance = self.cursor.reserve(height);
        self.note(advance);
        advance
    }

    fn note(&mut self, advance: Advance) {
        if advance == Advance::NewPage {
            log::debug!(
                "Page break after page {}, cursor reset to {}",
                self.pages.len(),
                self.cursor.y()
            );
            self.pending_page = true;
        }
    }

    /// Surface to draw on at the cursor, allocating a pending page first
    pub fn canvas(&mut self) -> &mut PageCanvas {
        if self.pending_page {
            self.pages.push(PageCanvas::new(self.width, self.height));
            self.pending_page = false;
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn into_pages(self) -> Vec<PageCanvas> {
        self.pages
    }
}

// =============================================================================
// Tests
// =============================================================================
