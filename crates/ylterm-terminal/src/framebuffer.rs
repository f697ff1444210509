//! Character-cell drawing surface
//!
//! Implements [`DrawingSurface`] on top of a 2D grid of cells so the engine can
//! be hosted by a text terminal (or inspected by tests). Pixel coordinates are
//! mapped onto cells through a virtual [`CellFont`].

use crate::surface::{DrawingSurface, Rect, Shade, TextMeasurement, Viewport};
use std::collections::BTreeSet;
use tracing::warn;

/// Upper bound on rows the surface will grow to. Drawing below it is dropped.
pub const MAX_ROWS: usize = 100_000;

/// A single cell of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The glyph in this cell
    pub c: char,

    /// Glyph colour
    pub fg: Shade,

    /// Background colour
    pub bg: Shade,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            c: ' ',
            fg: Shade::Ink,
            bg: Shade::Paper,
        }
    }
}

impl Cell {
    /// Whether the cell is covered by an ink block (the cursor)
    pub fn is_block(&self) -> bool {
        self.bg == Shade::Ink
    }
}

/// Virtual pixel geometry of one cell.
///
/// A row is `ascent + descent + 1` pixels tall, which is exactly the cursor
/// height the engine derives from these numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFont {
    pub cell_width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for CellFont {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            ascent: 10.0,
            descent: 3.0,
        }
    }
}

impl CellFont {
    /// Height of one row in pixels
    pub fn pitch(&self) -> f32 {
        self.ascent + self.descent + 1.0
    }
}

/// Counters for drawing operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub text_draws: usize,
    pub rect_fills: usize,
    pub rect_clears: usize,

    /// Clears that covered every cell of the surface
    pub full_clears: usize,
}

/// Grid of cells with a fixed width that grows downward on demand
#[derive(Debug, Clone)]
pub struct CellSurface {
    /// Width in cells
    width: u16,

    /// Height of the visible window in cells
    viewport_rows: u16,

    /// Virtual font
    font: CellFont,

    /// Rows of cells, top to bottom
    rows: Vec<Vec<Cell>>,

    /// Index of the first visible row
    viewport_top: usize,

    /// Rows touched since the last flush
    dirty: BTreeSet<usize>,

    /// Whether the viewport moved since the last flush
    viewport_changed: bool,

    /// Set once drawing has been dropped at `MAX_ROWS`
    full: bool,

    stats: SurfaceStats,
}

impl CellSurface {
    /// Create a surface `width` cells wide with a `viewport_rows` tall window
    pub fn new(width: u16, viewport_rows: u16, font: CellFont) -> Self {
        let rows = vec![vec![Cell::default(); width as usize]; viewport_rows as usize];

        Self {
            width,
            viewport_rows,
            font,
            rows,
            viewport_top: 0,
            dirty: BTreeSet::new(),
            viewport_changed: true,
            full: false,
            stats: SurfaceStats::default(),
        }
    }

    /// Width in cells
    pub fn columns(&self) -> u16 {
        self.width
    }

    /// Height of the visible window in cells
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Number of rows allocated so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first visible row
    pub fn viewport_top_row(&self) -> usize {
        self.viewport_top
    }

    /// The virtual font
    pub fn font(&self) -> CellFont {
        self.font
    }

    /// Drawing counters
    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    /// Get cell at position
    pub fn cell_at(&self, x: u16, y: usize) -> Option<&Cell> {
        if x >= self.width {
            return None;
        }

        self.rows.get(y).and_then(|row| row.get(x as usize))
    }

    /// Text of one row with trailing blanks removed
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.iter().map(|cell| cell.c).collect::<String>())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default()
    }

    /// Text of every row, without the trailing run of blank rows
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.rows.len()).map(|y| self.row_text(y)).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Positions of all cells covered by an ink block
    pub fn block_cells(&self) -> Vec<(u16, usize)> {
        let mut found = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_block() {
                    found.push((x as u16, y));
                }
            }
        }
        found
    }

    /// Drain the set of rows changed since the last call
    pub fn take_dirty(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    /// Returns true once after every viewport move
    pub fn take_viewport_changed(&mut self) -> bool {
        std::mem::replace(&mut self.viewport_changed, false)
    }

    /// Whether the surface hit `MAX_ROWS` and started dropping output
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Rows currently inside the viewport
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        self.viewport_top..self.viewport_top + self.viewport_rows as usize
    }

    fn ensure_row(&mut self, y: usize) -> bool {
        if y >= MAX_ROWS {
            if !self.full {
                warn!(row = y, max = MAX_ROWS, "Cell surface is full, dropping output");
                self.full = true;
            }
            return false;
        }
        while self.rows.len() <= y {
            self.rows.push(vec![Cell::default(); self.width as usize]);
        }
        true
    }

    fn row_at_baseline(&self, baseline: f32) -> Option<usize> {
        let row = ((baseline - self.font.ascent) / self.font.pitch()).round();
        (row >= 0.0 && row.is_finite()).then_some(row as usize)
    }

    /// Cells whose centre lies inside `rect`, clipped to the surface width
    fn covered(&self, rect: Rect) -> Vec<(usize, usize)> {
        let cw = self.font.cell_width;
        let pitch = self.font.pitch();
        if !(rect.width > 0.0 && rect.height > 0.0) || cw <= 0.0 {
            return Vec::new();
        }

        let first_col = (rect.x / cw - 0.5).floor().max(0.0) as usize;
        let last_col =
            (((rect.x + rect.width) / cw).ceil().max(0.0) as usize).min(self.width as usize);
        let first_row = (rect.y / pitch - 0.5).floor().max(0.0) as usize;
        let last_row = (((rect.y + rect.height) / pitch).ceil().max(0.0) as usize).min(MAX_ROWS);

        let mut cells = Vec::new();
        for y in first_row..last_row {
            let cy = (y as f32 + 0.5) * pitch;
            for x in first_col..last_col {
                let cx = (x as f32 + 0.5) * cw;
                if rect.contains(cx, cy) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }
}

impl DrawingSurface for CellSurface {
    fn width(&self) -> f32 {
        self.width as f32 * self.font.cell_width
    }

    fn height(&self) -> f32 {
        self.rows.len().max(self.viewport_rows as usize) as f32 * self.font.pitch()
    }

    fn measure_text(&self, text: &str) -> Option<TextMeasurement> {
        if self.font.cell_width <= 0.0 {
            return None;
        }

        Some(TextMeasurement {
            width: text.chars().count() as f32 * self.font.cell_width,
            ascent: self.font.ascent,
            descent: self.font.descent,
        })
    }

    fn fill_text(&mut self, text: &str, x: f32, baseline: f32, shade: Shade) {
        self.stats.text_draws += 1;

        let Some(y) = self.row_at_baseline(baseline) else {
            return;
        };
        if text.is_empty() || !self.ensure_row(y) {
            return;
        }

        let start = (x / self.font.cell_width).round() as i64;
        let width = self.width as i64;
        let row = &mut self.rows[y];
        let mut touched = false;
        for (i, c) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 {
                continue;
            }
            if col >= width {
                break;
            }
            let cell = &mut row[col as usize];
            cell.c = c;
            cell.fg = shade;
            touched = true;
        }

        if touched {
            self.dirty.insert(y);
        }
    }

    fn fill_rect(&mut self, rect: Rect, shade: Shade) {
        self.stats.rect_fills += 1;

        for (x, y) in self.covered(rect) {
            if !self.ensure_row(y) {
                break;
            }
            let cell = &mut self.rows[y][x];
            cell.c = ' ';
            cell.bg = shade;
            self.dirty.insert(y);
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.stats.rect_clears += 1;

        let cells = self.covered(rect);
        let total = self.rows.len() * self.width as usize;
        let mut cleared = 0;
        for (x, y) in cells {
            if y >= self.rows.len() {
                continue;
            }
            self.rows[y][x] = Cell::default();
            self.dirty.insert(y);
            cleared += 1;
        }

        if total > 0 && cleared == total {
            self.stats.full_clears += 1;
        }
    }

    fn viewport(&self) -> Viewport {
        let pitch = self.font.pitch();
        Viewport {
            top: self.viewport_top as f32 * pitch,
            height: self.viewport_rows as f32 * pitch,
        }
    }

    fn scroll_to(&mut self, top: f32) {
        let row = (top.max(0.0) / self.font.pitch() + 1e-3).floor() as usize;
        if row != self.viewport_top {
            self.viewport_top = row;
            self.viewport_changed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> CellSurface {
        CellSurface::new(10, 3, CellFont::default())
    }

    #[test]
    fn test_drawing_past_row_cap_is_dropped_and_flagged() {
        let mut s = surface();
        let font = s.font();
        let baseline = font.ascent + MAX_ROWS as f32 * font.pitch();

        s.fill_text("lost", 0.0, baseline, Shade::Ink);
        s.fill_rect(Rect::new(0.0, baseline - font.ascent, 8.0, 14.0), Shade::Ink);

        assert!(s.is_full());
        assert_eq!(s.row_count(), 3);
        assert!(s.take_dirty().is_empty());
    }

    #[test]
    fn test_fill_text_lands_on_baseline_row() {
        let mut s = surface();
        s.fill_text("abc", 16.0, 10.0 + 14.0, Shade::Ink);

        assert_eq!(s.row_text(1), "  abc");
        assert_eq!(s.cell_at(2, 1).unwrap().c, 'a');
        assert_eq!(s.take_dirty(), vec![1]);
    }

    #[test]
    fn test_fill_text_clips_at_right_edge() {
        let mut s = surface();
        s.fill_text("0123456789abc", 0.0, 10.0, Shade::Ink);
        assert_eq!(s.row_text(0), "0123456789");
    }

    #[test]
    fn test_fill_text_grows_rows() {
        let mut s = surface();
        s.fill_text("x", 0.0, 10.0 + 14.0 * 5.0, Shade::Ink);
        assert_eq!(s.row_count(), 6);
        assert_eq!(s.row_text(5), "x");
    }

    #[test]
    fn test_slop_does_not_touch_neighbours() {
        let mut s = surface();
        s.fill_text("abc", 0.0, 10.0, Shade::Ink);
        // Cell 1 with one pixel of slop either side
        s.clear_rect(Rect::new(8.0 - 1.0, 0.0, 8.0 + 2.0, 28.0));
        assert_eq!(s.row_text(0), "a c");
    }

    #[test]
    fn test_block_and_inverse_glyph() {
        let mut s = surface();
        s.fill_text("ab", 0.0, 10.0, Shade::Ink);
        s.fill_rect(Rect::new(8.0, 0.0, 8.0, 14.0), Shade::Ink);

        let cell = *s.cell_at(1, 0).unwrap();
        assert!(cell.is_block());
        assert_eq!(cell.c, ' ');

        s.fill_text("b", 8.0, 10.0, Shade::Paper);
        let cell = *s.cell_at(1, 0).unwrap();
        assert_eq!(cell.c, 'b');
        assert_eq!(cell.fg, Shade::Paper);
        assert_eq!(s.block_cells(), vec![(1, 0)]);
    }

    #[test]
    fn test_full_clear_is_counted() {
        let mut s = surface();
        s.fill_text("abc", 0.0, 10.0, Shade::Ink);
        s.clear_rect(Rect::new(0.0, 0.0, 8.0, 14.0));
        assert_eq!(s.stats().full_clears, 0);

        let (w, h) = (s.width(), s.height());
        s.clear_rect(Rect::new(0.0, 0.0, w, h));
        assert_eq!(s.stats().full_clears, 1);
        assert!(s.text_lines().is_empty());
    }

    #[test]
    fn test_scroll_to_snaps_to_rows() {
        let mut s = surface();
        assert!(s.take_viewport_changed());

        s.scroll_to(14.0 * 4.0);
        assert_eq!(s.viewport_top_row(), 4);
        assert_eq!(s.visible_rows(), 4..7);
        assert!(s.take_viewport_changed());
        assert!(!s.take_viewport_changed());

        s.scroll_to(-20.0);
        assert_eq!(s.viewport_top_row(), 0);
    }

    #[test]
    fn test_out_of_bounds_cells() {
        let s = surface();
        assert!(s.cell_at(10, 0).is_none());
        assert!(s.cell_at(0, 3).is_none());
        assert_eq!(s.row_text(99), "");
    }
}
