//! Dirty-rectangle renderer
//!
//! The only component that touches the drawing surface. All positions come in
//! as `(column, baseline)` pairs and are converted to pixels with the measured
//! [`TextMetrics`].

use crate::{
    metrics::{CursorGeometry, TextMetrics},
    surface::{DrawingSurface, Rect, Shade},
    TerminalError,
};
use tracing::info;

/// Horizontal slop applied when clearing, to catch anti-aliasing residue
const CLEAR_SLOP: f32 = 1.0;

/// Paints text, clears bands and draws the cursor block
pub struct Renderer<S> {
    surface: S,
    metrics: TextMetrics,
    cursor: CursorGeometry,
}

impl<S: DrawingSurface> Renderer<S> {
    /// Take ownership of `surface` and measure its font with `sample`
    pub fn new(surface: S, sample: &str) -> Result<Self, TerminalError> {
        let (width, height) = (surface.width(), surface.height());
        let sized = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !sized {
            return Err(TerminalError::MissingSurface { width, height });
        }

        let metrics = TextMetrics::measure(&surface, sample)?;
        info!(
            char_width = metrics.char_width,
            char_height = metrics.char_height,
            line_spacing = metrics.line_spacing,
            "Measured text metrics"
        );

        Ok(Self {
            surface,
            metrics,
            cursor: metrics.cursor(),
        })
    }

    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    pub fn cursor(&self) -> CursorGeometry {
        self.cursor
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Draw `text` starting at `column`
    pub fn paint_text(&mut self, text: &str, column: usize, baseline: f32, shade: Shade) {
        let x = self.metrics.column_x(column);
        self.surface.fill_text(text, x, baseline, shade);
    }

    /// Clear an explicit rectangle starting at `column` and the top of the
    /// cursor band on `baseline`.
    pub fn clear_region(&mut self, column: usize, baseline: f32, width: f32, height: f32) {
        let x = self.metrics.column_x(column) - CLEAR_SLOP;
        let y = self.cursor.top(baseline);
        self.surface.clear_rect(Rect::new(x, y, width + CLEAR_SLOP, height));
    }

    /// Clear from `column` to the right edge, double band height so trailing
    /// descenders never survive.
    pub fn clear_to_edge(&mut self, column: usize, baseline: f32) {
        let width = self.surface.width();
        self.clear_region(column, baseline, width, self.cursor.height * 2.0);
    }

    /// Clear the whole band of `baseline`, prompt included
    pub fn clear_band(&mut self, baseline: f32) {
        let width = self.surface.width();
        let y = self.cursor.top(baseline);
        self.surface
            .clear_rect(Rect::new(0.0, y, width, self.cursor.height * 2.0));
    }

    /// Wipe the entire surface
    pub fn clear_all(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.clear_rect(Rect::new(0.0, 0.0, width, height));
    }

    /// Fill the cursor block at `column`; `under` is redrawn in paper on top
    pub fn paint_cursor(&mut self, column: usize, baseline: f32, under: Option<char>) {
        let rect = Rect::new(
            self.metrics.column_x(column),
            self.cursor.top(baseline),
            self.cursor.width,
            self.cursor.height,
        );
        self.surface.fill_rect(rect, Shade::Ink);

        if let Some(c) = under {
            self.paint_glyph(c, column, baseline, Shade::Paper);
        }
    }

    /// Erase the cursor block at `column`; `under` is redrawn in ink
    pub fn clear_cursor(&mut self, column: usize, baseline: f32, under: Option<char>) {
        let rect = Rect::new(
            self.metrics.column_x(column) - CLEAR_SLOP,
            self.cursor.top(baseline),
            self.cursor.width + 2.0 * CLEAR_SLOP,
            self.cursor.height * 2.0,
        );
        self.surface.clear_rect(rect);

        if let Some(c) = under {
            self.paint_glyph(c, column, baseline, Shade::Ink);
        }
    }

    /// Scroll the viewport just enough to show the band of `baseline`
    pub fn focus(&mut self, baseline: f32) {
        let viewport = self.surface.viewport();
        let top = self.cursor.top(baseline);
        let bottom = top + self.cursor.height;

        if bottom > viewport.top + viewport.height {
            self.surface.scroll_to((bottom - viewport.height).max(0.0));
        } else if top < viewport.top {
            self.surface.scroll_to(top.max(0.0));
        }
    }

    fn paint_glyph(&mut self, c: char, column: usize, baseline: f32, shade: Shade) {
        let mut buf = [0u8; 4];
        self.paint_text(c.encode_utf8(&mut buf), column, baseline, shade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{CellFont, CellSurface};

    fn renderer() -> Renderer<CellSurface> {
        Renderer::new(CellSurface::new(20, 4, CellFont::default()), "g{^Mwy").unwrap()
    }

    #[test]
    fn test_zero_sized_surface_is_rejected() {
        let err = Renderer::new(CellSurface::new(0, 4, CellFont::default()), "g").err();
        assert!(matches!(err, Some(TerminalError::MissingSurface { .. })));
    }

    #[test]
    fn test_cursor_inverts_glyph_and_restores_it() {
        let mut r = renderer();
        r.paint_text("abc", 0, 10.0, Shade::Ink);

        r.paint_cursor(1, 10.0, Some('b'));
        let cell = *r.surface().cell_at(1, 0).unwrap();
        assert!(cell.is_block());
        assert_eq!((cell.c, cell.fg), ('b', Shade::Paper));
        assert_eq!(r.surface().row_text(0), "abc");

        r.clear_cursor(1, 10.0, Some('b'));
        let cell = *r.surface().cell_at(1, 0).unwrap();
        assert!(!cell.is_block());
        assert_eq!((cell.c, cell.fg), ('b', Shade::Ink));
        assert!(r.surface().block_cells().is_empty());
    }

    #[test]
    fn test_clear_to_edge_keeps_left_part() {
        let mut r = renderer();
        r.paint_text("yl> hello", 0, 10.0, Shade::Ink);
        r.clear_to_edge(6, 10.0);
        assert_eq!(r.surface().row_text(0), "yl> he");
    }

    #[test]
    fn test_clear_band_wipes_prompt_too() {
        let mut r = renderer();
        r.paint_text("yl> hello", 0, 24.0, Shade::Ink);
        r.paint_text("above", 0, 10.0, Shade::Ink);
        r.clear_band(24.0);
        assert_eq!(r.surface().text_lines(), vec!["above".to_string()]);
    }

    #[test]
    fn test_focus_scrolls_down_then_up() {
        let mut r = renderer();
        // Row 6 is below a four-row viewport
        r.focus(10.0 + 14.0 * 6.0);
        assert_eq!(r.surface().viewport_top_row(), 3);

        // Already visible: nothing moves
        r.focus(10.0 + 14.0 * 4.0);
        assert_eq!(r.surface().viewport_top_row(), 3);

        r.focus(10.0);
        assert_eq!(r.surface().viewport_top_row(), 0);
    }
}
