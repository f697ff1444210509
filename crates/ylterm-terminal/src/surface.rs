//! Drawing surface capability
//!
//! The engine never reaches for a global canvas. Hosts hand it something that
//! implements [`DrawingSurface`] and the [`Renderer`](crate::Renderer) keeps
//! exclusive ownership of it for as long as the engine lives.

/// Paint colour. Text is drawn in `Ink` on `Paper`; the cursor block is an
/// `Ink` fill with the glyph under it redrawn in `Paper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shade {
    #[default]
    Ink,
    Paper,
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a point lies inside the rectangle (right and bottom edges exclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// What a surface reports after measuring a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasurement {
    /// Advance width of the whole run
    pub width: f32,

    /// Tallest extent above the baseline
    pub ascent: f32,

    /// Deepest extent below the baseline
    pub descent: f32,
}

/// The visible window onto the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top: f32,
    pub height: f32,
}

/// A pixel surface the engine can draw monospace text onto.
///
/// `y` coordinates passed to [`fill_text`](DrawingSurface::fill_text) are text
/// baselines; rectangles are in plain top-left coordinates.
pub trait DrawingSurface {
    /// Width in pixels
    fn width(&self) -> f32;

    /// Height in pixels
    fn height(&self) -> f32;

    /// Measure `text` in the surface's font, or `None` if the surface cannot
    /// report glyph metrics.
    fn measure_text(&self, text: &str) -> Option<TextMeasurement>;

    /// Draw `text` left-aligned at `(x, baseline)`
    fn fill_text(&mut self, text: &str, x: f32, baseline: f32, shade: Shade);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, shade: Shade);

    /// Reset a rectangle to blank paper
    fn clear_rect(&mut self, rect: Rect);

    /// Current viewport
    fn viewport(&self) -> Viewport;

    /// Scroll the viewport so that its top edge sits at `top`
    fn scroll_to(&mut self, top: f32);
}
