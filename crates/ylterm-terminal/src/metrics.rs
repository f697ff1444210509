//! Fixed-pitch text metrics
//!
//! Everything the engine draws is positioned from three scalars measured once
//! at start-up: the average glyph advance, the ascent and the descent of a
//! sample string.

use crate::{surface::DrawingSurface, TerminalError};

/// Sample containing tall, hanging and wide glyphs
pub const DEFAULT_SAMPLE: &str = "g{^Mwy";

/// Monospace geometry, immutable after measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance of one cell
    pub char_width: f32,

    /// Ascent above the baseline
    pub char_height: f32,

    /// Descent below the baseline plus one pixel of leading
    pub line_spacing: f32,
}

impl TextMetrics {
    /// Measure `sample` on `surface`.
    ///
    /// Fails when the sample is empty or the surface cannot produce usable
    /// glyph metrics; the engine cannot lay out anything without them.
    pub fn measure<S: DrawingSurface + ?Sized>(
        surface: &S,
        sample: &str,
    ) -> Result<Self, TerminalError> {
        let len = sample.chars().count();
        if len == 0 {
            return Err(TerminalError::EmptySample);
        }

        let measured = surface
            .measure_text(sample)
            .ok_or_else(|| TerminalError::Unmeasurable(sample.to_string()))?;

        let metrics = Self {
            char_width: measured.width / len as f32,
            char_height: measured.ascent,
            line_spacing: measured.descent + 1.0,
        };

        let usable = metrics.char_width.is_finite()
            && metrics.char_width > 0.0
            && metrics.char_height.is_finite()
            && metrics.char_height >= 0.0
            && metrics.line_spacing.is_finite()
            && metrics.line_spacing > 0.0;
        if !usable {
            return Err(TerminalError::Unmeasurable(sample.to_string()));
        }

        Ok(metrics)
    }

    /// Left edge of `column`
    pub fn column_x(&self, column: usize) -> f32 {
        column as f32 * self.char_width
    }

    /// Cursor block dimensions derived from these metrics
    pub fn cursor(&self) -> CursorGeometry {
        CursorGeometry {
            width: self.char_width,
            negative_height: -self.char_height,
            positive_height: self.line_spacing,
            height: self.char_height + self.line_spacing,
        }
    }
}

/// Extent of the cursor block relative to a text baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorGeometry {
    pub width: f32,

    /// Offset from the baseline to the top of the block (negative)
    pub negative_height: f32,

    /// Offset from the baseline to the bottom of the block
    pub positive_height: f32,

    /// Total paintable height, also the distance between consecutive baselines
    pub height: f32,
}

impl CursorGeometry {
    /// Top edge of the band whose baseline is `baseline`
    pub fn top(&self, baseline: f32) -> f32 {
        baseline + self.negative_height
    }
}
