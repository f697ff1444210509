//! Line editor engine for ylterm
//!
//! Emulates a minimal terminal on a pixel surface: a prompt, an editable line
//! with a movable cursor, multi-line continuation and history recall, all
//! redrawn through small dirty rectangles instead of full repaints.

pub mod buffer;
pub mod command;
pub mod config;
pub mod continuation;
pub mod editor;
pub mod evaluator;
pub mod framebuffer;
pub mod history;
pub mod keymap;
pub mod metrics;
pub mod parser;
pub mod renderer;
pub mod repl;
pub mod surface;

pub use buffer::LineBuffer;
pub use command::EditorCommand;
pub use config::ReplConfig;
pub use continuation::{ContinuationState, ContinuationTracker, PendingExpression, Submission};
pub use editor::Editor;
pub use evaluator::Evaluator;
pub use framebuffer::{Cell, CellFont, CellSurface, SurfaceStats};
pub use history::{HistoryNavigator, HistoryStore, MemoryHistory};
pub use keymap::map_key;
pub use metrics::{CursorGeometry, TextMetrics};
pub use parser::{printable, Parser};
pub use renderer::Renderer;
pub use repl::{Outcome, Repl};
pub use surface::{DrawingSurface, Rect, Shade, TextMeasurement, Viewport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Drawing surface is missing or has no area ({width}x{height})")]
    MissingSurface { width: f32, height: f32 },

    #[error("Surface cannot measure glyph metrics for sample {0:?}")]
    Unmeasurable(String),

    #[error("Metrics sample text is empty")]
    EmptySample,
}
