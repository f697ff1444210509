//! REPL configuration

use crate::metrics::DEFAULT_SAMPLE;
use std::path::PathBuf;

/// Everything the REPL needs to know besides its collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct ReplConfig {
    /// Prompt of a fresh command
    pub prompt: String,

    /// Prompt of continuation lines
    pub continuation_prompt: String,

    /// Text measured once to derive the cell geometry
    pub metrics_sample: String,

    /// Lines echoed at start-up
    pub banner: Vec<String>,

    /// File handed to the evaluator's predef loader at start-up
    pub predef_path: Option<PathBuf>,

    /// Inserted by the indent command
    pub indent: String,

    /// Command that clears the screen instead of being evaluated
    pub clear_command: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "yl> ".to_string(),
            continuation_prompt: "... ".to_string(),
            metrics_sample: DEFAULT_SAMPLE.to_string(),
            banner: vec![
                "yatsukha's lisp".to_string(),
                "use 'help' to get started".to_string(),
                "press shift + enter (or alt + enter) to break an expression into multiple lines"
                    .to_string(),
                "use 'cls' to clear the screen".to_string(),
            ],
            predef_path: Some(PathBuf::from(".predef.yl")),
            indent: "  ".to_string(),
            clear_command: "cls".to_string(),
        }
    }
}

impl ReplConfig {
    /// Defaults without banner or predef, handy for embedding and tests
    pub fn quiet() -> Self {
        Self {
            banner: Vec::new(),
            predef_path: None,
            ..Self::default()
        }
    }
}
