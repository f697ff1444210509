//! The evaluator subsystem as seen by the editor

use std::path::Path;

/// Everything the editor needs from the language behind the prompt
pub trait Evaluator {
    /// Evaluate a complete command. The result is newline-joined; each
    /// segment is echoed as one terminal line. Failures are ordinary output.
    fn evaluate(&mut self, source: &str, continued: bool) -> String;

    /// Signed count of unmatched openers over closers in `source`.
    /// Zero means the text is complete on its own.
    fn paren_balance(&self, source: &str) -> i32;

    /// Load a file of definitions. Empty on success, an error message otherwise.
    fn load_predef(&mut self, path: &Path) -> String;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, source: &str, continued: bool) -> String {
        (**self).evaluate(source, continued)
    }

    fn paren_balance(&self, source: &str) -> i32 {
        (**self).paren_balance(source)
    }

    fn load_predef(&mut self, path: &Path) -> String {
        (**self).load_predef(path)
    }
}
