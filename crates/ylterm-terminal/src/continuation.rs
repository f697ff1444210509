//! Multi-line command accumulation
//!
//! A logical command keeps growing across physical lines until its bracket
//! balance comes back to zero (and no explicit line break was requested).

/// Whether a logical command is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationState {
    /// Nothing pending; the primary prompt is shown
    Fresh,

    /// Lines are pending; the continuation prompt is shown
    Continuing,
}

/// Text committed to the current logical command but not yet submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingExpression {
    /// Previous physical lines, each terminated by `'\n'`
    pub accumulated: String,

    /// Running sum of per-line balances
    pub bracket_balance: i32,
}

impl PendingExpression {
    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty() && self.bracket_balance == 0
    }
}

/// What to do with the current line when Enter is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Break the line and keep accumulating
    Continue,

    /// The command is complete
    Evaluate,
}

/// A complete logical command ready for the evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub source: String,

    /// Whether the command spans more than one physical line
    pub continued: bool,
}

/// Two-state machine deciding between continuation and submission
#[derive(Debug, Clone)]
pub struct ContinuationTracker {
    pending: PendingExpression,
    prompt: String,
    continuation_prompt: String,
}

impl ContinuationTracker {
    pub fn new(prompt: &str, continuation_prompt: &str) -> Self {
        Self {
            pending: PendingExpression::default(),
            prompt: prompt.to_string(),
            continuation_prompt: continuation_prompt.to_string(),
        }
    }

    pub fn state(&self) -> ContinuationState {
        if self.pending.is_empty() {
            ContinuationState::Fresh
        } else {
            ContinuationState::Continuing
        }
    }

    pub fn pending(&self) -> &PendingExpression {
        &self.pending
    }

    /// Primary prompt
    pub fn primary_prompt(&self) -> &str {
        &self.prompt
    }

    /// Continuation prompt
    pub fn continuation_prompt(&self) -> &str {
        &self.continuation_prompt
    }

    /// The source the command would have if `line` were its last line
    pub fn preview(&self, line: &str) -> String {
        format!("{}{}", self.pending.accumulated, line)
    }

    /// Decide the fate of the current line given its own balance
    pub fn decide(&self, line_balance: i32, force_multiline: bool) -> SubmitDecision {
        if force_multiline || self.pending.bracket_balance.saturating_add(line_balance) != 0 {
            SubmitDecision::Continue
        } else {
            SubmitDecision::Evaluate
        }
    }

    /// Commit one physical line to the pending command.
    ///
    /// `line_balance` is the balance of `text` alone. When a line is broken
    /// mid-way, pass the balance of the committed head, not of the whole
    /// line: the carried tail is counted again when its own line is
    /// submitted, so counting it here too would leave the command waiting
    /// for closers that were already typed.
    pub fn push_line(&mut self, text: &str, line_balance: i32) {
        self.pending.accumulated.push_str(text);
        self.pending.accumulated.push('\n');
        self.pending.bracket_balance = self.pending.bracket_balance.saturating_add(line_balance);
    }

    /// Finish the command with its last line and return to `Fresh`
    pub fn finish(&mut self, line: &str) -> Submission {
        let pending = std::mem::take(&mut self.pending);
        Submission {
            continued: !pending.accumulated.is_empty(),
            source: pending.accumulated + line,
        }
    }

    /// Drop anything pending
    pub fn reset(&mut self) {
        self.pending = PendingExpression::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_line_evaluates() {
        let tracker = ContinuationTracker::new("yl> ", "... ");
        assert_eq!(tracker.state(), ContinuationState::Fresh);
        assert_eq!(tracker.decide(0, false), SubmitDecision::Evaluate);
        assert_eq!(tracker.decide(0, true), SubmitDecision::Continue);
        assert_eq!(tracker.decide(1, false), SubmitDecision::Continue);
    }

    #[test]
    fn test_continues_until_balance_returns_to_zero() {
        let mut tracker = ContinuationTracker::new("yl> ", "... ");

        // +2, -1, -1: only the third line closes the command
        tracker.push_line("(a (b", 2);
        assert_eq!(tracker.state(), ContinuationState::Continuing);
        assert_eq!(tracker.decide(-1, false), SubmitDecision::Continue);

        tracker.push_line("c)", -1);
        assert_eq!(tracker.state(), ContinuationState::Continuing);
        assert_eq!(tracker.decide(-1, false), SubmitDecision::Evaluate);

        let submission = tracker.finish(")");
        assert_eq!(submission.source, "(a (b\nc)\n)");
        assert!(submission.continued);
        assert_eq!(tracker.state(), ContinuationState::Fresh);
    }

    #[test]
    fn test_forced_break_with_zero_balance_stays_continuing() {
        let mut tracker = ContinuationTracker::new("yl> ", "... ");
        tracker.push_line("(f)", 0);
        assert_eq!(tracker.state(), ContinuationState::Continuing);
        assert_eq!(tracker.preview("x"), "(f)\nx");
    }

    #[test]
    fn test_single_line_finish_is_not_continued() {
        let mut tracker = ContinuationTracker::new("yl> ", "... ");
        let submission = tracker.finish("(+ 1 2)");
        assert_eq!(submission.source, "(+ 1 2)");
        assert!(!submission.continued);
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut tracker = ContinuationTracker::new("yl> ", "... ");
        tracker.push_line("(", 1);
        tracker.reset();
        assert_eq!(tracker.state(), ContinuationState::Fresh);
        assert!(tracker.pending().is_empty());
    }
}
