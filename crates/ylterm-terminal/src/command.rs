//! Editor commands produced by key mappers

/// One editing intent, independent of how the key arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Type a printable character
    Insert(char),

    Backspace,

    /// Enter. `force_multiline` breaks the line even when balanced.
    Submit { force_multiline: bool },

    /// Move the cursor by a signed number of columns
    MoveCursor(isize),

    /// Older history entry
    HistoryPrev,

    /// Newer history entry
    HistoryNext,

    /// Wipe the current line back to its prompt
    Clear,

    JumpHome,

    JumpEnd,

    /// Insert the configured indentation
    Indent,
}
