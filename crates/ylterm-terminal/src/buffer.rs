//! Text of the current physical line and the insertion point within it.
//!
//! The line always starts with its prompt. The prompt is part of the buffer so
//! that columns index straight into screen cells, but no operation can edit it.

/// The current physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    prompt_len: usize,
    column: usize,
}

impl LineBuffer {
    /// A bare line holding only `prompt`, cursor right after it
    pub fn new(prompt: &str) -> Self {
        let chars: Vec<char> = prompt.chars().collect();
        let prompt_len = chars.len();
        Self {
            chars,
            prompt_len,
            column: prompt_len,
        }
    }

    /// Cursor column, counted from the start of the prompt
    pub fn column(&self) -> usize {
        self.column
    }

    /// Length of the line including the prompt
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when the line holds nothing but its prompt
    pub fn is_empty(&self) -> bool {
        self.chars.len() == self.prompt_len
    }

    pub fn prompt_len(&self) -> usize {
        self.prompt_len
    }

    pub fn prompt(&self) -> String {
        self.chars[..self.prompt_len].iter().collect()
    }

    /// Whole line, prompt included
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The user's text, prompt stripped
    pub fn line(&self) -> String {
        self.chars[self.prompt_len..].iter().collect()
    }

    /// Text in `[from, to)`, clamped to the line
    pub fn slice(&self, from: usize, to: usize) -> String {
        let to = to.min(self.chars.len());
        let from = from.min(to);
        self.chars[from..to].iter().collect()
    }

    /// Text from `column` to the end of the line
    pub fn tail(&self, column: usize) -> String {
        self.slice(column, self.chars.len())
    }

    /// Character at `column`, if any
    pub fn char_at(&self, column: usize) -> Option<char> {
        self.chars.get(column).copied()
    }

    /// Character under the cursor, if any
    pub fn under_cursor(&self) -> Option<char> {
        self.char_at(self.column)
    }

    /// Splice `text` in at the cursor and move past it
    pub fn insert(&mut self, text: &str) {
        let before = self.chars.len();
        self.chars.splice(self.column..self.column, text.chars());
        self.column += self.chars.len() - before;
    }

    /// Remove the character left of the cursor. Never eats into the prompt.
    pub fn remove_before(&mut self) -> Option<char> {
        if self.column <= self.prompt_len {
            return None;
        }

        self.column -= 1;
        Some(self.chars.remove(self.column))
    }

    /// Clamp `column` into the editable range
    pub fn clamp(&self, column: isize) -> usize {
        column.clamp(self.prompt_len as isize, self.chars.len() as isize) as usize
    }

    /// Move the cursor by `offset`, clamped. Returns the new column.
    pub fn move_by(&mut self, offset: isize) -> usize {
        let target = (self.column as isize).saturating_add(offset);
        self.column = self.clamp(target);
        self.column
    }

    /// Drop the user's text, keeping the prompt
    pub fn reset(&mut self) {
        self.chars.truncate(self.prompt_len);
        self.column = self.prompt_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_line_has_cursor_after_prompt() {
        let buf = LineBuffer::new("yl> ");
        assert_eq!(buf.column(), 4);
        assert_eq!(buf.len(), 4);
        assert!(buf.is_empty());
        assert_eq!(buf.line(), "");
        assert_eq!(buf.prompt(), "yl> ");
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut buf = LineBuffer::new("> ");
        buf.insert("ac");
        buf.move_by(-1);
        buf.insert("b");
        assert_eq!(buf.text(), "> abc");
        assert_eq!(buf.column(), 4);
        assert_eq!(buf.under_cursor(), Some('c'));
    }

    #[test]
    fn test_remove_stops_at_prompt() {
        let mut buf = LineBuffer::new("> ");
        buf.insert("x");
        assert_eq!(buf.remove_before(), Some('x'));
        assert_eq!(buf.remove_before(), None);
        assert_eq!(buf.text(), "> ");
    }

    #[test]
    fn test_move_is_clamped() {
        let mut buf = LineBuffer::new("> ");
        buf.insert("abc");
        assert_eq!(buf.move_by(-1_000_000), 2);
        assert_eq!(buf.move_by(isize::MAX), 5);
        assert_eq!(buf.move_by(isize::MIN), 2);
    }

    #[test]
    fn test_slices() {
        let mut buf = LineBuffer::new("> ");
        buf.insert("  (f x)");
        assert_eq!(buf.slice(2, 4), "  ");
        assert_eq!(buf.tail(7), "x)");
        assert_eq!(buf.tail(100), "");
        assert_eq!(buf.slice(5, 3), "");
    }

    #[test]
    fn test_reset_keeps_prompt() {
        let mut buf = LineBuffer::new("... ");
        buf.insert("abc");
        buf.reset();
        assert_eq!(buf.text(), "... ");
        assert_eq!(buf.column(), 4);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(String),
        Remove,
        Move(isize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z ()\\[\\]{}\"]{0,4}".prop_map(Op::Insert),
            Just(Op::Remove),
            (-8isize..8).prop_map(Op::Move),
        ]
    }

    proptest! {
        #[test]
        fn prop_column_stays_in_bounds(ops in proptest::collection::vec(op(), 0..64)) {
            let mut buf = LineBuffer::new("yl> ");
            for op in ops {
                match op {
                    Op::Insert(s) => buf.insert(&s),
                    Op::Remove => { buf.remove_before(); }
                    Op::Move(n) => { buf.move_by(n); }
                }
                prop_assert!(buf.column() >= buf.prompt_len());
                prop_assert!(buf.column() <= buf.len());
                prop_assert!(buf.text().starts_with("yl> "));
            }
        }

        #[test]
        fn prop_insert_then_remove_is_identity(
            start in "[a-z]{0,8}",
            back in 0usize..8,
            typed in "[a-z(){}]{0,8}",
        ) {
            let mut buf = LineBuffer::new("yl> ");
            buf.insert(&start);
            buf.move_by(-(back as isize));
            let before = buf.clone();

            buf.insert(&typed);
            for _ in 0..typed.chars().count() {
                buf.remove_before();
            }
            prop_assert_eq!(buf, before);
        }
    }
}
