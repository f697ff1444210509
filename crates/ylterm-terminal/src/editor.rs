//! Line-level editing operations
//!
//! [`Editor`] keeps the [`LineBuffer`] and the painted pixels in lockstep.
//! Every mutation erases the cursor first, edits the buffer, repaints only the
//! affected tail of the line and then draws the cursor again, so exactly one
//! cursor block is ever visible.

use crate::{
    buffer::LineBuffer,
    renderer::Renderer,
    surface::{DrawingSurface, Shade},
    TerminalError,
};

/// Buffer, renderer and vertical position of the current line
pub struct Editor<S> {
    renderer: Renderer<S>,
    buffer: LineBuffer,

    /// Baseline of the current line; only ever grows, except on `cls`
    baseline: f32,

    /// Prompt written at the start of the next physical line
    prompt: String,
}

impl<S: DrawingSurface> Editor<S> {
    /// Measure the surface, paint `prompt` on the first line and show the cursor
    pub fn new(surface: S, prompt: &str, sample: &str) -> Result<Self, TerminalError> {
        let renderer = Renderer::new(surface, sample)?;
        let baseline = renderer.metrics().char_height;

        let mut editor = Self {
            renderer,
            buffer: LineBuffer::new(prompt),
            baseline,
            prompt: prompt.to_string(),
        };
        editor
            .renderer
            .paint_text(prompt, 0, editor.baseline, Shade::Ink);
        editor.paint_cursor();

        Ok(editor)
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn column(&self) -> usize {
        self.buffer.column()
    }

    /// The user's text on the current line, prompt stripped
    pub fn line(&self) -> String {
        self.buffer.line()
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Prompt for subsequent lines; the current line keeps its own
    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    /// Insert `text` at the cursor and repaint the tail of the line.
    ///
    /// An empty string is a plain redraw of the tail and cursor.
    pub fn append(&mut self, text: &str) {
        let column = self.buffer.column();
        self.erase_cursor();

        self.buffer.insert(text);

        self.renderer.clear_to_edge(column, self.baseline);
        let tail = self.buffer.tail(column);
        self.renderer
            .paint_text(&tail, column, self.baseline, Shade::Ink);

        self.paint_cursor();
        self.focus();
    }

    /// Backspace. Returns the removed character, or `None` at the prompt.
    pub fn pop(&mut self) -> Option<char> {
        let column = self.buffer.column();
        if column <= self.buffer.prompt_len() {
            return None;
        }

        self.renderer.clear_to_edge(column - 1, self.baseline);
        let removed = self.buffer.remove_before();
        self.append("");

        removed
    }

    /// Move the cursor by `offset`, clamped to the editable range
    pub fn jump(&mut self, offset: isize) {
        self.erase_cursor();
        self.buffer.move_by(offset);
        self.paint_cursor();
        self.focus();
    }

    /// Wipe the line back to its bare prompt
    pub fn clear(&mut self) {
        self.erase_cursor();
        self.renderer
            .clear_to_edge(self.buffer.prompt_len(), self.baseline);
        self.buffer.reset();
        self.paint_cursor();
    }

    /// Clear pixels from `column` rightward; buffer state is untouched
    pub fn clear_from(&mut self, column: usize) {
        self.renderer.clear_to_edge(column, self.baseline);
    }

    /// Commit the current line and start a fresh one under it.
    ///
    /// `echoed` lines were produced by output and have no live cursor to erase.
    pub fn new_line(&mut self, echoed: bool) {
        if !echoed {
            self.erase_cursor();
        }

        self.buffer = LineBuffer::new(&self.prompt);
        self.baseline += self.renderer.cursor().height;
        self.renderer
            .paint_text(&self.prompt, 0, self.baseline, Shade::Ink);
        self.append("");
    }

    /// Replace the current line with `text` at column 0 and move on
    pub fn echo(&mut self, text: &str) {
        self.erase_cursor();
        self.renderer.clear_band(self.baseline);
        self.renderer.paint_text(text, 0, self.baseline, Shade::Ink);
        self.new_line(true);
    }

    /// Split the line at the cursor into a continuation line.
    ///
    /// The text after the cursor moves down, prefixed with the leading
    /// indentation of the text before it, and the cursor lands right after
    /// that indentation. Returns the text before the cursor, prompt stripped.
    pub fn break_line(&mut self) -> String {
        let column = self.buffer.column();
        let head = self.buffer.slice(self.buffer.prompt_len(), column);
        let indent = head.chars().take_while(|c| *c == ' ').count();
        let carried = format!("{}{}", " ".repeat(indent), self.buffer.tail(column));

        self.clear_from(column);
        self.new_line(true);
        self.append(&carried);
        self.jump(isize::MIN);
        self.jump(indent as isize);

        head
    }

    /// Clear the whole surface and start over on the first line
    pub fn cls(&mut self) {
        self.renderer.clear_all();
        self.baseline = self.renderer.metrics().char_height;
        self.buffer = LineBuffer::new(&self.prompt);
        self.renderer
            .paint_text(&self.prompt, 0, self.baseline, Shade::Ink);
        self.paint_cursor();
        self.focus();
    }

    fn paint_cursor(&mut self) {
        self.renderer.paint_cursor(
            self.buffer.column(),
            self.baseline,
            self.buffer.under_cursor(),
        );
    }

    fn erase_cursor(&mut self) {
        self.renderer.clear_cursor(
            self.buffer.column(),
            self.baseline,
            self.buffer.under_cursor(),
        );
    }

    fn focus(&mut self) {
        self.renderer.focus(self.baseline);
    }
}
