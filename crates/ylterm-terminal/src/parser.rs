//! Output sanitising
//!
//! Uses the vte crate to strip escape sequences and control characters from
//! text before it is painted. Only printable characters reach the surface.

use vte::{Params, Perform};

/// Width a tab expands to
const TAB_WIDTH: usize = 4;

/// Strips escape sequences out of output lines
pub struct Parser {
    /// The underlying vte parser
    vte_parser: vte::Parser,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser
    pub fn new() -> Self {
        Self {
            vte_parser: vte::Parser::new(),
        }
    }

    /// Printable content of `text`, one physical line's worth.
    ///
    /// Parser state is reset per call, so an unterminated sequence never
    /// swallows the next line.
    pub fn printable(&mut self, text: &str) -> String {
        self.vte_parser = vte::Parser::new();

        let mut sink = Printable::default();
        for byte in text.bytes() {
            self.vte_parser.advance(&mut sink, byte);
        }
        sink.out
    }
}

/// Convenience wrapper around [`Parser::printable`]
pub fn printable(text: &str) -> String {
    Parser::new().printable(text)
}

#[derive(Default)]
struct Printable {
    out: String,
}

impl Perform for Printable {
    fn print(&mut self, c: char) {
        self.out.push(c);
    }

    fn execute(&mut self, byte: u8) {
        // Tab; everything else (bell, CR, LF, backspace) is dropped
        if byte == 0x09 {
            let column = self.out.chars().count();
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            self.out.extend(std::iter::repeat(' ').take(pad));
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _c: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _c: char) {}

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}
