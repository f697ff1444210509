//! Built-in evaluator that echoes normalised expressions
//!
//! Stands in for a language back end: it understands just enough of the
//! surface syntax (delimiters, strings and `;` comments) to drive line
//! continuation, point at stray closing delimiters and load a predef file.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use ylterm_terminal::{Evaluator, MemoryHistory};

/// Returned by `load_predef` when the file cannot be read
pub const PREDEF_MISSING: &str = "could not open predef file";

/// Returned by `load_predef` when any definition is malformed
pub const PREDEF_BROKEN: &str = "errors in predef, please interpret it directly for more details";

const UNMATCHED: &str = "unmatched closing delimiter";

const HELP: &[&str] = &[
    "enter evaluates a complete expression, shift + enter (or alt + enter) continues it",
    "up / down recall history, ctrl + u clears the line, 'cls' clears the screen",
    "expressions are echoed back normalised; ctrl + c or ctrl + d quits",
];

/// Tracks whether a scan is inside a string literal
#[derive(Debug, Default)]
struct StringScan {
    in_string: bool,
    escaped: bool,
}

impl StringScan {
    /// Feed one char; returns true when it belongs to a string literal
    fn step(&mut self, c: char) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            true
        } else if c == '"' {
            self.in_string = true;
            true
        } else {
            false
        }
    }
}

/// `line` up to its first `;` outside a string
pub fn strip_comment(line: &str) -> &str {
    let mut scan = StringScan::default();
    for (i, c) in line.char_indices() {
        if !scan.step(c) && c == ';' {
            return &line[..i];
        }
    }
    line
}

/// Openers minus closers outside strings and comments. An unterminated
/// string counts as one more opener.
pub fn delimiter_balance(source: &str) -> i32 {
    let mut scan = StringScan::default();
    let mut in_comment = false;
    let mut balance = 0i32;

    for c in source.chars() {
        if in_comment {
            in_comment = c != '\n';
            continue;
        }
        if scan.step(c) {
            continue;
        }
        match c {
            ';' => in_comment = true,
            '(' | '[' | '{' => balance = balance.saturating_add(1),
            ')' | ']' | '}' => balance = balance.saturating_sub(1),
            _ => {}
        }
    }

    if scan.in_string {
        balance.saturating_add(1)
    } else {
        balance
    }
}

/// Comments stripped, blank lines dropped, lines joined with a space
pub fn normalize(source: &str) -> String {
    source
        .split('\n')
        .map(|line| strip_comment(line).trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Char index of the first closing delimiter with no opener
fn unmatched_closer(expression: &str) -> Option<usize> {
    let mut scan = StringScan::default();
    let mut depth = 0i32;

    for (i, c) in expression.chars().enumerate() {
        if scan.step(c) {
            continue;
        }
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth < 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Evaluator that echoes what it is given
#[derive(Debug, Clone)]
pub struct EchoEvaluator {
    history: MemoryHistory,
    definitions: Vec<String>,
}

impl EchoEvaluator {
    /// Evaluated sources are appended to `history`
    pub fn new(history: MemoryHistory) -> Self {
        Self {
            history,
            definitions: Vec::new(),
        }
    }

    /// Expressions accepted from predef files
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// Split predef text into expressions; returns how many were malformed
    fn load_definitions(&mut self, text: &str) -> usize {
        let mut errors = 0;
        let mut pending = String::new();
        let mut balance = 0;

        for line in text.lines() {
            let code = strip_comment(line).trim();
            if code.is_empty() {
                continue;
            }

            if !pending.is_empty() {
                pending.push(' ');
            }
            pending.push_str(code);
            balance += delimiter_balance(code);

            if balance <= 0 {
                let expression = std::mem::take(&mut pending);
                if balance < 0 || unmatched_closer(&expression).is_some() {
                    debug!(%expression, "Malformed predef expression");
                    errors += 1;
                } else {
                    self.definitions.push(expression);
                }
                balance = 0;
            }
        }

        if !pending.is_empty() {
            debug!(expression = %pending, "Unterminated predef expression");
            errors += 1;
        }
        errors
    }
}

impl Evaluator for EchoEvaluator {
    fn evaluate(&mut self, source: &str, continued: bool) -> String {
        self.history.append(source);

        let expression = normalize(source);
        debug!(%expression, continued, "Evaluating");

        if expression == "help" {
            return HELP.join("\n");
        }

        match unmatched_closer(&expression) {
            Some(index) if continued => {
                format!("{expression}\n{}^\n{UNMATCHED}", " ".repeat(index))
            }
            Some(index) => {
                let lead = source.chars().take_while(|c| c.is_whitespace()).count();
                format!("{}^\n{UNMATCHED}", " ".repeat(lead + index))
            }
            None => expression,
        }
    }

    fn paren_balance(&self, source: &str) -> i32 {
        delimiter_balance(source)
    }

    fn load_predef(&mut self, path: &Path) -> String {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot open predef file");
                return PREDEF_MISSING.to_string();
            }
        };

        let errors = self.load_definitions(&text);
        debug!(
            path = %path.display(),
            loaded = self.definitions.len(),
            errors,
            "Read predef file"
        );

        if errors == 0 {
            String::new()
        } else {
            PREDEF_BROKEN.to_string()
        }
    }
}
