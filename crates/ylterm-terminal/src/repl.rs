//! Command interpreter
//!
//! [`Repl`] routes [`EditorCommand`]s to the editor, the continuation tracker
//! and the history navigator, and talks to the evaluator on submission. Each
//! call to [`Repl::handle`] runs to completion, leaving buffer and pixels
//! consistent before the next command is accepted.

use crate::{
    command::EditorCommand,
    config::ReplConfig,
    continuation::{ContinuationState, ContinuationTracker, SubmitDecision, Submission},
    editor::Editor,
    evaluator::Evaluator,
    history::{HistoryNavigator, HistoryStore},
    parser::Parser,
    surface::DrawingSurface,
    TerminalError,
};
use tracing::{debug, trace, warn};

/// Caret marking an error column in evaluator output
const CARET: char = '^';

/// Closing partner of an auto-paired opener
pub fn closer(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        '"' => Some('"'),
        _ => None,
    }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The current line changed (or the cursor moved)
    Edited,

    /// The line was broken into a continuation line
    Continued,

    /// A complete command went to the evaluator
    Evaluated(Submission),

    /// A blank line was submitted; nothing was evaluated
    Skipped,

    /// The clear command wiped the screen
    ScreenCleared,
}

/// Interactive front end for an [`Evaluator`]
pub struct Repl<S, E, H> {
    editor: Editor<S>,
    tracker: ContinuationTracker,
    navigator: HistoryNavigator,
    evaluator: E,
    history: H,
    parser: Parser,
    config: ReplConfig,
}

impl<S, E, H> Repl<S, E, H>
where
    S: DrawingSurface,
    E: Evaluator,
    H: HistoryStore,
{
    /// Take ownership of the surface and draw the first prompt
    pub fn new(
        surface: S,
        evaluator: E,
        history: H,
        config: ReplConfig,
    ) -> Result<Self, TerminalError> {
        let editor = Editor::new(surface, &config.prompt, &config.metrics_sample)?;
        let tracker = ContinuationTracker::new(&config.prompt, &config.continuation_prompt);

        Ok(Self {
            editor,
            tracker,
            navigator: HistoryNavigator::new(),
            evaluator,
            history,
            parser: Parser::new(),
            config,
        })
    }

    pub fn editor(&self) -> &Editor<S> {
        &self.editor
    }

    pub fn tracker(&self) -> &ContinuationTracker {
        &self.tracker
    }

    pub fn navigator(&self) -> &HistoryNavigator {
        &self.navigator
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut E {
        &mut self.evaluator
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    pub fn state(&self) -> ContinuationState {
        self.tracker.state()
    }

    pub fn surface(&self) -> &S {
        self.editor.surface()
    }

    /// Hosts flush from here between commands
    pub fn surface_mut(&mut self) -> &mut S {
        self.editor.surface_mut()
    }

    /// Echo the banner and load the predef file
    pub fn start(&mut self) {
        let banner = self.config.banner.clone();
        for line in &banner {
            self.echo(line);
        }

        if let Some(path) = self.config.predef_path.clone() {
            let error = self.evaluator.load_predef(&path);
            if error.is_empty() {
                debug!(path = %path.display(), "Loaded predef");
                self.echo("loaded predef");
            } else {
                warn!(path = %path.display(), %error, "Failed to load predef");
                self.echo("failed to load predef");
            }
        }

        if !banner.is_empty() || self.config.predef_path.is_some() {
            self.echo("");
        }
    }

    /// Apply one command
    pub fn handle(&mut self, command: EditorCommand) -> Outcome {
        trace!(?command, "Dispatching editor command");

        match command {
            EditorCommand::Insert(c) => self.insert(c),
            EditorCommand::Backspace => self.backspace(),
            EditorCommand::Submit { force_multiline } => return self.submit(force_multiline),
            EditorCommand::MoveCursor(offset) => self.editor.jump(offset),
            EditorCommand::HistoryPrev => {
                if let Some(entry) = self.navigator.up(&self.history) {
                    self.replace_line(&entry);
                }
            }
            EditorCommand::HistoryNext => {
                if let Some(entry) = self.navigator.down(&self.history) {
                    self.replace_line(&entry);
                }
            }
            EditorCommand::Clear => {
                self.editor.clear();
                self.navigator.reset();
            }
            EditorCommand::JumpHome => self.editor.jump(isize::MIN),
            EditorCommand::JumpEnd => self.editor.jump(isize::MAX),
            EditorCommand::Indent => {
                let indent = self.config.indent.clone();
                self.editor.append(&indent);
            }
        }

        Outcome::Edited
    }

    /// Type `text` one character at a time, as if from the keyboard
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.handle(EditorCommand::Insert(c));
        }
    }

    /// Insert pasted text verbatim: no auto-pairing, line breaks become spaces
    pub fn paste(&mut self, text: &str) {
        let flat = self.parser.printable(&text.replace(&['\r', '\n'][..], " "));
        if !flat.is_empty() {
            self.editor.append(&flat);
        }
    }

    fn insert(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.editor.append(c.encode_utf8(&mut buf));

        if let Some(close) = closer(c) {
            self.editor.append(close.encode_utf8(&mut buf));
            self.editor.jump(-1);
        }
    }

    fn backspace(&mut self) {
        let Some(removed) = self.editor.pop() else {
            return;
        };

        // Purely textual: whatever sits right of the cursor counts as the pair
        if closer(removed).is_some() && closer(removed) == self.editor.buffer().under_cursor() {
            self.editor.jump(1);
            self.editor.pop();
        }
    }

    fn submit(&mut self, force_multiline: bool) -> Outcome {
        self.navigator.reset();

        let line = self.editor.line();
        let command = self.tracker.preview(&line);

        if command.trim() == self.config.clear_command {
            debug!("Clearing screen");
            self.tracker.reset();
            self.editor.set_prompt(self.tracker.primary_prompt());
            self.editor.cls();
            return Outcome::ScreenCleared;
        }

        if self.tracker.state() == ContinuationState::Fresh
            && !force_multiline
            && line.trim().is_empty()
        {
            self.editor.new_line(false);
            return Outcome::Skipped;
        }

        let balance = self.evaluator.paren_balance(&line);
        match self.tracker.decide(balance, force_multiline) {
            SubmitDecision::Continue => {
                self.editor.set_prompt(self.tracker.continuation_prompt());
                let head = self.editor.break_line();
                let committed = self.evaluator.paren_balance(&head);
                self.tracker.push_line(&head, committed);
                debug!(
                    balance = self.tracker.pending().bracket_balance,
                    force_multiline, "Continuing command"
                );
                Outcome::Continued
            }
            SubmitDecision::Evaluate => {
                let submission = self.tracker.finish(&line);
                debug!(
                    source = %submission.source,
                    continued = submission.continued,
                    "Evaluating command"
                );

                let output = self
                    .evaluator
                    .evaluate(&submission.source, submission.continued);

                self.editor.set_prompt(self.tracker.primary_prompt());
                self.editor.new_line(false);
                self.echo_output(&output);

                Outcome::Evaluated(submission)
            }
        }
    }

    /// Echo evaluator output line by line. A caret line leading multi-line
    /// output is shifted right by the prompt so it points into the input.
    fn echo_output(&mut self, output: &str) {
        let lines: Vec<&str> = output.split('\n').collect();
        let pad = " ".repeat(self.tracker.primary_prompt().chars().count());

        for (i, line) in lines.iter().enumerate() {
            let text = self.parser.printable(line);
            if i == 0 && lines.len() > 1 && text.contains(CARET) {
                self.editor.echo(&format!("{pad}{text}"));
            } else {
                self.editor.echo(&text);
            }
        }
    }

    fn echo(&mut self, text: &str) {
        let text = self.parser.printable(text);
        self.editor.echo(&text);
    }

    fn replace_line(&mut self, entry: &str) {
        let flat = entry.lines().collect::<Vec<_>>().join(" ");
        self.editor.clear();
        self.editor.append(&flat);
    }
}
