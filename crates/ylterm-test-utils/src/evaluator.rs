use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use ylterm_terminal::{Evaluator, MemoryHistory};

/// One call the engine made to [`ScriptedEvaluator::evaluate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorCall {
    pub source: String,
    pub continued: bool,
}

impl EvaluatorCall {
    pub fn new(source: &str, continued: bool) -> Self {
        Self {
            source: source.to_string(),
            continued,
        }
    }
}

/// Openers minus closers, ignoring strings entirely
pub fn delimiter_count(source: &str) -> i32 {
    source.chars().fold(0, |acc, c| match c {
        '(' | '{' | '[' => acc + 1,
        ')' | '}' | ']' => acc - 1,
        _ => acc,
    })
}

/// Evaluator double that records calls and replays canned output
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvaluator {
    calls: Vec<EvaluatorCall>,
    responses: VecDeque<String>,
    balances: HashMap<String, i32>,
    predef_error: String,
    predef_paths: Vec<PathBuf>,
    history: Option<MemoryHistory>,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output of the next evaluation
    pub fn with_response(mut self, output: &str) -> Self {
        self.responses.push_back(output.to_string());
        self
    }

    /// Override the balance reported for one exact line
    pub fn with_balance(mut self, line: &str, balance: i32) -> Self {
        self.balances.insert(line.to_string(), balance);
        self
    }

    /// Make predef loading fail with `message`
    pub fn with_predef_error(mut self, message: &str) -> Self {
        self.predef_error = message.to_string();
        self
    }

    /// Append every evaluated source to `history`
    pub fn recording_to(mut self, history: &MemoryHistory) -> Self {
        self.history = Some(history.clone());
        self
    }

    pub fn calls(&self) -> &[EvaluatorCall] {
        &self.calls
    }

    pub fn predef_paths(&self) -> &[PathBuf] {
        &self.predef_paths
    }
}

impl Evaluator for ScriptedEvaluator {
    fn evaluate(&mut self, source: &str, continued: bool) -> String {
        self.calls.push(EvaluatorCall::new(source, continued));
        if let Some(history) = &self.history {
            history.append(source);
        }

        self.responses
            .pop_front()
            .unwrap_or_else(|| format!("=> {source}"))
    }

    fn paren_balance(&self, source: &str) -> i32 {
        self.balances
            .get(source)
            .copied()
            .unwrap_or_else(|| delimiter_count(source))
    }

    fn load_predef(&mut self, path: &Path) -> String {
        self.predef_paths.push(path.to_path_buf());
        self.predef_error.clone()
    }
}
