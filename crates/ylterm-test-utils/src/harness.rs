use crate::evaluator::{EvaluatorCall, ScriptedEvaluator};
use ylterm_terminal::{
    CellFont, CellSurface, EditorCommand, MemoryHistory, Outcome, Repl, ReplConfig,
};

/// Default harness surface width in cells
pub const COLUMNS: u16 = 60;

/// Default harness viewport height in cells
pub const ROWS: u16 = 20;

/// Drives a [`Repl`] over a [`CellSurface`] the way a keyboard would
pub struct ReplHarness {
    pub repl: Repl<CellSurface, ScriptedEvaluator, MemoryHistory>,
}

impl Default for ReplHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplHarness {
    /// Quiet config, empty history, default scripted evaluator
    pub fn new() -> Self {
        Self::with(ScriptedEvaluator::new(), MemoryHistory::new(), ReplConfig::quiet())
    }

    pub fn with(evaluator: ScriptedEvaluator, history: MemoryHistory, config: ReplConfig) -> Self {
        Self::with_surface(
            CellSurface::new(COLUMNS, ROWS, CellFont::default()),
            evaluator,
            history,
            config,
        )
    }

    pub fn with_surface(
        surface: CellSurface,
        evaluator: ScriptedEvaluator,
        history: MemoryHistory,
        config: ReplConfig,
    ) -> Self {
        let repl =
            Repl::new(surface, evaluator, history, config).expect("cell surface is measurable");
        Self { repl }
    }

    pub fn type_str(&mut self, text: &str) {
        self.repl.type_str(text);
    }

    pub fn press(&mut self, command: EditorCommand) -> Outcome {
        self.repl.handle(command)
    }

    pub fn enter(&mut self) -> Outcome {
        self.press(EditorCommand::Submit {
            force_multiline: false,
        })
    }

    pub fn shift_enter(&mut self) -> Outcome {
        self.press(EditorCommand::Submit {
            force_multiline: true,
        })
    }

    pub fn backspace(&mut self) -> Outcome {
        self.press(EditorCommand::Backspace)
    }

    /// Insert `text` without auto-pairing
    pub fn paste(&mut self, text: &str) {
        self.repl.paste(text);
    }

    /// Paste `text` and press Enter
    pub fn submit(&mut self, text: &str) -> Outcome {
        self.paste(text);
        self.enter()
    }

    /// Paste `text` and press Shift+Enter
    pub fn submit_forced(&mut self, text: &str) -> Outcome {
        self.paste(text);
        self.shift_enter()
    }

    /// Text of the current line, prompt stripped
    pub fn line(&self) -> String {
        self.repl.editor().line()
    }

    /// Whole current line including its prompt
    pub fn buffer(&self) -> String {
        self.repl.editor().buffer().text()
    }

    pub fn column(&self) -> usize {
        self.repl.editor().column()
    }

    /// Every painted row, trailing blank rows dropped
    pub fn screen(&self) -> Vec<String> {
        self.repl.surface().text_lines()
    }

    pub fn calls(&self) -> Vec<EvaluatorCall> {
        self.repl.evaluator().calls().to_vec()
    }

    /// Cell of the one and only cursor block. Panics if there is not exactly one.
    pub fn cursor(&self) -> (u16, usize) {
        let blocks = self.repl.surface().block_cells();
        assert_eq!(blocks.len(), 1, "expected a single cursor block, found {blocks:?}");
        blocks[0]
    }
}
