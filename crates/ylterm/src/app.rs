//! ylterm terminal front end

use crate::{echo::EchoEvaluator, host, terminal_guard::TerminalGuard};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};
use ylterm_terminal::{map_key, CellFont, CellSurface, MemoryHistory, Repl, ReplConfig};

/// The REPL as the binary runs it
pub type TerminalRepl = Repl<CellSurface, EchoEvaluator, MemoryHistory>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "ylterm - line editor and REPL front end")]
pub struct Args {
    /// Prompt of a fresh command
    #[arg(long, default_value = "yl> ")]
    pub prompt: String,

    /// Prompt of continuation lines
    #[arg(long, default_value = "... ")]
    pub continuation_prompt: String,

    /// Definitions loaded at start-up
    #[arg(long, default_value = ".predef.yl")]
    pub predef: PathBuf,

    /// Do not load any predef file
    #[arg(long)]
    pub no_predef: bool,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Log destination; the terminal itself is busy
    #[arg(long, default_value = "ylterm.log")]
    pub log_file: PathBuf,

    /// Virtual width of one cell in pixels
    #[arg(long, default_value = "8")]
    pub cell_width: f32,

    /// Virtual font ascent in pixels
    #[arg(long, default_value = "10")]
    pub ascent: f32,

    /// Virtual font descent in pixels
    #[arg(long, default_value = "3")]
    pub descent: f32,
}

impl Args {
    pub fn config(&self) -> ReplConfig {
        let defaults = ReplConfig::default();
        ReplConfig {
            prompt: self.prompt.clone(),
            continuation_prompt: self.continuation_prompt.clone(),
            banner: if self.no_banner {
                Vec::new()
            } else {
                defaults.banner.clone()
            },
            predef_path: (!self.no_predef).then(|| self.predef.clone()),
            ..defaults
        }
    }

    pub fn font(&self) -> CellFont {
        CellFont {
            cell_width: self.cell_width,
            ascent: self.ascent,
            descent: self.descent,
        }
    }
}

/// Ctrl+C and Ctrl+D leave the editor
pub fn is_quit(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'd' | 'C' | 'D'))
}

/// Build the REPL over a surface of `columns` x `rows` cells
pub fn build_repl(args: &Args, columns: u16, rows: u16) -> Result<TerminalRepl> {
    let history = MemoryHistory::new();
    let evaluator = EchoEvaluator::new(history.clone());
    let surface = CellSurface::new(columns, rows, args.font());

    Repl::new(surface, evaluator, history, args.config()).context("Failed to start the editor")
}

/// Apply one terminal event. Returns false when the user asked to quit.
pub fn dispatch(repl: &mut TerminalRepl, event: Event) -> bool {
    match event {
        Event::Key(key) if is_quit(&key) => {
            info!("Quit requested");
            return false;
        }
        Event::Key(key) => {
            if let Some(command) = map_key(&key) {
                repl.handle(command);
            }
        }
        Event::Paste(text) => repl.paste(&text),
        Event::Resize(columns, rows) => debug!(columns, rows, "Ignoring resize"),
        _ => {}
    }
    true
}

fn init_logging(args: &Args) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)
        .with_context(|| format!("Failed to open log file {}", args.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(args.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let (columns, rows) = terminal::size().context("Failed to query terminal size")?;
    info!(columns, rows, "Starting ylterm");

    let mut repl = build_repl(&args, columns, rows)?;

    let mut guard = TerminalGuard::acquire()?;
    guard.enable_raw_mode()?;
    guard.enter_screen()?;

    let mut stdout = io::stdout();
    repl.start();
    host::flush(&mut stdout, repl.surface_mut()).context("Failed to draw the screen")?;

    loop {
        let event = event::read().context("Failed to read terminal event")?;
        if !dispatch(&mut repl, event) {
            break;
        }
        host::flush(&mut stdout, repl.surface_mut()).context("Failed to draw the screen")?;
    }

    guard.leave_screen()?;
    guard.disable_raw_mode()?;
    stdout.flush()?;

    Ok(())
}
