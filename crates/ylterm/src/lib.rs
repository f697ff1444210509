//! Terminal host for the ylterm line editor

pub mod app;
pub mod echo;
pub mod host;
pub mod terminal_guard;

pub use echo::EchoEvaluator;
pub use terminal_guard::TerminalGuard;
