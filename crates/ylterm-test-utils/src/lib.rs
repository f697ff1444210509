pub mod evaluator;
pub mod fixtures;
pub mod harness;
pub mod terminal;

pub use evaluator::{delimiter_count, EvaluatorCall, ScriptedEvaluator};
pub use fixtures::TestFixtures;
pub use harness::ReplHarness;
pub use terminal::ScreenComparator;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("ylterm=debug,ylterm_terminal=debug")),
            )
            .with_test_writer()
            .init();
    });
}
