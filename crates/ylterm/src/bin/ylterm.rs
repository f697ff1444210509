fn main() -> anyhow::Result<()> {
    // Run the editor; the terminal guard has restored the screen by the time it returns
    let result = ylterm::app::run();

    // Ensure terminal is in a good state before exiting
    use std::io::{self, Write};
    let _ = io::stderr().flush();
    let _ = io::stdout().flush();

    result
}
