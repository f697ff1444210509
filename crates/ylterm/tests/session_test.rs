//! Whole sessions: echo evaluator, cell surface and terminal flush together

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ylterm::app::{build_repl, dispatch, Args, TerminalRepl};
use ylterm::host;
use ylterm_test_utils::{fixtures::data, init_test_logging, TestFixtures};

fn repl(extra: &[&str]) -> TerminalRepl {
    init_test_logging();
    let args = Args::try_parse_from(std::iter::once("ylterm").chain(extra.iter().copied()))
        .unwrap();
    build_repl(&args, 60, 12).unwrap()
}

fn press(repl: &mut TerminalRepl, code: KeyCode, modifiers: KeyModifiers) {
    assert!(dispatch(repl, Event::Key(KeyEvent::new(code, modifiers))));
}

fn type_keys(repl: &mut TerminalRepl, text: &str) {
    for c in text.chars() {
        press(repl, KeyCode::Char(c), KeyModifiers::NONE);
    }
}

fn enter(repl: &mut TerminalRepl) {
    press(repl, KeyCode::Enter, KeyModifiers::NONE);
}

#[test]
fn test_start_loads_predef() {
    let fixtures = TestFixtures::new().unwrap();
    let path = fixtures.create_predef(".predef.yl", data::PREDEF).unwrap();
    let mut repl = repl(&["--no-banner", "--predef", path.to_str().unwrap()]);

    repl.start();

    assert_eq!(repl.surface().text_lines(), vec!["loaded predef", "", "yl>"]);
    assert_eq!(repl.evaluator().definitions().len(), 2);
}

#[test]
fn test_start_reports_missing_predef() {
    let fixtures = TestFixtures::new().unwrap();
    let missing = fixtures.missing(".predef.yl");
    let mut repl = repl(&["--no-banner", "--predef", missing.to_str().unwrap()]);

    repl.start();

    assert_eq!(
        repl.surface().text_lines(),
        vec!["failed to load predef", "", "yl>"]
    );
}

#[test]
fn test_banner_comes_first() {
    let mut repl = repl(&["--no-predef"]);

    repl.start();

    let lines = repl.surface().text_lines();
    assert_eq!(lines[0], "yatsukha's lisp");
    assert_eq!(lines.last().map(String::as_str), Some("yl>"));
}

#[test]
fn test_typed_expression_is_echoed() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);

    type_keys(&mut repl, "(+ 1 2");
    enter(&mut repl);

    assert_eq!(
        repl.surface().text_lines(),
        vec!["yl> (+ 1 2)", "(+ 1 2)", "yl>"]
    );
}

#[test]
fn test_multi_line_expression_with_comment() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);

    type_keys(&mut repl, "(define x ; the answer");
    press(&mut repl, KeyCode::End, KeyModifiers::NONE);
    press(&mut repl, KeyCode::Backspace, KeyModifiers::NONE);
    enter(&mut repl);
    type_keys(&mut repl, "42");
    press(&mut repl, KeyCode::Char(')'), KeyModifiers::NONE);
    enter(&mut repl);

    assert_eq!(
        repl.surface().text_lines(),
        vec![
            "yl> (define x ; the answer",
            "... 42)",
            "(define x 42)",
            "yl>",
        ]
    );
}

#[test]
fn test_alt_enter_forces_continuation() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);

    type_keys(&mut repl, "(f");
    press(&mut repl, KeyCode::End, KeyModifiers::NONE);
    press(&mut repl, KeyCode::Enter, KeyModifiers::ALT);
    type_keys(&mut repl, "(g");
    press(&mut repl, KeyCode::End, KeyModifiers::NONE);
    enter(&mut repl);

    assert_eq!(
        repl.surface().text_lines(),
        vec!["yl> (f)", "... (g)", "(f) (g)", "yl>"]
    );
}

#[test]
fn test_misordered_delimiters_get_a_caret() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);

    assert!(dispatch(&mut repl, Event::Paste(")(".to_string())));
    enter(&mut repl);

    assert_eq!(
        repl.surface().text_lines(),
        vec!["yl> )(", "    ^", "unmatched closing delimiter", "yl>"]
    );
}

#[test]
fn test_history_recall_after_evaluation() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);

    type_keys(&mut repl, "(one");
    enter(&mut repl);
    type_keys(&mut repl, "(two");
    enter(&mut repl);

    press(&mut repl, KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(repl.editor().line(), "(two)");
    press(&mut repl, KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(repl.editor().line(), "(one)");
    press(&mut repl, KeyCode::Char('u'), KeyModifiers::CONTROL);
    assert_eq!(repl.editor().line(), "");
}

#[test]
fn test_cls_wipes_the_terminal() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);
    type_keys(&mut repl, "(one");
    enter(&mut repl);

    type_keys(&mut repl, "cls");
    enter(&mut repl);

    assert_eq!(repl.surface().text_lines(), vec!["yl>"]);
    assert!(repl.history().entries().iter().all(|entry| entry != "cls"));
}

#[test]
fn test_flush_after_each_event_repaints_only_the_edit() {
    let mut repl = repl(&["--no-banner", "--no-predef"]);
    let mut out = Vec::new();
    host::flush(&mut out, repl.surface_mut()).unwrap();
    assert!(String::from_utf8_lossy(&out).contains("yl> "));

    out.clear();
    type_keys(&mut repl, "x");
    host::flush(&mut out, repl.surface_mut()).unwrap();
    let output = String::from_utf8_lossy(&out);

    assert!(output.starts_with("\x1b[1;1H"));
    assert!(output.contains("yl> x\x1b[7m \x1b[27m"));
    assert!(!output.contains("\x1b[3;1H"));
}
