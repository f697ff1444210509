//! Maps crossterm key events to [`EditorCommand`]s

use crate::command::EditorCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a key event, or `None` for keys the editor ignores.
///
/// Releases are ignored. Shift+Enter only arrives on terminals that report
/// disambiguated keys, so Alt+Enter is accepted as the same request.
pub fn map_key(event: &KeyEvent) -> Option<EditorCommand> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mods = event.modifiers;
    let ctrl = mods.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META);

    let command = match event.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'u' => EditorCommand::Clear,
            'a' => EditorCommand::JumpHome,
            'e' => EditorCommand::JumpEnd,
            _ => return None,
        },
        KeyCode::Char(_) if mods.contains(KeyModifiers::ALT) => return None,
        KeyCode::Char(c) if !c.is_control() => EditorCommand::Insert(c),
        KeyCode::Backspace => EditorCommand::Backspace,
        KeyCode::Enter => EditorCommand::Submit {
            force_multiline: mods.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT),
        },
        KeyCode::Tab => EditorCommand::Indent,
        KeyCode::Left => EditorCommand::MoveCursor(-1),
        KeyCode::Right => EditorCommand::MoveCursor(1),
        KeyCode::Up => EditorCommand::HistoryPrev,
        KeyCode::Down => EditorCommand::HistoryNext,
        KeyCode::Home => EditorCommand::JumpHome,
        KeyCode::End => EditorCommand::JumpEnd,
        _ => return None,
    };

    Some(command)
}
