//! RAII guard for terminal ownership while the editor runs

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tracing::debug;

/// RAII guard that owns the terminal for the editor.
/// Raw mode, the alternate screen and the hidden cursor are all undone on drop.
pub struct TerminalGuard {
    raw_mode_enabled: bool,
    screen_entered: bool,
    keyboard_enhanced: bool,
    // Marker to ensure this type is !Send and !Sync
    _marker: std::marker::PhantomData<*const ()>,
}

impl TerminalGuard {
    /// Take ownership of the terminal without changing it yet
    pub fn acquire() -> Result<Self> {
        Ok(Self {
            raw_mode_enabled: false,
            screen_entered: false,
            keyboard_enhanced: false,
            _marker: std::marker::PhantomData,
        })
    }

    /// Enable raw mode on the terminal.
    pub fn enable_raw_mode(&mut self) -> Result<()> {
        if !self.raw_mode_enabled {
            terminal::enable_raw_mode()?;
            self.raw_mode_enabled = true;
        }
        Ok(())
    }

    /// Disable raw mode on the terminal.
    pub fn disable_raw_mode(&mut self) -> Result<()> {
        if self.raw_mode_enabled {
            terminal::disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        Ok(())
    }

    /// Check if raw mode is currently enabled
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_enabled
    }

    /// Switch to the alternate screen, hide the cursor and turn on bracketed
    /// paste. Where supported, ask for disambiguated keys so Shift+Enter
    /// arrives as such.
    pub fn enter_screen(&mut self) -> Result<()> {
        if self.screen_entered {
            return Ok(());
        }

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            cursor::Hide,
            EnableBracketedPaste
        )?;
        self.screen_entered = true;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            self.keyboard_enhanced = true;
        }
        debug!(keyboard_enhanced = self.keyboard_enhanced, "Entered editor screen");

        Ok(())
    }

    /// Undo [`TerminalGuard::enter_screen`]
    pub fn leave_screen(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        if self.screen_entered {
            execute!(
                stdout,
                DisableBracketedPaste,
                cursor::Show,
                LeaveAlternateScreen
            )?;
            self.screen_entered = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Always try to restore terminal state
        let _ = self.leave_screen();
        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
        }
    }
}
