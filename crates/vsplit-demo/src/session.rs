#![forbid(unsafe_code)]

//! Terminal session guard.
//!
//! Entering the session enables raw mode, the alternate screen and mouse
//! capture, in that order. Dropping it disables them in reverse order, so
//! the terminal is restored on every exit path that unwinds.

use std::io::{self, Write};

use crossterm::{cursor, event, execute, terminal};

pub struct TerminalSession {
    alternate_screen: bool,
    mouse_capture: bool,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or the setup sequences
    /// cannot be written. Anything already enabled is rolled back.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen: false,
            mouse_capture: false,
        };
        let mut stdout = io::stdout();

        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )?;
        session.alternate_screen = true;

        execute!(stdout, event::EnableMouseCapture)?;
        session.mouse_capture = true;
        tracing::info!("alternate screen and mouse capture enabled");

        Ok(session)
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_capture {
            let _ = execute!(stdout, event::DisableMouseCapture);
            self.mouse_capture = false;
        }
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}
