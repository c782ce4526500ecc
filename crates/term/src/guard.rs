//! Raw-mode guard.
//!
//! Raw mode disables echo and line buffering so single keystrokes reach the
//! session. Dropping the guard restores the terminal on every exit path,
//! including early returns on protocol errors.

use std::io;

use crossterm::terminal;

#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
