//! Keystroke sources.
//!
//! The session never blocks indefinitely on the keyboard: every read is a
//! readiness wait bounded by a timeout.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

pub trait KeySource {
    /// Wait up to `timeout` for one key press.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Key presses from the controlling terminal via crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            // Releases, repeats, resizes and mouse events carry no command.
            other => {
                tracing::trace!(event = ?other, "ignored terminal event");
                Ok(None)
            }
        }
    }
}

/// Replays a fixed sequence of polls.
///
/// Fails with `UnexpectedEof` once the script runs out, so a test can never
/// spin forever waiting for a key.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    polls: VecDeque<Option<KeyEvent>>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// One poll per character, each yielding that key.
    pub fn from_chars(chars: &str) -> Self {
        let mut keys = Self::new();
        for c in chars.chars() {
            keys.push_char(c);
        }
        keys
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.polls.push_back(Some(key));
    }

    pub fn push_char(&mut self, c: char) {
        self.push_key(KeyEvent::from(KeyCode::Char(c)));
    }

    /// A poll that times out with no key.
    pub fn push_idle(&mut self) {
        self.polls.push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.polls.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
        self.polls.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }
}
