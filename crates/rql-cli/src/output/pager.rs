//! Single-keystroke reads for the interactive pager.
//!
//! The terminal is a process-wide resource: raw mode must be acquired,
//! used for exactly one read, and restored on every exit path, or the
//! user's shell is left unusable after the process exits. The guard type
//! here restores the previous mode on drop, so early quits and faults
//! unwind cleanly.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use rql_core::{Error, Result};
use std::collections::VecDeque;

/// A source of single keystrokes for pagination prompts.
///
/// Abstracted so tests can script keys instead of touching the terminal.
pub trait KeySource {
    /// Block until one key is pressed and return its character.
    ///
    /// Nothing is echoed and no line terminator is awaited. Non-character
    /// keys report as `'\n'`; Ctrl-C reports as `'\u{3}'`.
    fn read_key(&mut self) -> Result<char>;
}

/// Reads keys from the real terminal via a scoped raw-mode acquisition.
pub struct TerminalKeys;

struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> std::io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<char> {
        let _guard = RawModeGuard::acquire()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ch = match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        '\u{3}'
                    },
                    KeyCode::Char(c) => c,
                    _ => '\n',
                };
                return Ok(ch);
            }
        }
    }
}

/// A deterministic key source fed from a fixed script.
///
/// Running out of scripted keys is an error, which doubles as an assertion
/// that a code path never consulted the pager.
pub struct ScriptedKeys {
    keys: VecDeque<char>,
}

impl ScriptedKeys {
    /// Build a source that yields `keys` in order.
    pub fn new(keys: impl IntoIterator<Item = char>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<char> {
        self.keys
            .pop_front()
            .ok_or_else(|| Error::Other("no scripted key available".to_string()))
    }
}
