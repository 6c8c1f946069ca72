//! Keyboard collaborators.
//!
//! The input actor pulls keys through [`KeySource`]. [`TerminalKeys`]
//! reads crossterm events; [`ScriptedKeys`] is fed from a channel by
//! tests and demos.

use super::messages::KeyCode;
use crate::error::KeyError;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use crossterm::event::{self, Event, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Blocking key reader with a timeout.
pub trait KeySource: Send {
    /// Wait up to `timeout` for a keystroke.
    ///
    /// `Ok(None)` means the wait timed out.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>, KeyError>;
}

/// Keys from the controlling terminal.
///
/// Expects raw mode to be on, which [`TerminalSurface`](crate::TerminalSurface)
/// takes care of.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    /// A reader over crossterm's global event queue.
    pub const fn new() -> Self {
        Self
    }

    /// Convert a crossterm event, dropping releases and unbound keys.
    fn convert_event(event: Event) -> Option<KeyCode> {
        let Event::Key(key_event) = event else {
            return None;
        };
        if key_event.kind != KeyEventKind::Press {
            return None;
        }
        // Raw mode swallows SIGINT; treat Ctrl+C as Esc.
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == event::KeyCode::Char('c')
        {
            return Some(KeyCode::Esc);
        }
        Self::convert_key_code(key_event.code)
    }

    fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
        Some(match code {
            event::KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            event::KeyCode::Left => KeyCode::Left,
            event::KeyCode::Right => KeyCode::Right,
            event::KeyCode::Up => KeyCode::Up,
            event::KeyCode::Down => KeyCode::Down,
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Esc => KeyCode::Esc,
            _ => return None,
        })
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>, KeyError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(Self::convert_event(event::read()?))
    }
}

/// Keys pushed through a channel.
#[derive(Debug)]
pub struct ScriptedKeys {
    rx: Receiver<KeyCode>,
}

impl ScriptedKeys {
    /// A source and the sender that feeds it.
    ///
    /// Dropping every sender makes the source report
    /// [`KeyError::Disconnected`].
    pub fn channel() -> (Sender<KeyCode>, Self) {
        let (tx, rx) = unbounded();
        (tx, Self { rx })
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>, KeyError> {
        match self.rx.recv_timeout(timeout) {
            Ok(key) => Ok(Some(key)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(KeyError::Disconnected),
        }
    }
}
