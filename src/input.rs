/// Keyboard handling: one-shot commands and held-key tracking.
///
/// Movement is continuous, so instead of acting on each key event we
/// record the frame number of the last press/repeat event for every key.
/// A key counts as held while that record is fresher than `HOLD_WINDOW`
/// frames.  This covers both terminal classes:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Release`
///   events remove the key immediately.
/// * **Classic terminals**: only repeated `Press` events arrive; the key
///   expires after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;
use std::io::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::{Audio, Sound};
use crate::compute::loose_arrow;
use crate::entities::GameState;

/// A key stays held this many frames after its last press/repeat event.
/// 8 frames @ 60 FPS ≈ 133 ms, longer than a typical OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Fire,
}

/// One-shot command for a key press, if any.
pub fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Fire),
        _ => None,
    }
}

/// Handle a fire command: loose the arrow and play the shot sound, or do
/// nothing at all while an arrow is in flight or the game is over.
pub fn fire<W: Write>(out: &mut W, state: &GameState, audio: &Audio) -> std::io::Result<GameState> {
    match loose_arrow(state) {
        Some(next) => {
            audio.play_effect(out, Sound::Shoot)?;
            log::debug!("arrow loosed at y={}", next.arrow.y);
            Ok(next)
        }
        None => Ok(state.clone()),
    }
}

/// Continuous vertical intent from the held keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Steer {
    Up,
    Down,
    Still,
}

#[derive(Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event seen on `frame`.
    pub fn record(&mut self, event: &KeyEvent, frame: u64) {
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(normalize(event.code), frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&normalize(event.code));
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Up wins when both directions are held.
    pub fn steer(&self, frame: u64) -> Steer {
        let up = self.is_held(KeyCode::Up, frame) || self.is_held(KeyCode::Char('w'), frame);
        let down = self.is_held(KeyCode::Down, frame) || self.is_held(KeyCode::Char('s'), frame);
        if up {
            Steer::Up
        } else if down {
            Steer::Down
        } else {
            Steer::Still
        }
    }
}

/// Fold letter case so Shift or Caps Lock don't change the binding.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
