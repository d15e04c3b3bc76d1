//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::calculator::{Calculator, Command, Operator, PresentationSink};

/// A key the calculator understands, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
}

impl Key {
    /// Convert a crossterm key press. Releases, repeats of modified keys and
    /// Ctrl/Alt chords are not calculator keys.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match event.code {
            KeyCode::Char(c) => Some(Self::Char(c)),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Esc => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Map a key to the operation it triggers, if any.
pub fn command_for_key(key: Key) -> Option<Command> {
    match key {
        Key::Char(c @ ('0'..='9' | '.')) => Some(Command::Digit(c)),
        Key::Char('=') | Key::Enter => Some(Command::Evaluate),
        Key::Char('%') => Some(Command::Percent),
        Key::Char(c) => Operator::from_key(c).map(Command::Operator),
        Key::Backspace => Some(Command::Delete),
        Key::Escape => Some(Command::Clear),
    }
}

/// Dispatch a key press and highlight the control it belongs to.
///
/// Returns `false` for unmapped keys, which are ignored.
pub fn press_key<S: PresentationSink>(calculator: &mut Calculator<S>, key: Key) -> bool {
    let Some(command) = command_for_key(key) else {
        tracing::trace!(?key, "unmapped key");
        return false;
    };

    calculator.dispatch(command);
    calculator.sink_mut().trigger_highlight(command.target());
    true
}
