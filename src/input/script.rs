//! Key scripts for headless runs.
//!
//! A script is a string of key characters. Named keys go in braces:
//! `{Enter}`, `{Backspace}`, `{Escape}`. `{Wait}` lets any pending error
//! display run out. Whitespace between keys is ignored.

use super::keymap::{Key, command_for_key, press_key};
use crate::calculator::{Calculator, PresentationSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    Press(Key),
    Wait,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown key {{{0}}}")]
    UnknownKey(String),
    #[error("unterminated '{{' at offset {0}")]
    Unterminated(usize),
    #[error("key {0:?} does nothing on the calculator")]
    Unmapped(char),
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    let mut chars = script.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c != '{' {
            let key = Key::Char(c);
            if command_for_key(key).is_none() {
                return Err(ScriptError::Unmapped(c));
            }
            steps.push(ScriptStep::Press(key));
            continue;
        }

        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(ScriptError::Unterminated(offset));
        }

        let step = match name.to_ascii_lowercase().as_str() {
            "enter" => ScriptStep::Press(Key::Enter),
            "backspace" => ScriptStep::Press(Key::Backspace),
            "escape" | "esc" => ScriptStep::Press(Key::Escape),
            "wait" => ScriptStep::Wait,
            _ => return Err(ScriptError::UnknownKey(name)),
        };
        steps.push(step);
    }

    Ok(steps)
}

/// Feed parsed steps to a calculator.
pub fn run_script<S: PresentationSink>(calculator: &mut Calculator<S>, steps: &[ScriptStep]) {
    for step in steps {
        match *step {
            ScriptStep::Press(key) => {
                press_key(calculator, key);
            }
            ScriptStep::Wait => {
                if let Some(deadline) = calculator.error_deadline() {
                    calculator.tick(deadline);
                }
            }
        }
    }
}
