//! The presentation side of the calculator.
//!
//! The state machine never renders anything itself. It reports what should
//! be shown through [`PresentationSink`], which lets the same machine drive
//! the terminal UI or run headless.

use super::{Action, Operator};

/// Identity of an on-screen control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The display container.
    Display,
    Digit(char),
    Operator(Operator),
    Action(Action),
}

/// Short-lived visual effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Display blink after a digit is entered.
    Flash,
    /// Display re-entry after a clear.
    Reenter,
    /// Pulse on the equals button after a calculation.
    Celebrate,
    /// Button press feedback.
    Press,
}

/// Receives render instructions from the state machine.
pub trait PresentationSink {
    fn set_display_text(&mut self, text: &str);

    fn set_history_text(&mut self, text: &str);

    fn set_error_marker(&mut self, on: bool);

    /// Mark one operator as selected, or none. Selecting one unselects the rest.
    fn set_active_operator(&mut self, operator: Option<Operator>);

    fn trigger_highlight(&mut self, target: Target);

    fn trigger_animation(&mut self, target: Target, animation: Animation);
}

/// One call received by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SinkCall {
    Display(String),
    History(String),
    ErrorMarker(bool),
    ActiveOperator(Option<Operator>),
    Highlight(Target),
    Animation(Target, Animation),
}

/// A sink that remembers what it was told.
///
/// Keeps the latest value of every persistent property plus the full call
/// log, which is what headless runs print and what tests assert on.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub display: String,
    pub history: String,
    pub error_marker: bool,
    pub active_operator: Option<Operator>,
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl RecordingSink {
    /// Forget the call log, keeping the current properties.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn animations(&self) -> impl Iterator<Item = (Target, Animation)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            SinkCall::Animation(target, animation) => Some((*target, *animation)),
            _ => None,
        })
    }

    pub fn highlights(&self) -> impl Iterator<Item = Target> + '_ {
        self.calls.iter().filter_map(|call| match call {
            SinkCall::Highlight(target) => Some(*target),
            _ => None,
        })
    }
}

impl PresentationSink for RecordingSink {
    fn set_display_text(&mut self, text: &str) {
        self.display = text.to_string();
        self.calls.push(SinkCall::Display(text.to_string()));
    }

    fn set_history_text(&mut self, text: &str) {
        self.history = text.to_string();
        self.calls.push(SinkCall::History(text.to_string()));
    }

    fn set_error_marker(&mut self, on: bool) {
        self.error_marker = on;
        self.calls.push(SinkCall::ErrorMarker(on));
    }

    fn set_active_operator(&mut self, operator: Option<Operator>) {
        self.active_operator = operator;
        self.calls.push(SinkCall::ActiveOperator(operator));
    }

    fn trigger_highlight(&mut self, target: Target) {
        self.calls.push(SinkCall::Highlight(target));
    }

    fn trigger_animation(&mut self, target: Target, animation: Animation) {
        self.calls.push(SinkCall::Animation(target, animation));
    }
}
