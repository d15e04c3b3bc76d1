//! The calculator core.
//!
//! This module provides:
//! - The input state machine ([`Calculator`]) and its state
//! - Operators, commands and number formatting
//! - The [`PresentationSink`] seam and a recording sink for headless use
//! - Copying the display to the clipboard

mod clipboard;
mod machine;
mod number;
mod operator;
mod sink;
mod state;

pub use clipboard::copy_to_clipboard;
pub use machine::{Calculator, CalculatorOptions, DEFAULT_ERROR_DISPLAY};
pub use operator::{Action, Command, Operator};
pub use sink::{Animation, PresentationSink, RecordingSink, Target};
pub use state::{CalculatorState, PendingOperation};

#[cfg(test)]
pub use machine::ERROR_TEXT;
#[cfg(test)]
pub use sink::SinkCall;
