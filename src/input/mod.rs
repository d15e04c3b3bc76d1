//! Input sources for the calculator.
//!
//! Keys from the terminal and from headless scripts are reduced to [`Key`],
//! mapped to a [`crate::calculator::Command`], and dispatched.

mod keymap;
mod script;

pub use keymap::{Key, press_key};
pub use script::{parse_script, run_script};
