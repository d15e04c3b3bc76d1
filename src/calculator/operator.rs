//! Binary operators and the commands that drive the calculator.

use std::fmt;

use super::Target;

/// One of the four arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol shown on buttons and in the history line.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Map a typed character to an operator.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | 'x' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operator. Division by zero is checked by the caller.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Non-numeric controls of the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Clear,
    Delete,
    Percent,
    Equals,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "C",
            Self::Delete => "⌫",
            Self::Percent => "%",
            Self::Equals => "=",
        }
    }
}

/// A single state machine operation, as produced by any input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A digit `0`-`9` or the decimal point.
    Digit(char),
    Operator(Operator),
    Evaluate,
    Delete,
    Clear,
    Percent,
}

impl Command {
    /// The on-screen control this command belongs to.
    pub fn target(self) -> Target {
        match self {
            Self::Digit(d) => Target::Digit(d),
            Self::Operator(op) => Target::Operator(op),
            Self::Evaluate => Target::Action(Action::Equals),
            Self::Delete => Target::Action(Action::Delete),
            Self::Clear => Target::Action(Action::Clear),
            Self::Percent => Target::Action(Action::Percent),
        }
    }
}
