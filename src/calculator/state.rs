//! The calculator's logical state.

use super::Operator;

/// The left operand together with the operator waiting for a right operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingOperation {
    pub operand: String,
    pub operator: Operator,
}

/// All state owned by the input state machine.
///
/// A pending operator always comes with its left operand, so both live in
/// one `Option`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculatorState {
    /// Number being typed or the last result, in display form.
    pub current_value: String,
    pub pending: Option<PendingOperation>,
    /// The next digit starts a new number instead of extending this one.
    pub awaiting_fresh_entry: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_value: "0".to_string(),
            pending: None,
            awaiting_fresh_entry: false,
        }
    }
}

impl CalculatorState {
    /// Left operand of the pending operation, or `""` when there is none.
    pub fn previous_value(&self) -> &str {
        self.pending.as_ref().map_or("", |p| p.operand.as_str())
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    /// The history line: `"<operand> <operator>"` or empty.
    pub fn history_text(&self) -> String {
        match &self.pending {
            Some(p) if !p.operand.is_empty() => format!("{} {}", p.operand, p.operator),
            _ => String::new(),
        }
    }
}
