//! The input state machine.
//!
//! [`Calculator`] owns the [`CalculatorState`] and a [`PresentationSink`].
//! Every operation runs to completion, mutates the state, and then tells
//! the sink what to show. The only timed transition is the error display
//! after a division by zero, driven by [`Calculator::tick`].

use std::time::{Duration, Instant};

use super::number::{display_text, format_number, parse_number, round_result};
use super::{
    Action, Animation, CalculatorState, Command, Operator, PendingOperation, PresentationSink,
    Target,
};

/// Text shown while the error marker is up.
pub const ERROR_TEXT: &str = "Error";

/// How long the error stays on screen by default.
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalculatorOptions {
    /// Time between a division by zero and the automatic clear.
    pub error_display: Duration,
    /// Keep accepting input while "Error" is shown. Clear is always accepted.
    pub allow_input_during_error: bool,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            error_display: DEFAULT_ERROR_DISPLAY,
            allow_input_during_error: false,
        }
    }
}

pub struct Calculator<S> {
    state: CalculatorState,
    sink: S,
    options: CalculatorOptions,
    /// Set while the error is displayed; the automatic clear fires here.
    error_deadline: Option<Instant>,
}

impl<S: PresentationSink> Calculator<S> {
    /// Create a calculator in its initial state and render it once.
    pub fn new(sink: S, options: CalculatorOptions) -> Self {
        let mut calculator = Self {
            state: CalculatorState::default(),
            sink,
            options,
            error_deadline: None,
        };
        calculator.render_display();
        calculator.render_history();
        calculator
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_error(&self) -> bool {
        self.error_deadline.is_some()
    }

    pub fn error_deadline(&self) -> Option<Instant> {
        self.error_deadline
    }

    /// Run the operation a command stands for.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Digit(d) => self.digit(d),
            Command::Operator(op) => self.choose_operator(op),
            Command::Evaluate => self.evaluate(),
            Command::Delete => self.delete_last_char(),
            Command::Clear => self.clear(),
            Command::Percent => self.percent(),
        }
    }

    /// Append a digit or decimal point to the current number.
    pub fn digit(&mut self, d: char) {
        if self.input_blocked("digit") {
            return;
        }
        if !(d.is_ascii_digit() || d == '.') {
            tracing::debug!(?d, "ignoring non-digit input");
            return;
        }

        let state = &mut self.state;
        if d == '.' && state.current_value.contains('.') {
            return;
        }

        if state.awaiting_fresh_entry {
            state.current_value = if d == '.' {
                "0.".to_string()
            } else {
                d.to_string()
            };
            state.awaiting_fresh_entry = false;
        } else if state.current_value == "0" && d != '.' {
            state.current_value = d.to_string();
        } else {
            state.current_value.push(d);
        }

        tracing::trace!(value = %self.state.current_value, "digit entered");
        self.render_display();
        self.sink.trigger_animation(Target::Display, Animation::Flash);
    }

    /// Select the operator for the next operand.
    ///
    /// A pending operation is evaluated first, so `3 + 4 ×` continues
    /// from 7.
    pub fn choose_operator(&mut self, operator: Operator) {
        if self.input_blocked("operator") {
            return;
        }
        if self.state.current_value.is_empty() {
            return;
        }

        if self.state.pending.is_some() {
            self.evaluate();
            if self.input_blocked("operator") {
                return;
            }
        }

        tracing::debug!(operand = %self.state.current_value, %operator, "operator chosen");
        self.state.pending = Some(PendingOperation {
            operand: self.state.current_value.clone(),
            operator,
        });
        self.state.awaiting_fresh_entry = true;
        self.render_history();
        self.sink.set_active_operator(Some(operator));
    }

    /// Apply the pending operation.
    pub fn evaluate(&mut self) {
        if self.input_blocked("evaluate") {
            return;
        }
        let Some(pending) = &self.state.pending else {
            return;
        };

        let (Some(lhs), Some(rhs)) = (
            parse_number(&pending.operand),
            parse_number(&self.state.current_value),
        ) else {
            tracing::debug!(
                lhs = %pending.operand,
                rhs = %self.state.current_value,
                "operands do not parse, nothing to evaluate"
            );
            return;
        };

        let operator = pending.operator;
        if operator == Operator::Divide && rhs == 0.0 {
            self.enter_error();
            return;
        }

        let result = round_result(operator.apply(lhs, rhs));
        tracing::debug!(lhs, %operator, rhs, result, "evaluated");

        self.state.current_value = format_number(result);
        self.state.pending = None;
        self.state.awaiting_fresh_entry = true;

        self.render_display();
        self.render_history();
        self.sink.set_active_operator(None);
        self.sink
            .trigger_animation(Target::Action(Action::Equals), Animation::Celebrate);
    }

    /// Reset to the initial state. Also dismisses a displayed error.
    pub fn clear(&mut self) {
        if self.error_deadline.take().is_some() {
            self.sink.set_error_marker(false);
        }

        self.state = CalculatorState::default();
        tracing::debug!("cleared");

        self.render_display();
        self.render_history();
        self.sink.set_active_operator(None);
        self.sink.trigger_animation(Target::Display, Animation::Reenter);
    }

    /// Drop the last character of the current number, never leaving it empty.
    pub fn delete_last_char(&mut self) {
        if self.input_blocked("delete") {
            return;
        }

        let value = &mut self.state.current_value;
        if value.chars().count() <= 1 {
            *value = "0".to_string();
        } else {
            value.pop();
        }
        self.render_display();
    }

    /// Divide the current number by 100.
    pub fn percent(&mut self) {
        if self.input_blocked("percent") {
            return;
        }
        let Some(value) = parse_number(&self.state.current_value) else {
            return;
        };

        self.state.current_value = format_number(value / 100.0);
        self.render_display();
    }

    /// Advance the clock. Clears the calculator once the error has been
    /// shown long enough.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.error_deadline
            && now >= deadline
        {
            tracing::debug!("error display elapsed");
            self.clear();
        }
    }

    fn enter_error(&mut self) {
        tracing::warn!(
            dividend = %self.state.previous_value(),
            "division by zero"
        );
        // A repeated error keeps the first deadline.
        if self.error_deadline.is_none() {
            self.error_deadline = Some(Instant::now() + self.options.error_display);
        }
        self.sink.set_display_text(ERROR_TEXT);
        self.sink.set_error_marker(true);
    }

    fn input_blocked(&self, operation: &'static str) -> bool {
        let blocked = self.error_deadline.is_some() && !self.options.allow_input_during_error;
        if blocked {
            tracing::debug!(operation, "input ignored while error is shown");
        }
        blocked
    }

    fn render_display(&mut self) {
        self.sink
            .set_display_text(&display_text(&self.state.current_value));
    }

    fn render_history(&mut self) {
        self.sink.set_history_text(&self.state.history_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{RecordingSink, SinkCall};

    fn calculator() -> Calculator<RecordingSink> {
        Calculator::new(RecordingSink::new(), CalculatorOptions::default())
    }

    fn press(calc: &mut Calculator<RecordingSink>, keys: &str) {
        for key in keys.chars() {
            match key {
                '=' => calc.evaluate(),
                '%' => calc.percent(),
                '<' => calc.delete_last_char(),
                'C' => calc.clear(),
                _ => match Operator::from_key(key) {
                    Some(op) => calc.choose_operator(op),
                    None => calc.digit(key),
                },
            }
        }
    }

    /// Move the clock to the error deadline plus `extra`.
    fn after_error(calc: &Calculator<RecordingSink>, extra: Duration) -> Instant {
        calc.error_deadline().expect("error should be shown") + extra
    }

    #[test]
    fn test_new_renders_initial_state() {
        let calc = calculator();
        assert_eq!(calc.state(), &CalculatorState::default());
        assert_eq!(calc.sink().display, "0");
        assert_eq!(calc.sink().history, "");
    }

    #[test]
    fn test_digits_accumulate() {
        let mut calc = calculator();
        press(&mut calc, "12.5");
        assert_eq!(calc.state().current_value, "12.5");
        assert_eq!(calc.sink().display, "12.5");
    }

    #[test]
    fn test_leading_zero_collapses() {
        let mut calc = calculator();
        press(&mut calc, "007");
        assert_eq!(calc.state().current_value, "7");

        let mut calc = calculator();
        press(&mut calc, "0.05");
        assert_eq!(calc.state().current_value, "0.05");
    }

    #[test]
    fn test_second_decimal_point_rejected() {
        let mut calc = calculator();
        press(&mut calc, "1.2.3.");
        assert_eq!(calc.state().current_value, "1.23");
        assert_eq!(calc.state().current_value.matches('.').count(), 1);
    }

    #[test]
    fn test_digit_flashes_display() {
        let mut calc = calculator();
        calc.sink_mut().clear_calls();
        calc.digit('4');
        assert_eq!(
            calc.sink().animations().collect::<Vec<_>>(),
            vec![(Target::Display, Animation::Flash)]
        );
    }

    #[test]
    fn test_fresh_entry_after_operator() {
        let mut calc = calculator();
        press(&mut calc, "3+");
        assert!(calc.state().awaiting_fresh_entry);
        assert_eq!(calc.sink().history, "3 +");

        calc.digit('.');
        assert_eq!(calc.state().current_value, "0.");
        assert!(!calc.state().awaiting_fresh_entry);
    }

    #[test]
    fn test_fresh_entry_after_result() {
        let mut calc = calculator();
        press(&mut calc, "3+4=5");
        assert_eq!(calc.state().current_value, "5");
    }

    #[test]
    fn test_operator_chaining() {
        let mut calc = calculator();
        press(&mut calc, "3+4*");
        assert_eq!(calc.state().current_value, "7");
        assert_eq!(calc.sink().history, "7 ×");

        press(&mut calc, "2=");
        assert_eq!(calc.state().current_value, "14");
        assert_eq!(calc.state().pending, None);
        assert_eq!(calc.sink().history, "");
    }

    #[test]
    fn test_basic_operations() {
        for (keys, expected) in [
            ("7-10=", "-3"),
            ("6*7=", "42"),
            ("9/4=", "2.25"),
            ("0.1+0.2=", "0.3"),
        ] {
            let mut calc = calculator();
            press(&mut calc, keys);
            assert_eq!(calc.state().current_value, expected, "keys: {keys}");
        }
    }

    #[test]
    fn test_rounding_to_eight_places() {
        let mut calc = calculator();
        press(&mut calc, "1/3=");
        assert_eq!(calc.state().current_value, "0.33333333");
    }

    #[test]
    fn test_long_result_uses_exponential_display() {
        let mut calc = calculator();
        press(&mut calc, "1234567*1000000=");
        assert_eq!(calc.state().current_value, "1234567000000");
        assert_eq!(calc.sink().display, "1.234567e+12");
    }

    #[test]
    fn test_evaluate_without_operator_is_noop() {
        let mut calc = calculator();
        press(&mut calc, "42");
        let before = calc.state().clone();
        calc.sink_mut().clear_calls();

        calc.evaluate();

        assert_eq!(calc.state(), &before);
        assert!(calc.sink().calls.is_empty());
    }

    #[test]
    fn test_evaluate_with_unparsable_operand_is_noop() {
        let mut calc = calculator();
        press(&mut calc, "5+2");
        calc.state.current_value = "-".to_string();
        let before = calc.state().clone();

        calc.evaluate();
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn test_operator_highlight_follows_selection() {
        let mut calc = calculator();
        press(&mut calc, "3+");
        assert_eq!(calc.sink().active_operator, Some(Operator::Add));
        press(&mut calc, "4-");
        assert_eq!(calc.sink().active_operator, Some(Operator::Subtract));
        press(&mut calc, "1=");
        assert_eq!(calc.sink().active_operator, None);
    }

    #[test]
    fn test_evaluate_celebrates() {
        let mut calc = calculator();
        press(&mut calc, "2+2");
        calc.sink_mut().clear_calls();
        calc.evaluate();
        assert!(
            calc.sink()
                .animations()
                .any(|a| a == (Target::Action(Action::Equals), Animation::Celebrate))
        );
    }

    #[test]
    fn test_division_by_zero_shows_error() {
        let mut calc = calculator();
        press(&mut calc, "5/0=");

        assert!(calc.is_error());
        assert_eq!(calc.sink().display, ERROR_TEXT);
        assert!(calc.sink().error_marker);
        assert_eq!(calc.state().previous_value(), "5");
        assert_eq!(calc.state().pending_operator(), Some(Operator::Divide));
    }

    #[test]
    fn test_error_clears_after_deadline() {
        let mut calc = calculator();
        press(&mut calc, "5/0=");

        calc.tick(after_error(&calc, Duration::ZERO) - Duration::from_millis(1));
        assert!(calc.is_error());
        assert_eq!(calc.sink().display, ERROR_TEXT);

        calc.tick(after_error(&calc, Duration::ZERO));
        assert!(!calc.is_error());
        assert!(!calc.sink().error_marker);
        assert_eq!(calc.state(), &CalculatorState::default());
        assert_eq!(calc.sink().display, "0");
    }

    #[test]
    fn test_error_uses_configured_duration() {
        let options = CalculatorOptions {
            error_display: Duration::from_millis(300),
            ..CalculatorOptions::default()
        };
        let mut calc = Calculator::new(RecordingSink::new(), options);
        let before = Instant::now();
        press(&mut calc, "1/0=");
        let deadline = calc.error_deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(300));
        assert!(deadline < before + DEFAULT_ERROR_DISPLAY);
    }

    #[test]
    fn test_default_error_window_is_1500ms() {
        assert_eq!(DEFAULT_ERROR_DISPLAY, Duration::from_millis(1500));

        let mut calc = calculator();
        let before = Instant::now();
        press(&mut calc, "5/0=");
        let after = Instant::now();

        let deadline = calc.error_deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(1500));
        assert!(deadline <= after + Duration::from_millis(1500));

        calc.tick(deadline);
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_repeated_error_keeps_first_deadline() {
        let options = CalculatorOptions {
            allow_input_during_error: true,
            ..CalculatorOptions::default()
        };
        let mut calc = Calculator::new(RecordingSink::new(), options);
        press(&mut calc, "5/0=");
        let first = calc.error_deadline().unwrap();

        std::thread::sleep(Duration::from_millis(20));
        press(&mut calc, "=");
        press(&mut calc, "+");
        assert_eq!(calc.error_deadline(), Some(first));

        calc.tick(first);
        assert!(!calc.is_error());
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_input_blocked_during_error() {
        let mut calc = calculator();
        press(&mut calc, "5/0=");
        let before = calc.state().clone();
        calc.sink_mut().clear_calls();

        press(&mut calc, "7+=%<");

        assert_eq!(calc.state(), &before);
        assert!(calc.sink().calls.is_empty());
        assert_eq!(calc.sink().display, ERROR_TEXT);
    }

    #[test]
    fn test_chained_division_by_zero_stops_operator() {
        let mut calc = calculator();
        press(&mut calc, "5/0+");
        assert!(calc.is_error());
        assert_eq!(calc.state().pending_operator(), Some(Operator::Divide));
    }

    #[test]
    fn test_input_allowed_during_error_when_configured() {
        let options = CalculatorOptions {
            allow_input_during_error: true,
            ..CalculatorOptions::default()
        };
        let mut calc = Calculator::new(RecordingSink::new(), options);
        press(&mut calc, "5/0=");
        press(&mut calc, "7");

        assert_eq!(calc.state().current_value, "7");
        assert_eq!(calc.sink().display, "7");
        assert!(calc.sink().error_marker);

        calc.tick(after_error(&calc, Duration::from_millis(1)));
        assert_eq!(calc.state(), &CalculatorState::default());
        assert!(!calc.sink().error_marker);
    }

    #[test]
    fn test_clear_dismisses_error() {
        let mut calc = calculator();
        press(&mut calc, "5/0=");
        calc.clear();

        assert!(!calc.is_error());
        assert!(!calc.sink().error_marker);
        assert_eq!(calc.state(), &CalculatorState::default());
        assert!(calc.sink().calls.contains(&SinkCall::ErrorMarker(false)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut calc = calculator();
        press(&mut calc, "12.5*3");
        calc.clear();
        let once = calc.state().clone();
        calc.clear();

        assert_eq!(once, CalculatorState::default());
        assert_eq!(calc.state(), &once);
        assert_eq!(calc.sink().history, "");
        assert_eq!(calc.sink().active_operator, None);
    }

    #[test]
    fn test_clear_reenters_display() {
        let mut calc = calculator();
        calc.sink_mut().clear_calls();
        calc.clear();
        assert!(
            calc.sink()
                .animations()
                .any(|a| a == (Target::Display, Animation::Reenter))
        );
    }

    #[test]
    fn test_delete_last_char() {
        let mut calc = calculator();
        press(&mut calc, "123");
        calc.delete_last_char();
        assert_eq!(calc.state().current_value, "12");
        calc.delete_last_char();
        calc.delete_last_char();
        assert_eq!(calc.state().current_value, "0");
        calc.delete_last_char();
        assert_eq!(calc.state().current_value, "0");
    }

    #[test]
    fn test_delete_keeps_pending_operation() {
        let mut calc = calculator();
        press(&mut calc, "8*12<");
        assert_eq!(calc.state().current_value, "1");
        assert_eq!(calc.state().previous_value(), "8");
        assert_eq!(calc.state().pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_percent() {
        let mut calc = calculator();
        press(&mut calc, "50%");
        assert_eq!(calc.state().current_value, "0.5");
    }

    #[test]
    fn test_percent_keeps_pending_operation() {
        let mut calc = calculator();
        press(&mut calc, "200+10%");
        assert_eq!(calc.state().current_value, "0.1");
        assert_eq!(calc.sink().history, "200 +");
        press(&mut calc, "=");
        assert_eq!(calc.state().current_value, "200.1");
    }

    #[test]
    fn test_percent_of_fraction() {
        let mut calc = calculator();
        press(&mut calc, "0.5%");
        assert_eq!(calc.state().current_value, "0.005");
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let mut calc = calculator();
        for command in [
            Command::Digit('9'),
            Command::Operator(Operator::Subtract),
            Command::Digit('4'),
            Command::Evaluate,
            Command::Percent,
        ] {
            calc.dispatch(command);
        }
        assert_eq!(calc.state().current_value, "0.05");
        calc.dispatch(Command::Delete);
        assert_eq!(calc.state().current_value, "0.0");
        calc.dispatch(Command::Clear);
        assert_eq!(calc.state(), &CalculatorState::default());
    }
}
