//! The terminal presentation sink.
//!
//! Keeps what the state machine last asked to show, plus the transient
//! effects. Each effect is a timed entry: triggering it again restarts its
//! timer and expired entries are pruned on every tick.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::calculator::{Animation, Operator, PresentationSink, Target};

/// How long status messages stay in the footer.
const STATUS_DURATION: Duration = Duration::from_secs(2);

/// A transient effect on a control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Keyboard press feedback.
    Highlight,
    Animation(Animation),
}

impl Effect {
    pub fn duration(self) -> Duration {
        match self {
            Self::Highlight | Self::Animation(Animation::Press) => Duration::from_millis(100),
            Self::Animation(Animation::Flash) => Duration::from_millis(150),
            Self::Animation(Animation::Celebrate) => Duration::from_millis(200),
            Self::Animation(Animation::Reenter) => Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Default)]
pub struct TerminalSink {
    display: String,
    history: String,
    error: bool,
    active_operator: Option<Operator>,
    effects: HashMap<(Target, Effect), Instant>,
    status: Option<(String, Instant)>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn active_operator(&self) -> Option<Operator> {
        self.active_operator
    }

    /// Start an effect, restarting its timer if it is already running.
    pub fn start_effect(&mut self, target: Target, effect: Effect, now: Instant) {
        self.effects.insert((target, effect), now + effect.duration());
    }

    /// Start `effect` on each target in turn, each one `step` after the last.
    pub fn stagger_effect(
        &mut self,
        targets: impl IntoIterator<Item = Target>,
        effect: Effect,
        step: Duration,
        now: Instant,
    ) {
        let mut start = now;
        for target in targets {
            self.start_effect(target, effect, start);
            start += step;
        }
    }

    /// Stop every effect on `target`.
    pub fn cancel_effects(&mut self, target: Target) {
        self.effects.retain(|(t, _), _| *t != target);
    }

    pub fn is_active(&self, target: Target, effect: Effect, now: Instant) -> bool {
        self.effects
            .get(&(target, effect))
            .is_some_and(|until| now < *until)
    }

    /// Whether the control shows press feedback, from a key or a click.
    pub fn is_pressed(&self, target: Target, now: Instant) -> bool {
        self.is_active(target, Effect::Highlight, now)
            || self.is_active(target, Effect::Animation(Animation::Press), now)
    }

    pub fn set_status(&mut self, message: impl Into<String>, now: Instant) {
        self.status = Some((message.into(), now + STATUS_DURATION));
    }

    pub fn status(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|(_, until)| now < *until)
            .map(|(message, _)| message.as_str())
    }

    /// Drop expired effects and status messages.
    pub fn prune(&mut self, now: Instant) {
        self.effects.retain(|_, until| now < *until);
        if self.status.as_ref().is_some_and(|(_, until)| now >= *until) {
            self.status = None;
        }
    }

    #[cfg(test)]
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

impl PresentationSink for TerminalSink {
    fn set_display_text(&mut self, text: &str) {
        self.display = text.to_string();
    }

    fn set_history_text(&mut self, text: &str) {
        self.history = text.to_string();
    }

    fn set_error_marker(&mut self, on: bool) {
        self.error = on;
        if on {
            self.cancel_effects(Target::Display);
        }
    }

    fn set_active_operator(&mut self, operator: Option<Operator>) {
        self.active_operator = operator;
    }

    fn trigger_highlight(&mut self, target: Target) {
        self.start_effect(target, Effect::Highlight, Instant::now());
    }

    fn trigger_animation(&mut self, target: Target, animation: Animation) {
        self.start_effect(target, Effect::Animation(animation), Instant::now());
    }
}
