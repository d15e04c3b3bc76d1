//! The interactive terminal calculator.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::events::spawn_reader;
use super::layout::{ButtonArea, ROWS, hit_test};
use super::render::render;
use super::screen::{Effect, TerminalSink};
use crate::calculator::{
    Animation, Calculator, CalculatorOptions, PresentationSink, copy_to_clipboard,
};

/// Delay between buttons fading in at startup.
const FADE_IN_STEP: Duration = Duration::from_millis(20);
use crate::input::{Key, press_key};

pub struct App {
    calculator: Calculator<TerminalSink>,
    /// Where the buttons were last drawn, for mouse hit-testing.
    buttons: Vec<ButtonArea>,
    tick: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(options: CalculatorOptions, tick: Duration) -> Self {
        let mut sink = TerminalSink::new();
        let targets = ROWS
            .iter()
            .flat_map(|row| row.iter())
            .map(|button| button.command.target());
        sink.stagger_effect(
            targets,
            Effect::Animation(Animation::Reenter),
            FADE_IN_STEP,
            Instant::now(),
        );

        Self {
            calculator: Calculator::new(sink, options),
            buttons: Vec::new(),
            tick,
            should_quit: false,
        }
    }

    /// Take over the terminal and run until the user quits.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        restoring(|| self.run_in_terminal(), restore_terminal)
    }

    fn run_in_terminal(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.event_loop(&mut terminal)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let events = spawn_reader()?;
        tracing::info!("calculator started");

        loop {
            let now = Instant::now();
            self.calculator.tick(now);
            self.calculator.sink_mut().prune(now);

            terminal.draw(|f| self.buttons = render(f, self.calculator.sink(), now))?;

            match events.recv_timeout(self.tick) {
                Ok(event) => self.handle_event(event),
                Err(flume::RecvTimeoutError::Timeout) => {}
                Err(flume::RecvTimeoutError::Disconnected) => bail!("Terminal input closed"),
            }

            if self.should_quit {
                break;
            }
        }

        tracing::info!("calculator closed");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('y') => self.copy_value(),
            _ => {
                if let Some(key) = Key::from_event(&key) {
                    press_key(&mut self.calculator, key);
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(command) = hit_test(&self.buttons, mouse.column, mouse.row) else {
            return;
        };

        self.calculator.dispatch(command);
        self.calculator
            .sink_mut()
            .trigger_animation(command.target(), Animation::Press);
    }

    /// Copy the current value to the clipboard.
    fn copy_value(&mut self) {
        let now = Instant::now();
        if self.calculator.is_error() {
            self.calculator.sink_mut().set_status("Nothing to copy", now);
            return;
        }

        let value = self.calculator.state().current_value.clone();
        match copy_to_clipboard(&value) {
            Ok(()) => {
                tracing::debug!(%value, "copied to clipboard");
                self.calculator
                    .sink_mut()
                    .set_status(format!("Copied {value}"), now);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.calculator
                    .sink_mut()
                    .set_status("Clipboard unavailable", now);
            }
        }
    }
}

/// Run `body`, then `restore` even when `body` failed. The body's error wins.
fn restoring<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

/// Leave raw mode and the alternate screen, whichever setup step was reached.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    let mut stdout = io::stdout();
    let screen = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, Show);
    raw?;
    screen?;
    Ok(())
}
