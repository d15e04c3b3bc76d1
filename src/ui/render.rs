//! Drawing the calculator with ratatui.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::layout::{ButtonArea, button_areas};
use super::screen::{Effect, TerminalSink};
use super::theme::theme;
use crate::calculator::{Action, Animation, Command, Target};

const WIDTH: u16 = 34;
const HEIGHT: u16 = 22;

/// Draw the whole calculator. Returns the button areas for hit-testing.
pub fn render(frame: &mut Frame, sink: &TerminalSink, now: Instant) -> Vec<ButtonArea> {
    let t = theme();
    let area = centered(frame.area(), WIDTH, HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(t.border))
        .title(Span::styled(
            " zcalc ",
            Style::default().fg(t.title).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [history_area, display_area, grid_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_history(frame, sink, history_area);
    render_display(frame, sink, display_area, now);

    let buttons = button_areas(grid_area);
    for button in &buttons {
        render_button(frame, sink, button, now);
    }

    render_footer(frame, sink, footer_area, now);
    buttons
}

fn render_history(frame: &mut Frame, sink: &TerminalSink, area: Rect) {
    let history = Paragraph::new(sink.history())
        .alignment(Alignment::Right)
        .style(Style::default().fg(theme().history));
    frame.render_widget(history, area);
}

fn render_display(frame: &mut Frame, sink: &TerminalSink, area: Rect, now: Instant) {
    let t = theme();
    let flash = sink.is_active(Target::Display, Effect::Animation(Animation::Flash), now);
    let reenter = sink.is_active(Target::Display, Effect::Animation(Animation::Reenter), now);

    let mut style = Style::default().fg(t.display).add_modifier(Modifier::BOLD);
    if sink.is_error() {
        style = style.fg(t.error);
    } else if flash {
        style = style.fg(t.display_flash);
    }
    if reenter {
        style = style.add_modifier(Modifier::DIM);
    }

    let border = if sink.is_error() { t.error } else { t.border };
    let display = Paragraph::new(Line::from(Span::styled(sink.display(), style)))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(display, area);
}

fn render_button(frame: &mut Frame, sink: &TerminalSink, button: &ButtonArea, now: Instant) {
    let t = theme();
    let command = button.button.command;
    let target = command.target();

    let mut style = match command {
        Command::Digit(_) => Style::default().fg(t.digit),
        Command::Operator(_) => Style::default().fg(t.operator),
        Command::Evaluate => Style::default()
            .fg(t.accent)
            .add_modifier(Modifier::BOLD),
        Command::Delete | Command::Clear | Command::Percent => Style::default().fg(t.action),
    };

    if let Command::Operator(op) = command
        && sink.active_operator() == Some(op)
    {
        style = style.bg(t.accent).fg(t.accent_text);
    }
    if target == Target::Action(Action::Equals)
        && sink.is_active(target, Effect::Animation(Animation::Celebrate), now)
    {
        style = style.bg(t.accent).fg(t.accent_text);
    }
    if sink.is_pressed(target, now) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if sink.is_active(target, Effect::Animation(Animation::Reenter), now) {
        style = style.add_modifier(Modifier::DIM);
    }

    let widget = Paragraph::new(button.button.label())
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(t.border)),
        );
    frame.render_widget(widget, button.area);
}

fn render_footer(frame: &mut Frame, sink: &TerminalSink, area: Rect, now: Instant) {
    let text = sink
        .status(now)
        .unwrap_or("q quit · y copy · Esc clear");
    let footer = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme().footer));
    frame.render_widget(footer, area);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
