//! The button grid and pointer hit-testing.

use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::calculator::{Action, Command, Operator};

/// Columns in the button grid.
const COLUMNS: u32 = 4;

/// A clickable control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub command: Command,
    /// Number of grid columns the button covers.
    pub span: u16,
}

impl Button {
    const fn new(command: Command) -> Self {
        Self { command, span: 1 }
    }

    const fn wide(command: Command) -> Self {
        Self { command, span: 2 }
    }

    pub fn label(&self) -> String {
        match self.command {
            Command::Digit(d) => d.to_string(),
            Command::Operator(op) => op.symbol().to_string(),
            Command::Evaluate => Action::Equals.label().to_string(),
            Command::Delete => Action::Delete.label().to_string(),
            Command::Clear => Action::Clear.label().to_string(),
            Command::Percent => Action::Percent.label().to_string(),
        }
    }
}

/// Button rows, top to bottom.
pub const ROWS: [&[Button]; 5] = [
    &[
        Button::new(Command::Clear),
        Button::new(Command::Delete),
        Button::new(Command::Percent),
        Button::new(Command::Operator(Operator::Divide)),
    ],
    &[
        Button::new(Command::Digit('7')),
        Button::new(Command::Digit('8')),
        Button::new(Command::Digit('9')),
        Button::new(Command::Operator(Operator::Multiply)),
    ],
    &[
        Button::new(Command::Digit('4')),
        Button::new(Command::Digit('5')),
        Button::new(Command::Digit('6')),
        Button::new(Command::Operator(Operator::Subtract)),
    ],
    &[
        Button::new(Command::Digit('1')),
        Button::new(Command::Digit('2')),
        Button::new(Command::Digit('3')),
        Button::new(Command::Operator(Operator::Add)),
    ],
    &[
        Button::wide(Command::Digit('0')),
        Button::new(Command::Digit('.')),
        Button::new(Command::Evaluate),
    ],
];

/// A button and where it was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonArea {
    pub button: Button,
    pub area: Rect,
}

/// Split `grid` into one area per button.
pub fn button_areas(grid: Rect) -> Vec<ButtonArea> {
    let row_areas = Layout::vertical([Constraint::Ratio(1, ROWS.len() as u32); ROWS.len()])
        .split(grid);

    let mut areas = Vec::new();
    for (row, row_area) in ROWS.iter().zip(row_areas.iter()) {
        let cells = Layout::horizontal([Constraint::Ratio(1, COLUMNS); COLUMNS as usize])
            .split(*row_area);

        let mut column = 0;
        for button in row.iter() {
            let first = cells[column];
            let last = cells[column + button.span as usize - 1];
            areas.push(ButtonArea {
                button: *button,
                area: first.union(last),
            });
            column += button.span as usize;
        }
    }
    areas
}

/// The command under a pointer position, if any.
pub fn hit_test(areas: &[ButtonArea], column: u16, row: u16) -> Option<Command> {
    let position = Position::new(column, row);
    areas
        .iter()
        .find(|b| b.area.contains(position))
        .map(|b| b.button.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_fill_the_grid() {
        for row in ROWS {
            let width: u16 = row.iter().map(|b| b.span).sum();
            assert_eq!(width, COLUMNS as u16);
        }
    }

    #[test]
    fn test_every_command_has_a_button() {
        let areas = button_areas(Rect::new(0, 0, 40, 15));
        assert_eq!(areas.len(), 19);
        for command in [
            Command::Clear,
            Command::Delete,
            Command::Percent,
            Command::Evaluate,
            Command::Digit('.'),
        ] {
            assert!(areas.iter().any(|b| b.button.command == command));
        }
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert!(areas.iter().any(|b| b.button.command == Command::Operator(op)));
        }
    }

    #[test]
    fn test_hit_test() {
        let areas = button_areas(Rect::new(0, 0, 40, 15));
        assert_eq!(hit_test(&areas, 1, 1), Some(Command::Clear));
        assert_eq!(
            hit_test(&areas, 39, 1),
            Some(Command::Operator(Operator::Divide))
        );
        assert_eq!(hit_test(&areas, 39, 14), Some(Command::Evaluate));
        assert_eq!(hit_test(&areas, 40, 14), None);
    }

    #[test]
    fn test_wide_zero_button() {
        let areas = button_areas(Rect::new(0, 0, 40, 15));
        assert_eq!(hit_test(&areas, 2, 13), Some(Command::Digit('0')));
        assert_eq!(hit_test(&areas, 15, 13), Some(Command::Digit('0')));
        assert_eq!(hit_test(&areas, 25, 13), Some(Command::Digit('.')));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Button::new(Command::Delete).label(), "⌫");
        assert_eq!(Button::new(Command::Operator(Operator::Multiply)).label(), "×");
        assert_eq!(Button::new(Command::Digit('7')).label(), "7");
    }
}
