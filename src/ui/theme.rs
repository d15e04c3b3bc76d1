//! Colors used by the terminal calculator.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug)]
pub struct CalculatorTheme {
    pub border: Color,
    pub title: Color,
    pub display: Color,
    pub display_flash: Color,
    pub history: Color,
    pub error: Color,
    pub digit: Color,
    pub operator: Color,
    pub action: Color,
    /// Equals button and the selected operator.
    pub accent: Color,
    pub accent_text: Color,
    pub footer: Color,
}

static THEME: CalculatorTheme = CalculatorTheme {
    border: Color::DarkGray,
    title: Color::Cyan,
    display: Color::White,
    display_flash: Color::LightCyan,
    history: Color::Gray,
    error: Color::LightRed,
    digit: Color::White,
    operator: Color::LightBlue,
    action: Color::LightMagenta,
    accent: Color::Cyan,
    accent_text: Color::Black,
    footer: Color::DarkGray,
};

pub fn theme() -> &'static CalculatorTheme {
    &THEME
}
