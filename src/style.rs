//! Row styling for select lists
//!
//! Bundles the ratatui styles a grid uses when drawing its rows. The
//! defaults follow the Catppuccin Mocha palette.

use ratatui::style::{Modifier, Style};

/// Catppuccin Mocha color palette
mod colors {
    use ratatui::style::Color;

    pub const BASE: Color = Color::Rgb(30, 30, 46);
    pub const SURFACE1: Color = Color::Rgb(69, 71, 90);
    pub const TEXT: Color = Color::Rgb(205, 214, 244);
    pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
    pub const BLUE: Color = Color::Rgb(137, 180, 250);
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);
}

/// Styles for the row kinds of a select list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStyle {
    /// Fill for blanked rows
    pub base: Style,
    /// Ordinary item rows
    pub button: Style,
    /// The row currently holding input focus
    pub focus: Style,
    /// The master control row
    pub master: Style,
    /// Separator rows
    pub separator: Style,
    /// Previous/next page rows
    pub nav: Style,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            base: Style::default().bg(colors::BASE),
            button: Style::default().fg(colors::TEXT).bg(colors::BASE),
            focus: Style::default()
                .fg(colors::BLUE)
                .bg(colors::SURFACE1)
                .add_modifier(Modifier::BOLD),
            master: Style::default()
                .fg(colors::MAUVE)
                .bg(colors::BASE)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(colors::SUBTEXT0).bg(colors::BASE),
            nav: Style::default().fg(colors::SUBTEXT0).bg(colors::BASE),
        }
    }
}
