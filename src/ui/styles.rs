use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};

/// Accent color used for the heading and the committed selection.
pub const ACCENT: Color = Color::Indexed(208);

/// Line colour of the price dataset.
pub const SERIES_COLOR: Color = Color::Rgb(75, 192, 192);

pub fn header_text<'a>(text: impl Into<Cow<'a, str>>) -> Text<'a> {
    let owned = text.into().into_owned();
    Text::from(owned.bold().fg(ACCENT))
}

/// Dimmed line for hints and footers.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

pub fn error_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.fg(Color::Red).bold())
}

pub fn selection_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn highlight_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
