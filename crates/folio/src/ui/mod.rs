//! Section renderers. Text is drawn without a background so the aurora
//! shows through behind it.

pub mod about;
pub mod chrome;
pub mod contact;
pub mod home;
pub mod projects;

use folio_core::{ACCENT, Rgb};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};

/// Page background under the aurora.
pub const BASE: Rgb = Rgb::new(10, 10, 14);

pub fn accent() -> Color {
    ACCENT.to_color()
}

pub fn text() -> Style {
    Style::new().fg(Color::Rgb(235, 235, 240))
}

pub fn muted() -> Style {
    Style::new().fg(Color::Rgb(150, 150, 160))
}

pub fn heading() -> Style {
    Style::new().fg(accent()).bold()
}

/// A box of `width` x `height` percent centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
