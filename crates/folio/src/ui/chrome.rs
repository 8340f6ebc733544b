//! Navigation bar and footer.

use chrono::{Datelike, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{LineGauge, Tabs},
};

use super::{accent, muted, text};
use crate::app::Section;

/// Columns for the brand: its characters plus padding, saturating at
/// `u16::MAX`.
fn brand_width(brand: &str) -> u16 {
    u16::try_from(brand.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(3)
}

/// Top bar: brand, section tabs and a progress gauge.
pub fn render_nav(frame: &mut Frame, area: Rect, brand: &str, active: Section) {
    let [brand_area, tabs_area, gauge_area] = Layout::horizontal([
        Constraint::Length(brand_width(brand)),
        Constraint::Fill(1),
        Constraint::Length(14),
    ])
    .areas(area);

    frame.render_widget(
        Line::from(vec![" ".into(), Span::styled(brand, Style::new().fg(accent()).bold())]),
        brand_area,
    );

    let titles = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())));
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(muted())
        .highlight_style(Style::new().fg(accent()).bold())
        .divider("·");
    frame.render_widget(tabs, tabs_area);

    let ratio = (active.index() + 1) as f64 / Section::ALL.len() as f64;
    let gauge = LineGauge::default()
        .filled_style(Style::new().fg(accent()))
        .unfilled_style(muted())
        .label("")
        .ratio(ratio);
    frame.render_widget(gauge, gauge_area);
}

/// Footer: copyright line and key hints.
pub fn render_footer(frame: &mut Frame, area: Rect, owner: &str, hints: &[(&str, &str)]) {
    let year = Local::now().year();
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).areas(area);
    frame.render_widget(
        Line::styled(format!(" © {year} {owner}"), muted()),
        left,
    );

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(*key, Style::new().fg(accent()).bold()));
        spans.push(Span::styled(format!(" {label}  "), text().dim()));
    }
    frame.render_widget(Line::from(spans).right_aligned(), right);
}
