use folio_core::Portfolio;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{accent, heading, muted, text};

pub fn render(frame: &mut Frame, area: Rect, portfolio: &Portfolio) {
    let [intro_area, skills_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .margin(1)
            .spacing(2)
            .areas(area);

    let mut intro = vec![Line::styled("About me", heading()), Line::default()];
    for paragraph in &portfolio.profile.intro {
        intro.push(Line::styled(paragraph.as_str(), text()));
        intro.push(Line::default());
    }
    frame.render_widget(
        Paragraph::new(intro).wrap(Wrap { trim: true }),
        intro_area,
    );

    let mut skills = vec![Line::styled("What I do", heading()), Line::default()];
    for skill in &portfolio.skills {
        skills.push(Line::from(vec![
            Span::styled("▸ ", Style::new().fg(accent())),
            Span::styled(skill.label.as_str(), text().bold()),
        ]));
        skills.push(Line::styled(format!("  {}", skill.description), muted()));
    }
    if !portfolio.soft_skills.is_empty() {
        skills.push(Line::default());
        skills.push(Line::styled("Soft skills", heading()));
        let mut chips = Vec::new();
        for (i, s) in portfolio.soft_skills.iter().enumerate() {
            if i > 0 {
                chips.push(Span::styled(" · ", muted()));
            }
            chips.push(Span::styled(s.as_str(), text()));
        }
        skills.push(Line::from(chips));
    }
    frame.render_widget(
        Paragraph::new(skills).wrap(Wrap { trim: true }),
        skills_area,
    );
}
