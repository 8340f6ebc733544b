//! Project gallery with a category filter and a detail modal.

use folio_core::{CategoryFilter, Project, ProjectCategory};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{BASE, accent, centered, heading, muted, text};

fn filter_bar(filter: CategoryFilter) -> Line<'static> {
    let options = std::iter::once(CategoryFilter::All)
        .chain(ProjectCategory::ALL.into_iter().map(CategoryFilter::Only));
    let mut spans = vec![Span::styled("Filter ", muted())];
    for option in options {
        let style = if option == filter {
            Style::new().fg(accent()).bold().reversed()
        } else {
            muted()
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
        spans.push(" ".into());
    }
    spans.push(Span::styled("(f to change)", muted().italic()));
    Line::from(spans)
}

fn tech_line(project: &Project) -> Line<'_> {
    let mut spans = Vec::with_capacity(project.tech_stack.len() * 2);
    for (i, tech) in project.tech_stack.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", muted()));
        }
        spans.push(Span::styled(tech.as_str(), Style::new().fg(accent())));
    }
    Line::from(spans)
}

/// Gallery: filter bar, project list and a preview of the selection.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    projects: &[&Project],
    filter: CategoryFilter,
    selected: usize,
) {
    let [filter_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)])
            .margin(1)
            .spacing(1)
            .areas(area);
    frame.render_widget(filter_bar(filter), filter_area);

    if projects.is_empty() {
        frame.render_widget(
            Line::styled("No projects in this category yet.", muted()).centered(),
            body,
        );
        return;
    }

    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .spacing(2)
            .areas(body);

    let items: Vec<ListItem> = projects
        .iter()
        .map(|p| {
            ListItem::new(vec![
                Line::styled(p.title.as_str(), text().bold()),
                Line::styled(format!("  {}", p.category.label()), muted()),
            ])
        })
        .collect();
    let list = List::new(items)
        .highlight_symbol("▌ ")
        .highlight_style(Style::new().fg(accent()));
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, list_area, &mut state);

    if let Some(project) = projects.get(selected) {
        let preview = vec![
            Line::styled(project.title.as_str(), heading()),
            Line::default(),
            Line::styled(project.short_description.as_str(), text()),
            Line::default(),
            tech_line(project),
            Line::default(),
            Line::styled("Enter: details", muted()),
        ];
        frame.render_widget(
            Paragraph::new(preview).wrap(Wrap { trim: true }),
            preview_area,
        );
    }
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &'a str, body: &'a str) {
    if body.is_empty() {
        return;
    }
    lines.push(Line::styled(title, heading()));
    lines.push(Line::styled(body, text()));
    lines.push(Line::default());
}

fn bullets<'a>(lines: &mut Vec<Line<'a>>, title: &'a str, items: &'a [String]) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::styled(title, heading()));
    for item in items {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::new().fg(accent())),
            Span::styled(item.as_str(), text()),
        ]));
    }
    lines.push(Line::default());
}

/// Full-detail modal over the gallery.
pub fn render_modal(frame: &mut Frame, area: Rect, project: &Project) {
    let modal = centered(area, 80, 85);
    frame.render_widget(Clear, modal);

    let block = Block::bordered()
        .title(Line::styled(format!(" {} ", project.title), heading()))
        .title_bottom(Line::styled(" Esc: close  ←/→: browse ", muted()).right_aligned())
        .border_style(Style::new().fg(accent()))
        .style(Style::new().bg(BASE.to_color()));

    let mut lines = vec![
        Line::styled(project.category.label(), muted()),
        Line::default(),
    ];
    let description = if project.full_description.is_empty() {
        project.short_description.as_str()
    } else {
        project.full_description.as_str()
    };
    lines.push(Line::styled(description, text()));
    lines.push(Line::default());
    section(&mut lines, "Challenge", &project.challenge);
    section(&mut lines, "Solution", &project.solution);
    if !project.tech_stack.is_empty() {
        lines.push(Line::styled("Tech stack", heading()));
        lines.push(tech_line(project));
        lines.push(Line::default());
    }
    bullets(&mut lines, "Insights", &project.insights);
    bullets(&mut lines, "Next steps", &project.improvements);
    let links = project.links.entries();
    if !links.is_empty() {
        lines.push(Line::styled("Links", heading()));
        for (label, url) in links {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<7}"), muted()),
                Span::styled(url, text().underlined()),
            ]));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        modal,
    );
}
