//! Hero section: name banner, tagline and the node graph.

use folio_background::{AuroraWidget, Surface, container_for, draw_node_graph};
use folio_core::Profile;
use folio_fonts::{GLYPH_HEIGHT, fit_banner};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use super::{BASE, accent, heading, muted, text};

/// Offscreen surface for the node graph, reallocated when its area changes.
#[derive(Debug, Default)]
pub struct GraphPanel {
    area: Rect,
    surface: Option<Surface>,
}

impl GraphPanel {
    fn surface_for(&mut self, area: Rect) -> Option<&mut Surface> {
        if self.area != area || self.surface.is_none() {
            let container = container_for(area);
            self.surface = Surface::new(container.width, container.height, 1.0);
            self.area = area;
        }
        self.surface.as_mut()
    }

    /// Draw the graph at time `t` and present it in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, t: f32) {
        match self.surface_for(area) {
            Some(surface) => {
                draw_node_graph(surface, t);
                frame.render_widget(AuroraWidget::new(Some(&*surface), BASE), area);
            }
            None => frame.render_widget(AuroraWidget::new(None, BASE), area),
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, profile: &Profile, graph: &mut GraphPanel, t: f32) {
    let banner = fit_banner(&profile.name, area.width.saturating_sub(2) as usize);
    let banner_height = if banner.is_empty() { 1 } else { GLYPH_HEIGHT as u16 };

    let [_, banner_area, _, info_area, _, graph_area, hint_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(banner_height),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let banner_lines: Vec<Line> = if banner.is_empty() {
        vec![Line::styled(profile.name.as_str(), heading())]
    } else {
        banner
            .into_iter()
            .map(|l| Line::from(l).style(Style::new().fg(accent())))
            .collect()
    };
    frame.render_widget(
        Paragraph::new(banner_lines).alignment(Alignment::Center),
        banner_area,
    );

    let info = vec![
        Line::styled(profile.role.as_str(), text().bold()),
        Line::styled(profile.tagline.as_str(), text()),
        Line::styled(profile.location.as_str(), muted()),
    ];
    frame.render_widget(
        Paragraph::new(info)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        info_area,
    );

    let [_, graph_box, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(50),
        Constraint::Fill(1),
    ])
    .areas(graph_area);
    graph.render(frame, graph_box, t);

    frame.render_widget(
        Line::styled("Enter: see projects", muted()).centered(),
        hint_area,
    );
}
