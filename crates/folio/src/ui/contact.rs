use folio_core::{ContactField, SubmitStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

use super::{accent, heading, muted, text};
use crate::contact::ContactForm;

const FIELDS: [ContactField; 3] = [ContactField::Name, ContactField::Email, ContactField::Message];

fn status_line(status: &SubmitStatus) -> Line<'_> {
    match status {
        SubmitStatus::Idle => Line::default(),
        SubmitStatus::Sending => Line::styled("Sending…", Style::new().fg(Color::Yellow)),
        SubmitStatus::Success(msg) => Line::styled(msg.as_str(), Style::new().fg(Color::Green)),
        SubmitStatus::Error(msg) => Line::styled(msg.as_str(), Style::new().fg(Color::Red)),
    }
}

pub fn render(frame: &mut Frame, area: Rect, form: &ContactForm, typing: bool) {
    let [intro_area, name_area, email_area, message_area, status_area, hint_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .horizontal_margin(4)
        .vertical_margin(1)
        .areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::styled("Get in touch", heading()),
            Line::styled(
                "Have a project in mind or just want to say hi? Drop a message.",
                text(),
            ),
        ])
        .wrap(Wrap { trim: true }),
        intro_area,
    );

    for (field, field_area) in FIELDS.into_iter().zip([name_area, email_area, message_area]) {
        let focused = typing && form.focus() == field;
        let border = if focused {
            Style::new().fg(accent())
        } else {
            muted()
        };
        let mut value = form.fields().get(field).to_string();
        if focused {
            value.push('▏');
        }
        let block = Block::bordered()
            .title(Line::styled(format!(" {} ", field.label()), border.bold()))
            .border_style(border);
        frame.render_widget(
            Paragraph::new(value)
                .style(text())
                .block(block)
                .wrap(Wrap { trim: false }),
            field_area,
        );
    }

    frame.render_widget(status_line(form.status()), status_area);

    let hint = if typing {
        "Tab: next field  Enter on Message or Ctrl-S: send  Esc: stop typing"
    } else if form.has_endpoint() {
        "Enter: start typing"
    } else {
        "Enter: start typing (no endpoint configured, messages cannot be sent)"
    };
    frame.render_widget(Line::styled(hint, muted()), hint_area);
}
