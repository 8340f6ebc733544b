//! Visitor analytics as structured tracing events.
//!
//! Nothing is sent anywhere; events land in the log file under the
//! `folio::analytics` target and can be filtered on their own.

use tracing::info;

use crate::app::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    Submit,
    Success,
    Error,
}

impl ContactAction {
    fn as_str(self) -> &'static str {
        match self {
            ContactAction::Submit => "submit",
            ContactAction::Success => "success",
            ContactAction::Error => "error",
        }
    }
}

pub fn contact_form(action: ContactAction) {
    info!(target: "folio::analytics", event = "contact_form", action = action.as_str());
}

pub fn project_view(project: &str) {
    info!(target: "folio::analytics", event = "project_view", project);
}

pub fn section_view(section: Section) {
    info!(target: "folio::analytics", event = "section_view", section = section.title());
}
