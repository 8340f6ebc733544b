//! Core types shared by the folio crates.

mod aurora;
mod color;
mod contact;
mod content;

pub use aurora::{AuroraConfig, EffectiveParams, Motion, REDUCED_MOTION_ENV};
pub use color::{ACCENT, ColorError, Rgb, hsl_to_rgb};
pub use contact::{
    ContactField, ContactFields, FieldError, NETWORK_ERROR_MESSAGE, STATUS_ERROR_MESSAGE,
    SUBJECT, SUCCESS_MESSAGE, SubmitStatus,
};
pub use content::{
    CategoryFilter, Portfolio, Profile, Project, ProjectCategory, ProjectLinks, Skill,
};
