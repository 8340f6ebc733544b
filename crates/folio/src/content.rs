//! Built-in portfolio content and the TOML loader for custom content.

use std::fs;
use std::path::{Path, PathBuf};

use folio_core::{Portfolio, Profile, Project, ProjectCategory, ProjectLinks, Skill};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("could not read content file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid content file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load a portfolio from a TOML file.
pub fn load(path: &Path) -> Result<Portfolio, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn skill(label: &str, description: &str) -> Skill {
    Skill {
        label: label.to_string(),
        description: description.to_string(),
    }
}

/// The portfolio shown when no content file is configured.
pub fn built_in() -> Portfolio {
    Portfolio {
        profile: Profile {
            name: "Rio Tavares".to_string(),
            role: "Developer & Data Analyst".to_string(),
            tagline: "I turn messy processes into tidy software and clear numbers."
                .to_string(),
            location: "Lisbon, Portugal".to_string(),
            intro: strings(&[
                "I build web tools and data pipelines for small teams that have outgrown spreadsheets.",
                "Most of my work sits where operations meet engineering: dashboards people actually open, automations that save a morning a week, and the plumbing in between.",
            ]),
        },
        skills: vec![
            skill("Web development", "Typed front ends and small, boring back ends."),
            skill("Data analysis", "SQL first, notebooks second, charts last."),
            skill("Automation", "Workflow tools and glue scripts around existing APIs."),
            skill("Project delivery", "Short iterations with a working thing at the end of each."),
        ],
        soft_skills: strings(&[
            "Clear written communication",
            "Stakeholder interviews",
            "Teaching and pairing",
            "Calm under deadlines",
        ]),
        projects: vec![
            Project {
                id: "sales-dashboard".to_string(),
                title: "Interactive Sales Dashboard".to_string(),
                category: ProjectCategory::Data,
                short_description: "Daily sales metrics for a regional retailer, refreshed every hour."
                    .to_string(),
                full_description: "An analytics panel that replaced a weekly spreadsheet export with live figures per store, product line and region."
                    .to_string(),
                challenge: "Sales data lived in three systems with different product codes."
                    .to_string(),
                solution: "A nightly reconciliation job maps codes into one schema that the dashboard reads directly."
                    .to_string(),
                tech_stack: strings(&["Python", "SQL", "PostgreSQL", "Power BI"]),
                insights: strings(&[
                    "Two stores accounted for most of the weekend returns.",
                    "Hourly refresh was enough; nobody needed real time.",
                ]),
                improvements: strings(&["Forecast bands on the weekly view."]),
                links: ProjectLinks {
                    github: Some("https://github.com/riotavares/sales-dashboard".to_string()),
                    ..ProjectLinks::default()
                },
            },
            Project {
                id: "event-manager".to_string(),
                title: "Event Management Platform".to_string(),
                category: ProjectCategory::Web,
                short_description: "Scheduling, ticketing and check-in for a cultural centre."
                    .to_string(),
                full_description: "A web platform that lets staff plan events, sell tickets and check visitors in from a phone."
                    .to_string(),
                challenge: "Volunteers with no training had to run check-in on busy nights."
                    .to_string(),
                solution: "A single-screen check-in flow that works offline and syncs when back online."
                    .to_string(),
                tech_stack: strings(&["TypeScript", "React", "Node.js", "MongoDB"]),
                insights: strings(&["Offline support mattered more than any other feature."]),
                improvements: strings(&["Waiting lists for sold-out events."]),
                links: ProjectLinks {
                    github: Some("https://github.com/riotavares/event-manager".to_string()),
                    live: Some("https://events.example.org".to_string()),
                    ..ProjectLinks::default()
                },
            },
            Project {
                id: "process-automation".to_string(),
                title: "Back-office Process Automation".to_string(),
                category: ProjectCategory::Management,
                short_description: "Automated approvals and reporting for an operations team."
                    .to_string(),
                full_description: "Workflows that route purchase approvals, chase late replies and post a weekly summary to chat."
                    .to_string(),
                challenge: "Approvals stalled in inboxes for days.".to_string(),
                solution: "Each request becomes a tracked workflow with reminders and an audit trail."
                    .to_string(),
                tech_stack: strings(&["n8n", "REST APIs", "JavaScript", "PostgreSQL"]),
                insights: strings(&["Median approval time dropped from four days to one."]),
                improvements: Vec::new(),
                links: ProjectLinks::default(),
            },
            Project {
                id: "sentiment-pipeline".to_string(),
                title: "Social Media Sentiment Pipeline".to_string(),
                category: ProjectCategory::Data,
                short_description: "NLP pipeline that classifies brand mentions by tone."
                    .to_string(),
                full_description: "Collects public mentions, scores their sentiment and surfaces spikes worth a human look."
                    .to_string(),
                challenge: "Sarcasm and mixed languages confused off-the-shelf models."
                    .to_string(),
                solution: "A small labelled set per language and a review queue for low-confidence posts."
                    .to_string(),
                tech_stack: strings(&["Python", "pandas", "NLTK", "Streamlit"]),
                insights: strings(&["Most negative spikes traced back to delivery delays."]),
                improvements: strings(&["Topic clustering on top of sentiment."]),
                links: ProjectLinks {
                    demo: Some("https://sentiment.example.org".to_string()),
                    ..ProjectLinks::default()
                },
            },
        ],
    }
}
