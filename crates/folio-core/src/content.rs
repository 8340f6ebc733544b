//! Portfolio content records.

use serde::{Deserialize, Serialize};

/// Who the portfolio belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub location: String,
    pub intro: Vec<String>,
}

/// A headline skill with a short description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub label: String,
    pub description: String,
}

/// Project grouping used by the gallery filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Data,
    Management,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [
        ProjectCategory::Web,
        ProjectCategory::Data,
        ProjectCategory::Management,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectCategory::Web => "Web Dev",
            ProjectCategory::Data => "Data Analysis",
            ProjectCategory::Management => "Project Management",
        }
    }
}

/// Optional outbound links for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub demo: Option<String>,
    pub live: Option<String>,
}

impl ProjectLinks {
    /// Present links as `(label, url)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("github", self.github.as_deref()),
            ("demo", self.demo.as_deref()),
            ("live", self.live.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|u| (label, u)))
        .collect()
    }
}

/// A gallery entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: ProjectCategory,
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
}

/// Gallery filter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl CategoryFilter {
    pub fn matches(self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.category == category,
        }
    }

    /// Cycle All -> Web -> Data -> Management -> All.
    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(ProjectCategory::Web),
            CategoryFilter::Only(ProjectCategory::Web) => {
                CategoryFilter::Only(ProjectCategory::Data)
            }
            CategoryFilter::Only(ProjectCategory::Data) => {
                CategoryFilter::Only(ProjectCategory::Management)
            }
            CategoryFilter::Only(ProjectCategory::Management) => CategoryFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

/// Everything the page displays. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub profile: Profile,
    pub skills: Vec<Skill>,
    pub soft_skills: Vec<String>,
    pub projects: Vec<Project>,
}

impl Portfolio {
    /// Projects visible under `filter`, in declaration order.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Project> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, category: ProjectCategory) -> Project {
        Project {
            id: id.to_string(),
            title: id.to_uppercase(),
            category,
            short_description: String::new(),
            full_description: String::new(),
            challenge: String::new(),
            solution: String::new(),
            tech_stack: Vec::new(),
            insights: Vec::new(),
            improvements: Vec::new(),
            links: ProjectLinks::default(),
        }
    }

    #[test]
    fn test_filter_cycle_returns_to_all() {
        let mut f = CategoryFilter::All;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, CategoryFilter::All);
    }

    #[test]
    fn test_filtered_keeps_order() {
        let portfolio = Portfolio {
            projects: vec![
                project("a", ProjectCategory::Data),
                project("b", ProjectCategory::Web),
                project("c", ProjectCategory::Data),
            ],
            ..Default::default()
        };
        let ids: Vec<_> = portfolio
            .filtered(CategoryFilter::Only(ProjectCategory::Data))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(portfolio.filtered(CategoryFilter::All).len(), 3);
    }

    #[test]
    fn test_link_entries_skip_missing() {
        let links = ProjectLinks {
            github: Some("https://example.com/repo".into()),
            demo: None,
            live: Some("https://example.com".into()),
        };
        let labels: Vec<_> = links.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["github", "live"]);
    }
}
