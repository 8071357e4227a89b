//! Project types shown alongside the board.
//!
//! Projects are a flat list with progress, status, team and a deadline.
//! Templates provide canned starting points.

use chrono::{Days, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::ids::ProjectId;

/// Status assigned to projects that were just created.
pub const NOT_STARTED: &str = "Not Started";

/// Days between creation and deadline for template-based projects.
pub const TEMPLATE_DEADLINE_DAYS: u64 = 30;

/// A tracked project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,

    /// Display name.
    pub name: String,

    /// Completion percentage, 0..=100.
    #[serde(deserialize_with = "percent")]
    pub progress: u8,

    /// Free-text status label.
    pub status: String,

    /// Team member names.
    #[serde(default)]
    pub team: Vec<String>,

    /// Due date.
    pub deadline: NaiveDate,
}

impl Project {
    /// Creates a project that has not started yet.
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            progress: 0,
            status: NOT_STARTED.to_string(),
            team: Vec::new(),
            deadline,
        }
    }

    /// Creates a project from a template, due thirty days after `today`.
    pub fn from_template(template: &ProjectTemplate, today: NaiveDate) -> Self {
        let deadline = today
            .checked_add_days(Days::new(TEMPLATE_DEADLINE_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self::new(template.name.clone(), deadline)
    }

    /// Sets progress, clamped to 100.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }

    /// Sets the status label.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the team.
    pub fn with_team<I, S>(mut self, team: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.team = team.into_iter().map(Into::into).collect();
        self
    }

    /// Team member initials, e.g. "John D." -> "JD".
    pub fn team_initials(&self) -> Vec<String> {
        self.team
            .iter()
            .map(|member| {
                member
                    .split_whitespace()
                    .filter_map(|part| part.chars().next())
                    .collect()
            })
            .collect()
    }
}

/// Reads a percentage, rejecting values above 100.
fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = u8::deserialize(deserializer)?;
    if value > 100 {
        return Err(de::Error::custom(format!(
            "progress must be between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}

/// A canned project starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    /// Template identifier.
    pub id: String,
    /// Name given to projects created from it.
    pub name: String,
    /// Human-readable duration, e.g. "2 months".
    pub duration: String,
    /// Number of tasks the template plans for.
    pub tasks: u32,
}

impl ProjectTemplate {
    fn new(id: &str, name: &str, duration: &str, tasks: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            duration: duration.to_string(),
            tasks,
        }
    }
}

/// Templates available out of the box.
pub fn builtin_templates() -> Vec<ProjectTemplate> {
    vec![
        ProjectTemplate::new("1", "Website Development", "2 months", 12),
        ProjectTemplate::new("2", "Mobile App", "3 months", 15),
        ProjectTemplate::new("3", "Marketing Campaign", "1 month", 8),
    ]
}

/// Projects new sessions are seeded with.
pub fn example_projects() -> Vec<Project> {
    const EXAMPLES: [(&str, &str, u8, &str, [&str; 2], (i32, u32, u32)); 3] = [
        ("1", "E-commerce Platform", 75, "In Progress", ["John D.", "Sarah M."], (2024, 5, 15)),
        ("2", "Mobile App v2", 45, "On Track", ["Mike R.", "Lisa K."], (2024, 6, 20)),
        ("3", "Brand Redesign", 90, "Near Completion", ["Tom B.", "Anna P."], (2024, 4, 30)),
    ];

    EXAMPLES
        .iter()
        .map(|(id, name, progress, status, team, (y, m, d))| Project {
            id: ProjectId::from(*id),
            name: name.to_string(),
            progress: *progress,
            status: status.to_string(),
            team: team.iter().map(|member| member.to_string()).collect(),
            deadline: NaiveDate::from_ymd_opt(*y, *m, *d).unwrap_or(NaiveDate::MIN),
        })
        .collect()
}
