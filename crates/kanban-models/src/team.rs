//! Team roster: the people cards get assigned to.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::ids::MemberId;

/// Availability given to members when they join.
pub const FULL_AVAILABILITY: u8 = 100;

/// A person on the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Unique identifier.
    pub id: MemberId,

    /// Full name.
    pub name: String,

    /// Job title.
    pub role: String,

    /// Contact email.
    pub email: String,

    /// Contact phone, may be empty.
    #[serde(default)]
    pub phone: String,

    /// Skill tags.
    #[serde(default)]
    pub skills: Vec<String>,

    /// Share of time free for new work, 0..=100.
    #[serde(deserialize_with = "availability")]
    pub availability: u8,

    /// Projects the member currently works on.
    #[serde(default)]
    pub active_projects: u32,

    /// Tasks the member has finished.
    #[serde(default)]
    pub tasks_completed: u32,
}

impl TeamMember {
    /// Creates a fully available member with no history.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            role: role.into(),
            email: email.into(),
            phone: String::new(),
            skills: Vec::new(),
            availability: FULL_AVAILABILITY,
            active_projects: 0,
            tasks_completed: 0,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Sets availability, clamped to 100.
    pub fn with_availability(mut self, availability: u8) -> Self {
        self.availability = availability.min(100);
        self
    }
}

/// Splits a comma-separated skill list, dropping blank entries.
pub fn parse_skills(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn availability<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = u8::deserialize(deserializer)?;
    if value > 100 {
        return Err(de::Error::custom(format!(
            "availability must be between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}

/// Members new sessions are seeded with.
pub fn example_team() -> Vec<TeamMember> {
    const EXAMPLES: [(&str, &str, &str, &str, &str, [&str; 3], u8, u32, u32); 3] = [
        (
            "1",
            "John Doe",
            "Senior Developer",
            "john.doe@example.com",
            "+1 234 567 890",
            ["React", "Node.js", "TypeScript"],
            75,
            3,
            45,
        ),
        (
            "2",
            "Sarah Smith",
            "UI/UX Designer",
            "sarah.smith@example.com",
            "+1 234 567 891",
            ["Figma", "Adobe XD", "Sketch"],
            90,
            2,
            38,
        ),
        (
            "3",
            "Mike Johnson",
            "Project Manager",
            "mike.j@example.com",
            "+1 234 567 892",
            ["Agile", "Scrum", "Team Leadership"],
            60,
            4,
            52,
        ),
    ];

    EXAMPLES
        .iter()
        .map(
            |(id, name, role, email, phone, skills, availability, projects, tasks)| TeamMember {
                id: MemberId::from(*id),
                name: name.to_string(),
                role: role.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                skills: skills.iter().map(|skill| skill.to_string()).collect(),
                availability: *availability,
                active_projects: *projects,
                tasks_completed: *tasks,
            },
        )
        .collect()
}
