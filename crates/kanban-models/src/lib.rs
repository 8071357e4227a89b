//! Core data models for the kanban board.
//!
//! This crate provides the fundamental data types shared by the board
//! manager, the persistence layer and the CLI: cards, stage columns, the
//! board itself, the project list shown next to it, and the team roster.

pub mod board;
pub mod card;
pub mod column;
pub mod ids;
pub mod project;
pub mod team;

// Re-export main types
pub use board::{Board, BoardShapeError};
pub use card::Card;
pub use column::{Column, ColumnId, ParseColumnIdError};
pub use ids::{CardId, MemberId, ProjectId};
pub use project::{
    builtin_templates, example_projects, Project, ProjectTemplate, NOT_STARTED,
    TEMPLATE_DEADLINE_DAYS,
};
pub use team::{example_team, parse_skills, TeamMember, FULL_AVAILABILITY};
