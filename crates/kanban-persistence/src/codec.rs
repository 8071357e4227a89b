//! Snapshot encoding.
//!
//! Snapshots are pretty-printed JSON documents. Decoding is strict: a
//! snapshot that does not describe a valid value is rejected, never patched
//! up.

use kanban_models::{Board, Project, TeamMember};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PersistenceError, Result};

/// Key the board snapshot lives under.
pub const BOARD_KEY: &str = "board";

/// Key the project list lives under.
pub const PROJECTS_KEY: &str = "projects";

/// Key the team roster lives under.
pub const TEAM_KEY: &str = "teamMembers";

/// Serializes any snapshot value.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parses any snapshot value.
pub fn decode<T: DeserializeOwned>(data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| PersistenceError::InvalidData(e.to_string()))
}

/// Serializes a board snapshot.
pub fn encode_board(board: &Board) -> Result<String> {
    encode(board)
}

/// Parses a board snapshot.
///
/// # Errors
/// `InvalidData` when the document is not JSON, names an unknown column,
/// misses a column, or repeats a card id.
pub fn decode_board(data: &str) -> Result<Board> {
    decode(data)
}

/// Serializes the project list.
pub fn encode_projects(projects: &[Project]) -> Result<String> {
    encode(projects)
}

/// Parses the project list.
pub fn decode_projects(data: &str) -> Result<Vec<Project>> {
    decode(data)
}

/// Serializes the team roster.
pub fn encode_team(members: &[TeamMember]) -> Result<String> {
    encode(members)
}

/// Parses the team roster.
pub fn decode_team(data: &str) -> Result<Vec<TeamMember>> {
    decode(data)
}
