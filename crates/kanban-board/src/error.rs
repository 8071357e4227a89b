//! Error types for board operations.

use kanban_models::{BoardShapeError, CardId, ColumnId, MemberId, ParseColumnIdError, ProjectId};
use kanban_persistence::PersistenceError;
use thiserror::Error;

/// Rejected input. Nothing was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Card content is empty or whitespace.
    #[error("card content cannot be empty")]
    EmptyContent,

    /// Assignee is empty or whitespace.
    #[error("assignee cannot be empty")]
    EmptyAssignee,

    /// Column id names no stage.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Destination index past the end of the column.
    #[error("index {index} is out of range for column {column} (max {max})")]
    IndexOutOfRange {
        column: ColumnId,
        index: usize,
        max: usize,
    },

    /// Project name is empty or whitespace.
    #[error("project name cannot be empty")]
    EmptyProjectName,

    /// Template id names no template.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// A required team member field (name, role, email) is blank.
    #[error("team member {0} cannot be empty")]
    MissingMemberField(&'static str),
}

impl From<ParseColumnIdError> for ValidationError {
    fn from(err: ParseColumnIdError) -> Self {
        ValidationError::UnknownColumn(err.0)
    }
}

/// Errors that can occur during board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The card is not where the caller thinks it is.
    ///
    /// Usually another mutation moved it first; re-read the board and retry.
    #[error("stale reference: card {card_id} is not at {column}[{index}]")]
    StaleReference {
        card_id: CardId,
        column: ColumnId,
        index: usize,
    },

    /// Card not on the board.
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    /// Project not in the registry.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Team member not on the roster.
    #[error("team member not found: {0}")]
    MemberNotFound(MemberId),

    /// A change would break the board's shape.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardShapeError),

    /// `load` has not succeeded yet.
    #[error("board not loaded")]
    NotLoaded,

    /// Persistence error on an explicit load or save.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<ParseColumnIdError> for BoardError {
    fn from(err: ParseColumnIdError) -> Self {
        BoardError::Validation(err.into())
    }
}

/// Result type alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_parse_is_validation_error() {
        let err: BoardError = "backlog".parse::<ColumnId>().unwrap_err().into();
        assert!(matches!(
            err,
            BoardError::Validation(ValidationError::UnknownColumn(ref name)) if name == "backlog"
        ));
    }

    #[test]
    fn test_stale_reference_message() {
        let err = BoardError::StaleReference {
            card_id: "t1".into(),
            column: ColumnId::Todo,
            index: 2,
        };
        assert_eq!(err.to_string(), "stale reference: card t1 is not at todo[2]");
    }
}
