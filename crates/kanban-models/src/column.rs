//! Workflow stages and the columns that hold cards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::card::Card;
use crate::ids::CardId;

/// Identifier of a workflow stage.
///
/// The set is closed: boards always carry exactly these four columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnId {
    /// Not started.
    #[serde(rename = "todo")]
    Todo,
    /// Being worked on.
    #[serde(rename = "inProgress")]
    InProgress,
    /// Waiting for review.
    #[serde(rename = "review")]
    Review,
    /// Finished.
    #[serde(rename = "done")]
    Done,
}

impl ColumnId {
    /// All stages in board order.
    pub const ALL: [ColumnId; 4] = [
        ColumnId::Todo,
        ColumnId::InProgress,
        ColumnId::Review,
        ColumnId::Done,
    ];

    /// Returns the wire name used as snapshot key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "inProgress",
            ColumnId::Review => "review",
            ColumnId::Done => "done",
        }
    }

    /// Returns the display label a freshly seeded column gets.
    pub fn default_title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Review => "Review",
            ColumnId::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column: {0}")]
pub struct ParseColumnIdError(pub String);

impl FromStr for ColumnId {
    type Err = ParseColumnIdError;

    /// Accepts the wire name plus kebab/snake spellings, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "todo" => Ok(ColumnId::Todo),
            "inprogress" => Ok(ColumnId::InProgress),
            "review" => Ok(ColumnId::Review),
            "done" => Ok(ColumnId::Done),
            _ => Err(ParseColumnIdError(s.to_string())),
        }
    }
}

/// An ordered bucket of cards for one stage.
///
/// Index in `cards` is the card's position within the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    /// Stage identifier.
    pub id: ColumnId,

    /// Display label.
    pub title: String,

    /// Cards in display order. Older snapshots call this list `tasks`.
    #[serde(alias = "tasks")]
    pub cards: Vec<Card>,
}

impl Column {
    /// Creates an empty column with the stage's default title.
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: id.default_title().to_string(),
            cards: Vec::new(),
        }
    }

    /// Creates a column with the given cards.
    pub fn with_cards(id: ColumnId, cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::new(id)
        }
    }

    /// Returns the index of a card in this column.
    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }

    /// Number of cards in the column.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the column holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
