//! Card type: a single task on the board.

use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// A single task/work item.
///
/// Cards keep their `id` for their whole lifetime. The only change a card
/// sees after creation is which column holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    /// Stable identifier.
    pub id: CardId,

    /// Free-text label.
    pub content: String,

    /// Free-text reference to a team member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl Card {
    /// Creates a card with a freshly generated id.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(CardId::new(), content)
    }

    /// Creates a card with a caller-provided id.
    pub fn with_id(id: impl Into<CardId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            assignee: None,
        }
    }

    /// Sets the assignee.
    pub fn assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}
