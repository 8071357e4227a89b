//! Card filtering for board queries.

use kanban_models::{Card, ColumnId};

/// Filter criteria for querying cards.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    /// Filter by column.
    pub column: Option<ColumnId>,
    /// Filter by assignee, case-insensitive exact match.
    pub assignee: Option<String>,
    /// Filter by content, case-insensitive substring.
    pub text: Option<String>,
}

impl CardFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column filter.
    pub fn with_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }

    /// Sets the assignee filter.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the content filter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns true if the card, sitting in `column`, matches this filter.
    pub fn matches(&self, column: ColumnId, card: &Card) -> bool {
        if let Some(wanted) = self.column {
            if column != wanted {
                return false;
            }
        }

        if let Some(ref assignee) = self.assignee {
            let assigned = card
                .assignee
                .as_deref()
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(assignee.trim()));
            if !assigned {
                return false;
            }
        }

        if let Some(ref text) = self.text {
            if !card
                .content
                .to_lowercase()
                .contains(&text.trim().to_lowercase())
            {
                return false;
            }
        }

        true
    }
}

/// A card that matched a query, with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMatch<'a> {
    /// Column holding the card.
    pub column: ColumnId,
    /// Index within the column.
    pub index: usize,
    /// The card.
    pub card: &'a Card,
}
