//! The board: every stage column and the cards it holds.
//!
//! A board always carries the full, fixed stage set. Column order is
//! insertion-stable and card ids are unique across the whole board.
//!
//! On the wire a board is a JSON object keyed by column wire id:
//!
//! ```text
//! {
//!   "todo":       { "id": "todo", "title": "To Do", "cards": [ ... ] },
//!   "inProgress": { "id": "inProgress", ... },
//!   ...
//! }
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::card::Card;
use crate::column::{Column, ColumnId};
use crate::ids::CardId;

/// Reasons a set of columns cannot form a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardShapeError {
    /// A map key disagrees with the column stored under it.
    #[error("column stored under `{key}` has id `{id}`")]
    MismatchedKey { key: ColumnId, id: ColumnId },

    /// The same stage appears twice.
    #[error("duplicate column: {0}")]
    DuplicateColumn(ColumnId),

    /// A stage is absent.
    #[error("missing column: {0}")]
    MissingColumn(ColumnId),

    /// A card id appears more than once.
    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),
}

/// Ordered mapping from stage to column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with every stage and no cards.
    pub fn new() -> Self {
        Self {
            columns: ColumnId::ALL.iter().copied().map(Column::new).collect(),
        }
    }

    /// Creates the example board new sessions are seeded with.
    pub fn with_example_cards() -> Self {
        let seed = |id: ColumnId, cards: &[(&str, &str)]| {
            Column::with_cards(
                id,
                cards
                    .iter()
                    .map(|(card_id, content)| Card::with_id(*card_id, *content))
                    .collect(),
            )
        };

        Self {
            columns: vec![
                seed(
                    ColumnId::Todo,
                    &[
                        ("t1", "Research competitors"),
                        ("t2", "Design wireframes"),
                        ("t3", "Setup development environment"),
                    ],
                ),
                seed(
                    ColumnId::InProgress,
                    &[("t4", "Homepage development"), ("t5", "User authentication")],
                ),
                seed(
                    ColumnId::Review,
                    &[("t6", "Code review"), ("t7", "UI/UX review")],
                ),
                seed(
                    ColumnId::Done,
                    &[("t8", "Project setup"), ("t9", "Requirements gathering")],
                ),
            ],
        }
    }

    /// Builds a board from columns, keeping their order.
    ///
    /// # Errors
    /// Fails when a stage is missing or repeated, or a card id repeats.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, BoardShapeError> {
        let mut seen_columns = HashSet::new();
        for column in &columns {
            if !seen_columns.insert(column.id) {
                return Err(BoardShapeError::DuplicateColumn(column.id));
            }
        }
        if let Some(missing) = ColumnId::ALL.iter().find(|id| !seen_columns.contains(*id)) {
            return Err(BoardShapeError::MissingColumn(*missing));
        }

        let mut seen_cards = HashSet::new();
        for card in columns.iter().flat_map(|column| column.cards.iter()) {
            if !seen_cards.insert(&card.id) {
                return Err(BoardShapeError::DuplicateCard(card.id.clone()));
            }
        }

        Ok(Self { columns })
    }

    /// Columns in board order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column for a stage.
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Returns the column for a stage, mutably.
    ///
    /// Callers are responsible for keeping card ids unique.
    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == id)
    }

    /// Finds the column and index currently holding a card.
    pub fn locate(&self, card_id: &CardId) -> Option<(ColumnId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .position_of(card_id)
                .map(|index| (column.id, index))
        })
    }

    /// Returns a card by id.
    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .find(|card| &card.id == card_id)
    }

    /// Returns true if any column holds the card.
    pub fn contains_card(&self, card_id: &CardId) -> bool {
        self.locate(card_id).is_some()
    }

    /// All card ids in board order.
    pub fn card_ids(&self) -> Vec<&CardId> {
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter().map(|card| &card.id))
            .collect()
    }

    /// Total number of cards.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Moves the card at `from[from_index]` to `to[to_index]`.
    ///
    /// `to_index` is read against the destination after the card has been
    /// taken out, so within one column the valid range shrinks by one.
    /// Returns false and leaves the board untouched when a position is out
    /// of range.
    pub fn relocate(
        &mut self,
        from: ColumnId,
        from_index: usize,
        to: ColumnId,
        to_index: usize,
    ) -> bool {
        let (Some(src), Some(dst)) = (self.column_index(from), self.column_index(to)) else {
            return false;
        };
        if from_index >= self.columns[src].len() {
            return false;
        }
        let dst_len = self.columns[dst].len() - usize::from(src == dst);
        if to_index > dst_len {
            return false;
        }

        let card = self.columns[src].cards.remove(from_index);
        self.columns[dst].cards.insert(to_index, card);
        true
    }

    /// Appends a card to the end of a column.
    ///
    /// # Errors
    /// `DuplicateCard` if the id is already on the board.
    pub fn push_card(&mut self, column: ColumnId, card: Card) -> Result<(), BoardShapeError> {
        if self.contains_card(&card.id) {
            return Err(BoardShapeError::DuplicateCard(card.id));
        }
        let index = self
            .column_index(column)
            .ok_or(BoardShapeError::MissingColumn(column))?;
        self.columns[index].cards.push(card);
        Ok(())
    }

    /// Takes a card off the board, returning where it was.
    pub fn remove_card(&mut self, card_id: &CardId) -> Option<(ColumnId, usize, Card)> {
        let (column, index) = self.locate(card_id)?;
        let column_index = self.column_index(column)?;
        let card = self.columns[column_index].cards.remove(index);
        Some((column, index, card))
    }

    fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| column.id == id)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(column.id.as_str(), column)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BoardVisitor)
    }
}

struct BoardVisitor;

impl<'de> Visitor<'de> for BoardVisitor {
    type Value = Board;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from column id to column")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Board, A::Error> {
        let mut columns = Vec::with_capacity(ColumnId::ALL.len());
        while let Some(key) = access.next_key::<ColumnId>()? {
            let column: Column = access.next_value()?;
            if column.id != key {
                return Err(de::Error::custom(BoardShapeError::MismatchedKey {
                    key,
                    id: column.id,
                }));
            }
            columns.push(column);
        }
        Board::from_columns(columns).map_err(de::Error::custom)
    }
}
