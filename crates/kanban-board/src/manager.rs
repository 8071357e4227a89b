//! BoardManager - owns the board and keeps its snapshot in step.
//!
//! Every mutation follows the same two steps:
//! 1. Apply the change to the in-memory board (the source of truth).
//! 2. Overwrite the stored snapshot and report the outcome in the returned
//!    [`Commit`] and as a [`BoardEvent`].
//!
//! A failed write never undoes step 1. The next `load_board` from another
//! session may then miss the change; whoever writes last wins.

use std::sync::mpsc::Receiver;

use kanban_models::{Board, Card, CardId, ColumnId};
use kanban_persistence::{codec, SnapshotStore};
use tracing::{debug, info, warn};

use crate::commit::{write_snapshot, Commit, SaveOutcome};
use crate::config::BoardConfig;
use crate::error::{BoardError, Result, ValidationError};
use crate::event::{BoardEvent, Subscribers};
use crate::filter::{CardFilter, CardMatch};

/// Request to move one card.
///
/// `destination_index` counts positions after the card has been removed
/// from its source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Card being moved.
    pub card_id: CardId,
    /// Column the caller believes holds the card.
    pub source: ColumnId,
    /// Index the caller believes the card is at.
    pub source_index: usize,
    /// Target column.
    pub destination: ColumnId,
    /// Target index.
    pub destination_index: usize,
}

impl MoveRequest {
    /// Creates a move request.
    pub fn new(
        card_id: impl Into<CardId>,
        source: (ColumnId, usize),
        destination: (ColumnId, usize),
    ) -> Self {
        Self {
            card_id: card_id.into(),
            source: source.0,
            source_index: source.1,
            destination: destination.0,
            destination_index: destination.1,
        }
    }

    /// Returns true if the card would land where it already is.
    pub fn is_noop(&self) -> bool {
        self.source == self.destination && self.source_index == self.destination_index
    }
}

/// What `load_board` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// True if the store had no snapshot and the seed board was used.
    pub seeded: bool,
    /// Outcome of writing the seed board; `Skipped` when nothing was seeded.
    pub save: SaveOutcome,
}

/// Owner of one session's board.
///
/// The manager is explicitly owned and mutated through `&mut self`: there
/// is exactly one writer per board. The store only mirrors what the manager
/// holds.
///
/// # Card resolution
///
/// Moves resolve cards by exact position. The card at
/// `source[source_index]` must carry the requested id; otherwise the move
/// fails with [`BoardError::StaleReference`]. There is no fallback lookup
/// by id.
///
/// # Example
///
/// ```no_run
/// use kanban_board::{BoardManager, MoveRequest};
/// use kanban_models::ColumnId;
/// use kanban_persistence::FileStore;
///
/// let mut manager = BoardManager::new(FileStore::new("/tmp/kanban"));
/// manager.load_board().unwrap();
///
/// let (card_id, _) = manager.add_card(ColumnId::Todo, "Write release notes").unwrap();
/// let index = manager.board().unwrap().column(ColumnId::Todo).unwrap().len() - 1;
///
/// let commit = manager
///     .move_card(&MoveRequest::new(card_id, (ColumnId::Todo, index), (ColumnId::Done, 0)))
///     .unwrap();
/// if commit.save.is_failed() {
///     eprintln!("change kept locally but not saved");
/// }
/// ```
pub struct BoardManager<S: SnapshotStore> {
    store: S,
    config: BoardConfig,
    board: Option<Board>,
    revision: u64,
    subscribers: Subscribers,
}

impl<S: SnapshotStore> BoardManager<S> {
    /// Creates a manager with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, BoardConfig::default())
    }

    /// Creates a manager with the given configuration.
    pub fn with_config(store: S, config: BoardConfig) -> Self {
        Self {
            store,
            config,
            board: None,
            revision: 0,
            subscribers: Subscribers::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Subscribes to board events.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        self.subscribers.subscribe()
    }

    /// Returns true once `load_board` has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.board.is_some()
    }

    /// Local revision, bumped by every committed change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the current board.
    pub fn board(&self) -> Result<&Board> {
        self.board.as_ref().ok_or(BoardError::NotLoaded)
    }

    /// Reads the latest snapshot, seeding and saving a default board if
    /// the store has none.
    ///
    /// # Errors
    /// `Persistence` if the store cannot be read or holds an invalid
    /// snapshot. A failed seed write is reported in the returned
    /// [`LoadReport`] instead.
    pub fn load_board(&mut self) -> Result<LoadReport> {
        let key = self.config.storage_key.clone();
        let raw = self.store.get(&key)?;

        let report = match raw {
            Some(data) => {
                let board = codec::decode_board(&data)?;
                info!(key = %key, cards = board.card_count(), "Loaded board");
                self.board = Some(board);
                self.subscribers.broadcast(BoardEvent::Loaded { seeded: false });
                LoadReport {
                    seeded: false,
                    save: SaveOutcome::Skipped,
                }
            }
            None => {
                info!(key = %key, seed = ?self.config.seed, "No board snapshot; seeding");
                self.board = Some(self.config.seed.board());
                self.subscribers.broadcast(BoardEvent::Loaded { seeded: true });
                self.revision += 1;
                let save = self.persist(self.revision)?;
                LoadReport { seeded: true, save }
            }
        };

        Ok(report)
    }

    /// Overwrites the stored snapshot with the current board.
    ///
    /// # Errors
    /// `NotLoaded` before `load_board`, `Persistence` if the write fails.
    pub fn save_board(&mut self) -> Result<()> {
        let board = self.board.as_ref().ok_or(BoardError::NotLoaded)?;
        let data = codec::encode_board(board)?;
        if let Err(e) = self.store.set(&self.config.storage_key, &data) {
            warn!(key = %self.config.storage_key, error = %e, "Explicit board save failed");
            self.subscribers.broadcast(BoardEvent::PersistFailed {
                revision: self.revision,
                error: e.to_string(),
            });
            return Err(e.into());
        }
        self.subscribers.broadcast(BoardEvent::Persisted {
            revision: self.revision,
        });
        Ok(())
    }

    /// Moves a card to a new position.
    ///
    /// A request whose source and destination are identical returns an
    /// unchanged commit without touching the board or the store.
    ///
    /// # Errors
    /// - `StaleReference` if the card is not at `source[source_index]`.
    /// - `Validation` if `destination_index` is past the end of the
    ///   destination (after removal).
    ///
    /// Neither error changes the board.
    pub fn move_card(&mut self, request: &MoveRequest) -> Result<Commit> {
        let board = self.board.as_mut().ok_or(BoardError::NotLoaded)?;

        if request.is_noop() {
            debug!(card_id = %request.card_id, "Move to same position; nothing to do");
            return Ok(Commit::unchanged(self.revision));
        }

        let at_source = board
            .column(request.source)
            .and_then(|column| column.cards.get(request.source_index));
        if at_source.map(|card| &card.id) != Some(&request.card_id) {
            warn!(
                card_id = %request.card_id,
                column = %request.source,
                index = request.source_index,
                "Rejected move with stale source position"
            );
            return Err(BoardError::StaleReference {
                card_id: request.card_id.clone(),
                column: request.source,
                index: request.source_index,
            });
        }

        let destination_len = board
            .column(request.destination)
            .map(|column| column.len())
            .ok_or_else(|| ValidationError::UnknownColumn(request.destination.to_string()))?;
        let max = if request.source == request.destination {
            destination_len - 1
        } else {
            destination_len
        };
        if request.destination_index > max {
            return Err(ValidationError::IndexOutOfRange {
                column: request.destination,
                index: request.destination_index,
                max,
            }
            .into());
        }

        if !board.relocate(
            request.source,
            request.source_index,
            request.destination,
            request.destination_index,
        ) {
            return Err(BoardError::StaleReference {
                card_id: request.card_id.clone(),
                column: request.source,
                index: request.source_index,
            });
        }

        let commit = self.commit(|revision| BoardEvent::CardMoved {
            card_id: request.card_id.clone(),
            from: (request.source, request.source_index),
            to: (request.destination, request.destination_index),
            revision,
        })?;
        info!(
            card_id = %request.card_id,
            from = %request.source,
            to = %request.destination,
            revision = commit.revision,
            "Moved card"
        );
        Ok(commit)
    }

    /// Appends a new card to the end of a column.
    ///
    /// Content is trimmed before it is stored.
    ///
    /// # Errors
    /// `Validation` if the content is empty or whitespace only.
    pub fn add_card(&mut self, column: ColumnId, content: &str) -> Result<(CardId, Commit)> {
        self.board()?;
        let card = Card::new(non_blank(content, ValidationError::EmptyContent)?);
        self.insert_card(column, card)
    }

    /// Appends a new card with an assignee.
    ///
    /// # Errors
    /// `Validation` if the content or the assignee is blank.
    pub fn add_assigned_card(
        &mut self,
        column: ColumnId,
        content: &str,
        assignee: &str,
    ) -> Result<(CardId, Commit)> {
        self.board()?;
        let content = non_blank(content, ValidationError::EmptyContent)?;
        let assignee = non_blank(assignee, ValidationError::EmptyAssignee)?;
        self.insert_card(column, Card::new(content).assigned_to(assignee))
    }

    /// Deletes a card.
    ///
    /// # Errors
    /// `CardNotFound` if no column holds the card.
    pub fn remove_card(&mut self, card_id: &CardId) -> Result<(Card, Commit)> {
        let board = self.board.as_mut().ok_or(BoardError::NotLoaded)?;
        let (column, _, card) = board
            .remove_card(card_id)
            .ok_or_else(|| BoardError::CardNotFound(card_id.clone()))?;

        let commit = self.commit(|revision| BoardEvent::CardRemoved {
            card_id: card_id.clone(),
            column,
            revision,
        })?;
        info!(card_id = %card_id, column = %column, revision = commit.revision, "Removed card");
        Ok((card, commit))
    }

    /// Lists cards matching a filter, in board order.
    pub fn find_cards(&self, filter: &CardFilter) -> Result<Vec<CardMatch<'_>>> {
        let board = self.board()?;
        Ok(board
            .columns()
            .iter()
            .flat_map(|column| {
                column
                    .cards
                    .iter()
                    .enumerate()
                    .map(move |(index, card)| CardMatch {
                        column: column.id,
                        index,
                        card,
                    })
            })
            .filter(|found| filter.matches(found.column, found.card))
            .collect())
    }

    fn insert_card(&mut self, column: ColumnId, card: Card) -> Result<(CardId, Commit)> {
        let board = self.board.as_mut().ok_or(BoardError::NotLoaded)?;
        let card_id = card.id.clone();
        board.push_card(column, card)?;

        let commit = self.commit(|revision| BoardEvent::CardAdded {
            card_id: card_id.clone(),
            column,
            revision,
        })?;
        info!(card_id = %card_id, column = %column, revision = commit.revision, "Added card");
        Ok((card_id, commit))
    }

    /// Bumps the revision, announces the change, then writes the snapshot.
    fn commit(&mut self, event: impl FnOnce(u64) -> BoardEvent) -> Result<Commit> {
        self.revision += 1;
        let revision = self.revision;
        self.subscribers.broadcast(event(revision));
        let save = self.persist(revision)?;
        Ok(Commit {
            revision,
            changed: true,
            save,
        })
    }

    fn persist(&mut self, revision: u64) -> Result<SaveOutcome> {
        let board = self.board.as_ref().ok_or(BoardError::NotLoaded)?;
        let save = write_snapshot(&self.store, &self.config.storage_key, board);
        match &save {
            SaveOutcome::Saved => {
                debug!(revision, "Board snapshot saved");
                self.subscribers.broadcast(BoardEvent::Persisted { revision });
            }
            SaveOutcome::Failed(error) => {
                self.subscribers.broadcast(BoardEvent::PersistFailed {
                    revision,
                    error: error.clone(),
                });
            }
            SaveOutcome::Skipped => {}
        }
        Ok(save)
    }
}

fn non_blank(value: &str, error: ValidationError) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error.into());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedMode;
    use kanban_persistence::MemoryStore;

    fn loaded(store: &MemoryStore) -> BoardManager<&MemoryStore> {
        let mut manager = BoardManager::new(store);
        manager.load_board().unwrap();
        manager
    }

    fn ids(manager: &BoardManager<&MemoryStore>, column: ColumnId) -> Vec<String> {
        manager
            .board()
            .unwrap()
            .column(column)
            .unwrap()
            .cards
            .iter()
            .map(|card| card.id.to_string())
            .collect()
    }

    #[test]
    fn test_not_loaded() {
        let store = MemoryStore::new();
        let mut manager = BoardManager::new(&store);

        assert!(!manager.is_loaded());
        assert!(matches!(manager.board(), Err(BoardError::NotLoaded)));
        assert!(matches!(
            manager.add_card(ColumnId::Todo, "x"),
            Err(BoardError::NotLoaded)
        ));
        assert!(matches!(manager.save_board(), Err(BoardError::NotLoaded)));
    }

    #[test]
    fn test_not_loaded_rejects_every_mutation() {
        let store = MemoryStore::new();
        let mut manager = BoardManager::new(&store);

        let same_position = MoveRequest::new("t1", (ColumnId::Todo, 0), (ColumnId::Todo, 0));
        assert!(matches!(
            manager.move_card(&same_position),
            Err(BoardError::NotLoaded)
        ));
        assert!(matches!(
            manager.add_card(ColumnId::Todo, "   "),
            Err(BoardError::NotLoaded)
        ));
        assert!(matches!(
            manager.add_assigned_card(ColumnId::Todo, "Plan", "Anna P."),
            Err(BoardError::NotLoaded)
        ));
        assert!(matches!(
            manager.remove_card(&"t1".into()),
            Err(BoardError::NotLoaded)
        ));
        assert_eq!(manager.revision(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_load_seeds_and_persists_examples() {
        let store = MemoryStore::new();
        let mut manager = BoardManager::new(&store);

        let report = manager.load_board().unwrap();

        assert!(report.seeded);
        assert_eq!(report.save, SaveOutcome::Saved);
        assert_eq!(store.write_count(), 1);
        assert_eq!(manager.board().unwrap().card_count(), 9);
        assert_eq!(manager.revision(), 1);
    }

    #[test]
    fn test_load_seeds_empty_board() {
        let store = MemoryStore::new();
        let config = BoardConfig::new().with_seed(SeedMode::Empty);
        let mut manager = BoardManager::with_config(&store, config);

        manager.load_board().unwrap();

        assert_eq!(manager.board().unwrap().card_count(), 0);
        assert_eq!(manager.board().unwrap().columns().len(), 4);
    }

    #[test]
    fn test_load_reads_existing_snapshot() {
        let store = MemoryStore::new();
        {
            let mut manager = loaded(&store);
            manager.add_card(ColumnId::Done, "Ship it").unwrap();
        }
        let writes = store.write_count();

        let mut manager = BoardManager::new(&store);
        let report = manager.load_board().unwrap();

        assert!(!report.seeded);
        assert_eq!(report.save, SaveOutcome::Skipped);
        assert_eq!(store.write_count(), writes);
        assert_eq!(manager.board().unwrap().card_count(), 10);
    }

    #[test]
    fn test_load_rejects_corrupt_snapshot() {
        let store = MemoryStore::new();
        store.set("board", "{ not json").unwrap();
        let mut manager = BoardManager::new(&store);

        assert!(matches!(
            manager.load_board(),
            Err(BoardError::Persistence(_))
        ));
        assert!(!manager.is_loaded());
    }

    #[test]
    fn test_load_with_unreachable_store() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let mut manager = BoardManager::new(&store);

        assert!(matches!(
            manager.load_board(),
            Err(BoardError::Persistence(_))
        ));
        assert!(!manager.is_loaded());
    }

    #[test]
    fn test_same_column_move() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        manager
            .move_card(&MoveRequest::new("t1", (ColumnId::Todo, 0), (ColumnId::Todo, 2)))
            .unwrap();

        assert_eq!(ids(&manager, ColumnId::Todo), ["t2", "t3", "t1"]);
    }

    #[test]
    fn test_cross_column_move() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        let commit = manager
            .move_card(&MoveRequest::new(
                "t5",
                (ColumnId::InProgress, 1),
                (ColumnId::Review, 0),
            ))
            .unwrap();

        assert!(commit.changed);
        assert!(commit.save.is_saved());
        assert_eq!(ids(&manager, ColumnId::InProgress), ["t4"]);
        assert_eq!(ids(&manager, ColumnId::Review), ["t5", "t6", "t7"]);
    }

    #[test]
    fn test_noop_move_skips_write() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        let before = manager.board().unwrap().clone();
        let writes = store.write_count();

        let commit = manager
            .move_card(&MoveRequest::new("t2", (ColumnId::Todo, 1), (ColumnId::Todo, 1)))
            .unwrap();

        assert!(!commit.changed);
        assert_eq!(commit.save, SaveOutcome::Skipped);
        assert_eq!(manager.board().unwrap(), &before);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_stale_move_is_rejected() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        let before = manager.board().unwrap().clone();

        let result =
            manager.move_card(&MoveRequest::new("t1", (ColumnId::Todo, 1), (ColumnId::Done, 0)));

        assert!(matches!(
            result,
            Err(BoardError::StaleReference { column: ColumnId::Todo, index: 1, .. })
        ));
        assert_eq!(manager.board().unwrap(), &before);
    }

    #[test]
    fn test_move_rejects_destination_past_end() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        let result =
            manager.move_card(&MoveRequest::new("t1", (ColumnId::Todo, 0), (ColumnId::Done, 3)));

        assert!(matches!(
            result,
            Err(BoardError::Validation(ValidationError::IndexOutOfRange { max: 2, .. }))
        ));
        assert_eq!(ids(&manager, ColumnId::Todo), ["t1", "t2", "t3"]);
    }

    #[test]
    fn test_move_to_end_of_destination_is_allowed() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        manager
            .move_card(&MoveRequest::new("t1", (ColumnId::Todo, 0), (ColumnId::Done, 2)))
            .unwrap();

        assert_eq!(ids(&manager, ColumnId::Done), ["t8", "t9", "t1"]);
    }

    #[test]
    fn test_add_card_appends_and_trims() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        let (card_id, commit) = manager.add_card(ColumnId::Review, "  Security audit ").unwrap();

        assert!(commit.save.is_saved());
        let board = manager.board().unwrap();
        assert_eq!(board.locate(&card_id), Some((ColumnId::Review, 2)));
        assert_eq!(board.card(&card_id).unwrap().content, "Security audit");
    }

    #[test]
    fn test_add_card_rejects_blank_content() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        let before = manager.board().unwrap().clone();

        for content in ["", "   "] {
            assert!(matches!(
                manager.add_card(ColumnId::Todo, content),
                Err(BoardError::Validation(ValidationError::EmptyContent))
            ));
        }
        assert_eq!(manager.board().unwrap(), &before);
    }

    #[test]
    fn test_add_assigned_card() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        let (card_id, _) = manager
            .add_assigned_card(ColumnId::Todo, "Plan sprint", "Mike R.")
            .unwrap();

        let card = manager.board().unwrap().card(&card_id).unwrap().clone();
        assert_eq!(card.assignee.as_deref(), Some("Mike R."));

        assert!(matches!(
            manager.add_assigned_card(ColumnId::Todo, "Plan sprint", " "),
            Err(BoardError::Validation(ValidationError::EmptyAssignee))
        ));
    }

    #[test]
    fn test_remove_card() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);

        let (card, commit) = manager.remove_card(&"t6".into()).unwrap();

        assert_eq!(card.content, "Code review");
        assert!(commit.changed);
        assert_eq!(ids(&manager, ColumnId::Review), ["t7"]);
        assert!(matches!(
            manager.remove_card(&"t6".into()),
            Err(BoardError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_failed_write_keeps_local_change() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        store.set_offline(true);

        let (card_id, commit) = manager.add_card(ColumnId::Todo, "Offline edit").unwrap();

        assert!(commit.save.is_failed());
        assert!(manager.board().unwrap().contains_card(&card_id));
        assert_eq!(manager.revision(), 2);
    }

    #[test]
    fn test_save_board_surfaces_failure() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        store.set_offline(true);

        assert!(matches!(
            manager.save_board(),
            Err(BoardError::Persistence(_))
        ));

        store.set_offline(false);
        manager.save_board().unwrap();
    }

    #[test]
    fn test_events_follow_mutations() {
        let store = MemoryStore::new();
        let mut manager = BoardManager::new(&store);
        let rx = manager.subscribe();

        manager.load_board().unwrap();
        manager
            .move_card(&MoveRequest::new("t9", (ColumnId::Done, 1), (ColumnId::Done, 0)))
            .unwrap();

        let events: Vec<BoardEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                BoardEvent::Loaded { seeded: true },
                BoardEvent::Persisted { revision: 1 },
                BoardEvent::CardMoved {
                    card_id: "t9".into(),
                    from: (ColumnId::Done, 1),
                    to: (ColumnId::Done, 0),
                    revision: 2,
                },
                BoardEvent::Persisted { revision: 2 },
            ]
        );
    }

    #[test]
    fn test_persist_failure_event() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        let rx = manager.subscribe();
        store.set_offline(true);

        manager.remove_card(&"t1".into()).unwrap();

        let events: Vec<BoardEvent> = rx.try_iter().collect();
        assert!(matches!(
            events.last(),
            Some(BoardEvent::PersistFailed { revision: 2, .. })
        ));
    }

    #[test]
    fn test_find_cards() {
        let store = MemoryStore::new();
        let mut manager = loaded(&store);
        manager
            .add_assigned_card(ColumnId::Review, "Accessibility review", "Anna P.")
            .unwrap();

        let reviews = manager
            .find_cards(&CardFilter::new().with_text("review"))
            .unwrap();
        let positions: Vec<(ColumnId, usize)> =
            reviews.iter().map(|m| (m.column, m.index)).collect();
        assert_eq!(
            positions,
            [(ColumnId::Review, 0), (ColumnId::Review, 1), (ColumnId::Review, 2)]
        );

        let annas = manager
            .find_cards(&CardFilter::new().with_assignee("anna p."))
            .unwrap();
        assert_eq!(annas.len(), 1);
        assert_eq!(annas[0].card.content, "Accessibility review");
    }
}
