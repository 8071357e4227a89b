//! Board state manager for the kanban board.
//!
//! This crate provides the `BoardManager`, the single owner of a board:
//! - Moves, additions and removals applied in memory first
//! - Full snapshot written to a [`SnapshotStore`](kanban_persistence::SnapshotStore) after every change
//! - Write failures reported next to the change, never rolling it back
//! - Change notifications over `mpsc` channels
//!
//! The project list ([`ProjectRegistry`]) and team roster ([`TeamRegistry`])
//! follow the same load, change, overwrite cycle under their own keys.
//!
//! # Example
//!
//! ```no_run
//! use kanban_board::{BoardManager, CardFilter, MoveRequest};
//! use kanban_models::ColumnId;
//! use kanban_persistence::FileStore;
//!
//! let mut manager = BoardManager::new(FileStore::new("/tmp/kanban"));
//! manager.load_board().unwrap();
//!
//! // Move the first "To Do" card to the top of "In Progress"
//! let first = manager.board().unwrap().column(ColumnId::Todo).unwrap().cards[0].id.clone();
//! manager
//!     .move_card(&MoveRequest::new(first, (ColumnId::Todo, 0), (ColumnId::InProgress, 0)))
//!     .unwrap();
//!
//! for found in manager.find_cards(&CardFilter::new().with_column(ColumnId::InProgress)).unwrap() {
//!     println!("{} {}", found.index, found.card.content);
//! }
//! ```

pub mod commit;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod manager;
pub mod projects;
pub mod team;

pub use commit::{Commit, SaveOutcome};
pub use config::{BoardConfig, SeedMode};
pub use error::{BoardError, Result, ValidationError};
pub use event::BoardEvent;
pub use filter::{CardFilter, CardMatch};
pub use manager::{BoardManager, LoadReport, MoveRequest};
pub use projects::ProjectRegistry;
pub use team::TeamRegistry;
