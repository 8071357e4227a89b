//! Snapshot persistence for the kanban board.
//!
//! This crate is the persistence collaborator: a key/value contract
//! ([`SnapshotStore`]) with a crash-safe file implementation (write to temp
//! file, then rename) and an in-memory one, plus the JSON codec for board,
//! project and team snapshots.
//!
//! # Example
//!
//! ```no_run
//! use kanban_persistence::{codec, FileStore, SnapshotStore};
//! use kanban_models::Board;
//!
//! let store = FileStore::new("/home/user/.kanban");
//!
//! let board = Board::with_example_cards();
//! store.set(codec::BOARD_KEY, &codec::encode_board(&board).unwrap()).unwrap();
//!
//! let raw = store.get(codec::BOARD_KEY).unwrap().unwrap();
//! assert_eq!(codec::decode_board(&raw).unwrap(), board);
//! ```

pub mod atomic;
pub mod codec;
pub mod error;
pub mod store;

pub use codec::{BOARD_KEY, PROJECTS_KEY, TEAM_KEY};
pub use error::{PersistenceError, Result};
pub use store::{FileStore, MemoryStore, SnapshotStore};
