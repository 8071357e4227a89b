//! Change notifications.
//!
//! Subscribers get their own `mpsc` channel; the manager keeps the senders
//! and drops any whose receiver has gone away.

use std::sync::mpsc::{self, Receiver, Sender};

use kanban_models::{CardId, ColumnId};

/// Something that happened to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Board became available, either read from the store or seeded.
    Loaded { seeded: bool },

    /// A card changed position.
    CardMoved {
        card_id: CardId,
        from: (ColumnId, usize),
        to: (ColumnId, usize),
        revision: u64,
    },

    /// A card was appended to a column.
    CardAdded {
        card_id: CardId,
        column: ColumnId,
        revision: u64,
    },

    /// A card was deleted.
    CardRemoved {
        card_id: CardId,
        column: ColumnId,
        revision: u64,
    },

    /// The snapshot for `revision` reached the store.
    Persisted { revision: u64 },

    /// The snapshot for `revision` did not reach the store. In-memory
    /// state is unaffected.
    PersistFailed { revision: u64, error: String },
}

/// Fan-out list of subscriber channels.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<BoardEvent>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Sends to every live subscriber, pruning closed ones.
    pub(crate) fn broadcast(&mut self, event: BoardEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}
