//! Kanban CLI library.
//!
//! Argument parsing and command handlers for the `kanban` binary. Each
//! invocation loads the board (or project list) from the state directory,
//! applies one command and prints the result.

pub mod cli;
pub mod commands;
