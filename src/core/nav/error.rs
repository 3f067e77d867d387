//! Errors raised by the navigation graph and controller.

use thiserror::Error;

use super::controller::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// No destination in the graph has this route key.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// The destination exists but has no entry on the current back stack.
    #[error("no back stack entry for route {0}")]
    NotOnBackStack(String),

    /// The owner entry was destroyed, so no state can be scoped to it.
    #[error("back stack entry {0} is not alive")]
    EntryNotAlive(EntryId),

    #[error("duplicate route in navigation graph: {0}")]
    DuplicateRoute(String),

    #[error("graph {graph} has start destination {start} which is not one of its children")]
    InvalidStartDestination { graph: String, start: String },
}
