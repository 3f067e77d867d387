//! # Navigation
//!
//! Route graph, back stack, and the pieces that hang off them.
//!
//! - [`graph`]: the immutable destination tree
//! - [`controller`]: back stack, `navigate`, listeners
//! - [`store`]: state containers scoped to back stack entries
//! - [`observable`]: `State<T>`, a value with a change counter
//! - [`adapter`]: destination changes → selected tab

pub mod adapter;
pub mod controller;
pub mod error;
pub mod graph;
pub mod observable;
pub mod store;

pub use adapter::{SelectedTab, TopLevelDestination, current_screen_as_state, select_tab};
pub use controller::{
    BackStackEntry, DestinationChanged, EntryId, ListenerId, NavController, NavOptions, PopUpTo,
    Subscription,
};
pub use error::NavError;
pub use graph::{Destination, DestinationId, DestinationKind, NavGraph};
pub use observable::State;
pub use store::ViewModelStore;
