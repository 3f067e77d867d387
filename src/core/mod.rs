//! # Core Application Logic
//!
//! Navigation and app state. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Routes (graph)       │
//!                    │  • NavController        │
//!                    │  • State (App)          │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`nav`]: graph, back stack, listeners, scoped view models
//! - [`routes`]: the app's route table
//! - [`state`]: the `App` struct and screen content
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: settings with defaults → file → env → CLI resolution

pub mod action;
pub mod config;
pub mod nav;
pub mod routes;
pub mod state;
