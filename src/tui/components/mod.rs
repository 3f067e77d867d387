//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line with the current route and back stack depth
//! - `ScreenView`: the current destination's label and content
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `BottomNavigation`: tab bar; remembers item areas for mouse hits and
//!   reports taps as events
//!
//! Components receive external data as props, never by reaching into the
//! `App`. Routing decisions stay in `core::action`.

pub mod bottom_nav;
pub mod screen_view;
pub mod title_bar;

pub use bottom_nav::{BottomNavState, BottomNavigation};
pub use screen_view::ScreenView;
pub use title_bar::TitleBar;
