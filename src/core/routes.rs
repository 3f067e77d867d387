//! # Routes
//!
//! The app's fixed route table.
//!
//! ```text
//! nav_host            start = first
//! ├── first           tab
//! └── second_graph    tab, start = first/second
//!     ├── first/second
//!     └── second
//! ```

use crate::core::nav::{NavError, NavGraph, TopLevelDestination};

/// Route of the implicit root graph.
pub const ROOT_ROUTE: &str = "nav_host";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    First,
    SecondGraph,
    /// Start child of `SecondGraph`.
    FirstSecond,
    Second,
}

/// Tabs shown in the bottom bar, in priority order.
pub const BOTTOM_NAV_ITEMS: [Screen; 2] = [Screen::First, Screen::SecondGraph];

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::First,
        Screen::SecondGraph,
        Screen::FirstSecond,
        Screen::Second,
    ];

    pub fn route(&self) -> &'static str {
        match self {
            Screen::First => "first",
            Screen::SecondGraph => "second_graph",
            Screen::FirstSecond => "first/second",
            Screen::Second => "second",
        }
    }

    pub fn from_route(route: &str) -> Option<Screen> {
        Screen::ALL.into_iter().find(|screen| screen.route() == route)
    }
}

impl TopLevelDestination for Screen {
    fn route(&self) -> &'static str {
        Screen::route(self)
    }
}

/// Builds the navigation graph for the app.
pub fn app_graph() -> Result<NavGraph, NavError> {
    NavGraph::builder(ROOT_ROUTE, Screen::First.route())
        .composable(Screen::First.route())
        .navigation(
            Screen::SecondGraph.route(),
            Screen::FirstSecond.route(),
            |group| {
                group
                    .composable(Screen::FirstSecond.route())
                    .composable(Screen::Second.route())
            },
        )
        .build()
}
