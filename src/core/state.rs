//! # Application State
//!
//! Core state for the app shell. No TUI types here; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── nav: NavController                  // back stack + listeners
//! ├── selected_tab: SelectedTab<Screen>   // derived from nav, bottom bar reads it
//! ├── tab_options: TabOptions             // how tab taps navigate
//! ├── counter_initial_value: u32          // GraphCounter value on creation
//! ├── content: ScreenContent              // what the current screen shows
//! └── status_message: String              // status line text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::{ResolvedConfig, TabOptions};
use crate::core::nav::{NavController, NavError, SelectedTab, current_screen_as_state};
use crate::core::routes::{BOTTOM_NAV_ITEMS, Screen, app_graph};

/// Counter scoped to a back stack entry. Screens inside `second_graph`
/// share the one owned by the group entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCounter {
    pub count: u32,
}

impl GraphCounter {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

/// Props for the screen renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenContent {
    pub title: String,
    pub lines: Vec<String>,
    pub hint: &'static str,
}

pub struct App {
    pub nav: NavController,
    pub selected_tab: SelectedTab<Screen>,
    pub tab_options: TabOptions,
    pub counter_initial_value: u32,
    pub content: ScreenContent,
    pub status_message: String,
}

impl App {
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, NavError> {
        let mut nav = NavController::new(app_graph()?);
        let start = Screen::from_route(nav.graph().route(nav.graph().find_start_destination()))
            .unwrap_or(Screen::First);
        let selected_tab = current_screen_as_state(&mut nav, &BOTTOM_NAV_ITEMS, start);

        let mut app = Self {
            nav,
            selected_tab,
            tab_options: config.tab_options,
            counter_initial_value: config.counter_initial_value,
            content: ScreenContent::default(),
            status_message: String::from("Welcome to tabnav!"),
        };
        app.refresh_content()?;
        Ok(app)
    }

    pub fn current_screen(&self) -> Option<Screen> {
        self.nav.current_route().and_then(Screen::from_route)
    }

    /// The counter owned by the live `second_graph` entry. Fails outside it.
    pub fn shared_counter(&mut self) -> Result<Rc<RefCell<GraphCounter>>, NavError> {
        let initial = self.counter_initial_value;
        self.nav
            .graph_view_model(Screen::SecondGraph.route(), || GraphCounter::new(initial))
    }

    /// The counter owned by the current screen's own entry.
    pub fn screen_counter(&mut self) -> Result<Rc<RefCell<GraphCounter>>, NavError> {
        let initial = self.counter_initial_value;
        let owner = self
            .nav
            .current_entry()
            .map(|entry| entry.id)
            .ok_or_else(|| NavError::NotOnBackStack(String::from("<empty>")))?;
        self.nav.view_model(owner, || GraphCounter::new(initial))
    }

    /// Rebuilds `content` for the current destination. This is where screens
    /// obtain their view models, so they are created on first visit.
    pub fn refresh_content(&mut self) -> Result<(), NavError> {
        let Some(screen) = self.current_screen() else {
            self.content = ScreenContent::default();
            return Ok(());
        };

        self.content = match screen {
            Screen::First | Screen::SecondGraph => ScreenContent {
                title: screen.route().to_string(),
                lines: Vec::new(),
                hint: "",
            },
            Screen::FirstSecond => {
                let shared = self.shared_counter()?.borrow().count;
                ScreenContent {
                    title: screen.route().to_string(),
                    lines: vec![format!("shared count: {shared}")],
                    hint: "Enter: open second",
                }
            }
            Screen::Second => {
                let shared = self.shared_counter()?.borrow().count;
                let own = self.screen_counter()?.borrow().count;
                ScreenContent {
                    title: screen.route().to_string(),
                    lines: vec![
                        format!("shared count: {shared}"),
                        format!("screen count: {own}"),
                    ],
                    hint: "Enter: increment shared count",
                }
            }
        };
        Ok(())
    }
}
