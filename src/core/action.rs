//! # Actions
//!
//! Everything the user can do becomes an `Action`.
//! Tab picked in the bottom bar? That's `Action::SelectTab(screen)`.
//! Enter on a screen? That's `Action::Tap`.
//!
//! `update()` applies an action to the `App` and returns an `Effect` for the
//! event loop. Routing decisions live here, not in the components.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, warn};

use crate::core::nav::{NavError, NavOptions, PopUpTo};
use crate::core::routes::Screen;
use crate::core::state::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTab(Screen),
    Tap,
    Back,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    let result = match action {
        Action::Quit => return Effect::Quit,
        Action::Back => {
            if !app.nav.pop_back_stack() {
                return Effect::Quit;
            }
            Ok(())
        }
        Action::SelectTab(tab) => select_tab(app, tab),
        Action::Tap => tap(app),
    };

    let result = result.and_then(|()| app.refresh_content());
    match result {
        Ok(()) => {
            if let Some(route) = app.nav.current_route() {
                app.status_message = format!("at {route}");
            }
        }
        Err(e) => {
            warn!("{:?} failed: {}", action, e);
            app.status_message = format!("Navigation failed: {e}");
        }
    }
    Effect::None
}

/// Bottom bar selection: keep one entry per tab and bring back what the tab
/// showed last time.
fn select_tab(app: &mut App, tab: Screen) -> Result<(), NavError> {
    let graph = app.nav.graph();
    let start = graph.route(graph.find_start_destination()).to_string();
    let tab_options = app.tab_options;

    let options = NavOptions::new()
        .launch_single_top(tab_options.launch_single_top)
        .restore_state(tab_options.restore_state)
        .pop_up_to(PopUpTo::new(start).save_state(tab_options.save_state));
    app.nav.navigate(tab.route(), options)
}

fn tap(app: &mut App) -> Result<(), NavError> {
    match app.current_screen() {
        Some(Screen::FirstSecond) => app.nav.navigate(Screen::Second.route(), NavOptions::new()),
        Some(Screen::Second) => {
            app.shared_counter()?.borrow_mut().increment();
            Ok(())
        }
        Some(Screen::First | Screen::SecondGraph) | None => Ok(()),
    }
}
