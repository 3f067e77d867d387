//! # Selected Tab Adapter
//!
//! Turns destination-changed notifications into "which top-level tab is
//! selected", exposed as a [`State`].
//!
//! ```text
//! NavController ──DestinationChanged──► select_tab(tabs, hierarchy)
//!                                              │ Some(tab)
//!                                              ▼
//!                                        State<T>::set ──► bottom bar
//! ```
//!
//! The listener is held through a [`Subscription`] inside [`SelectedTab`],
//! so it is removed whenever the adapter is dropped, whatever the exit path.

use super::controller::{NavController, Subscription};
use super::observable::State;

/// A destination that can appear as a tab.
pub trait TopLevelDestination: Copy + PartialEq + 'static {
    fn route(&self) -> &'static str;
}

/// First tab, in priority order, whose route appears in `hierarchy`.
pub fn select_tab<T, S>(tabs: &[T], hierarchy: &[S]) -> Option<T>
where
    T: TopLevelDestination,
    S: AsRef<str>,
{
    tabs.iter()
        .copied()
        .find(|tab| hierarchy.iter().any(|route| route.as_ref() == tab.route()))
}

/// Live selected-tab state. Keep it alive for as long as updates are wanted.
pub struct SelectedTab<T> {
    state: State<T>,
    /// Held only for its `Drop`.
    _subscription: Subscription,
}

impl<T: TopLevelDestination> SelectedTab<T> {
    pub fn get(&self) -> T {
        self.state.get()
    }

    /// A reader handle that stays valid after the adapter is dropped.
    pub fn state(&self) -> State<T> {
        self.state.clone()
    }
}

/// Subscribes to `nav` and returns the tab matching the current destination,
/// kept up to date. Starts at `default` when nothing matches.
pub fn current_screen_as_state<T: TopLevelDestination>(
    nav: &mut NavController,
    tabs: &[T],
    default: T,
) -> SelectedTab<T> {
    let state = State::new(default);
    let writer = state.clone();
    let tabs = tabs.to_vec();

    let subscription = nav.subscribe(move |event| {
        if let Some(tab) = select_tab(&tabs, event.hierarchy.as_slice())
            && writer.set(tab)
        {
            log::info!("Selected tab is now {}", tab.route());
        }
    });

    SelectedTab {
        state,
        _subscription: subscription,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::nav::{NavOptions, PopUpTo};
    use crate::core::routes::{BOTTOM_NAV_ITEMS, Screen, app_graph};

    fn setup() -> (NavController, SelectedTab<Screen>) {
        let mut nav = NavController::new(app_graph().unwrap());
        let selected = current_screen_as_state(&mut nav, &BOTTOM_NAV_ITEMS, Screen::First);
        (nav, selected)
    }

    #[test]
    fn test_select_tab_prefers_earlier_tabs() {
        let tabs = [Screen::SecondGraph, Screen::First];
        let hierarchy = ["first", "nav_host"];
        assert_eq!(select_tab(&tabs, &hierarchy), Some(Screen::First));

        let nested = ["second", "second_graph", "nav_host"];
        assert_eq!(select_tab(&tabs, &nested), Some(Screen::SecondGraph));
        assert_eq!(select_tab(&BOTTOM_NAV_ITEMS, &nested), Some(Screen::SecondGraph));
    }

    #[test]
    fn test_select_tab_without_match() {
        assert_eq!(select_tab(&BOTTOM_NAV_ITEMS, &["nav_host"]), None);
        assert_eq!(select_tab::<Screen, &str>(&BOTTOM_NAV_ITEMS, &[]), None);
    }

    #[test]
    fn test_starts_from_current_destination() {
        let mut nav = NavController::new(app_graph().unwrap());
        nav.navigate("second", NavOptions::new()).unwrap();
        let selected = current_screen_as_state(&mut nav, &BOTTOM_NAV_ITEMS, Screen::First);
        assert_eq!(selected.get(), Screen::SecondGraph);
    }

    #[test]
    fn test_follows_navigation() {
        let (mut nav, selected) = setup();
        assert_eq!(selected.get(), Screen::First);

        nav.navigate("second_graph", NavOptions::new()).unwrap();
        assert_eq!(selected.get(), Screen::SecondGraph);

        let to_first = NavOptions::new()
            .launch_single_top(true)
            .pop_up_to(PopUpTo::new("first"));
        nav.navigate("first", to_first).unwrap();
        assert_eq!(selected.get(), Screen::First);
        assert_eq!(selected.state().changes(), 2);
    }

    #[test]
    fn test_sibling_moves_do_not_flicker() {
        let (mut nav, selected) = setup();
        nav.navigate("second_graph", NavOptions::new()).unwrap();
        let changes = selected.state().changes();

        nav.navigate("second", NavOptions::new()).unwrap();
        assert!(nav.pop_back_stack());
        assert_eq!(selected.get(), Screen::SecondGraph);
        assert_eq!(selected.state().changes(), changes);
    }

    #[test]
    fn test_no_updates_after_drop() {
        let (mut nav, selected) = setup();
        let reader = selected.state();
        assert_eq!(nav.listener_count(), 1);

        drop(selected);
        assert_eq!(nav.listener_count(), 0);

        nav.navigate("second_graph", NavOptions::new()).unwrap();
        assert_eq!(reader.get(), Screen::First);
        assert_eq!(reader.changes(), 0);
    }
}
