//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event or when the selected tab's change counter
//! moved.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::routes::{BOTTOM_NAV_ITEMS, Screen};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::BottomNavState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core app state)
pub struct TuiState {
    pub bottom_nav: BottomNavState<Screen>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            bottom_nav: BottomNavState::new(&BOTTOM_NAV_ITEMS, app.selected_tab.get()),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Map a terminal event to an action. The bottom bar gets first look.
///
/// Several events can be handled between two frames, so the bar's selection
/// is synced from the app here as well as in `draw_ui`.
fn route_event(
    event: TuiEvent,
    app: &App,
    tui: &mut TuiState,
    frame_area: ratatui::layout::Rect,
) -> Option<Action> {
    tui.bottom_nav.selected = app.selected_tab.get();
    if let Some(tab) = tui.bottom_nav.handle_event(&event) {
        return Some(Action::SelectTab(tab));
    }
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Back => Some(Action::Back),
        TuiEvent::Tap => Some(Action::Tap),
        TuiEvent::MouseClick(column, row) if ui::hit_test_screen(column, row, frame_area) => {
            Some(Action::Tap)
        }
        _ => None,
    }
}

/// Feeds `first` and then every pending event to `handle` until the queue is
/// empty or `handle` returns `true` (quit). A failing poll stops the drain
/// with its error.
fn drain_events(
    first: TuiEvent,
    mut poll: impl FnMut() -> std::io::Result<Option<TuiEvent>>,
    mut handle: impl FnMut(TuiEvent) -> bool,
) -> std::io::Result<bool> {
    let mut next = Some(first);
    while let Some(event) = next {
        if handle(event) {
            return Ok(true);
        }
        next = poll()?;
    }
    Ok(false)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config).map_err(std::io::Error::other)?;
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let tab_state = app.selected_tab.state();
    let mut seen_tab_changes = tab_state.changes();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if tab_state.changes() != seen_tab_changes {
            seen_tab_changes = tab_state.changes();
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = match poll_event_timeout(Duration::from_millis(500)) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => break Err(e),
        };
        needs_redraw = true;

        // Process first event + drain ALL pending events before next draw
        let drained = drain_events(first_event, poll_event_immediate, |event| {
            let frame_area = terminal.get_frame().area();
            route_event(event, &app, &mut tui, frame_area)
                .is_some_and(|action| update(&mut app, action) == Effect::Quit)
        });
        match drained {
            Ok(true) => {
                debug!("Quit requested");
                break Ok(());
            }
            Ok(false) => {}
            Err(e) => break Err(e),
        }
    };

    ratatui::restore();
    info!("tabnav shutting down");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::layout::Rect;

    #[test]
    fn test_route_event_prefers_bottom_bar() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        let area = Rect::new(0, 0, 80, 24);

        assert_eq!(
            route_event(TuiEvent::SelectIndex(1), &app, &mut tui, area),
            Some(Action::SelectTab(Screen::SecondGraph))
        );
        assert_eq!(route_event(TuiEvent::Tap, &app, &mut tui, area), Some(Action::Tap));
        assert_eq!(route_event(TuiEvent::Back, &app, &mut tui, area), Some(Action::Back));
        assert_eq!(route_event(TuiEvent::Quit, &app, &mut tui, area), Some(Action::Quit));
        assert_eq!(route_event(TuiEvent::Resize, &app, &mut tui, area), None);
    }

    #[test]
    fn test_tab_steps_between_frames_use_current_selection() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let area = Rect::new(0, 0, 80, 24);

        for _ in 0..2 {
            let action = route_event(TuiEvent::NextTab, &app, &mut tui, area).unwrap();
            update(&mut app, action);
        }
        assert_eq!(app.selected_tab.get(), Screen::First);

        let action = route_event(TuiEvent::PrevTab, &app, &mut tui, area).unwrap();
        assert_eq!(action, Action::SelectTab(Screen::SecondGraph));
    }

    #[test]
    fn test_drain_handles_every_pending_event() {
        let mut queue = vec![TuiEvent::Back, TuiEvent::Tap].into_iter();
        let mut handled = Vec::new();
        let quit = drain_events(
            TuiEvent::NextTab,
            || Ok(queue.next()),
            |event| {
                handled.push(event);
                false
            },
        )
        .unwrap();

        assert!(!quit);
        assert_eq!(handled, vec![TuiEvent::NextTab, TuiEvent::Back, TuiEvent::Tap]);
    }

    #[test]
    fn test_drain_stops_on_quit() {
        let mut polls = 0;
        let quit = drain_events(
            TuiEvent::Quit,
            || {
                polls += 1;
                Ok(Some(TuiEvent::Tap))
            },
            |event| event == TuiEvent::Quit,
        )
        .unwrap();

        assert!(quit);
        assert_eq!(polls, 0);
    }

    #[test]
    fn test_drain_surfaces_poll_errors() {
        let mut handled = 0;
        let err = drain_events(
            TuiEvent::Tap,
            || Err(std::io::Error::other("terminal gone")),
            |_| {
                handled += 1;
                false
            },
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "terminal gone");
        assert_eq!(handled, 1);
    }

    #[test]
    fn test_click_on_screen_is_a_tap() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        let area = Rect::new(0, 0, 80, 24);

        assert_eq!(
            route_event(TuiEvent::MouseClick(40, 10), &app, &mut tui, area),
            Some(Action::Tap)
        );
        assert_eq!(
            route_event(TuiEvent::MouseClick(40, 0), &app, &mut tui, area),
            None
        );
    }
}
