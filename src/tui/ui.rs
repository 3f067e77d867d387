use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BottomNavigation, ScreenView, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};

fn split(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(3)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, main_area, nav_area] = split(frame.area());

    let depth = app
        .nav
        .back_stack()
        .iter()
        .filter(|entry| !app.nav.graph().destination(entry.destination).is_group())
        .count();
    let route = app.nav.current_route().unwrap_or_default().to_string();
    TitleBar::new(route, depth, app.status_message.clone()).render(frame, title_area);

    ScreenView::new(&app.content).render(frame, main_area);

    tui.bottom_nav.selected = app.selected_tab.get();
    BottomNavigation::new(&mut tui.bottom_nav).render(frame, nav_area);
}

/// Hit test: whether a click at this cell landed on the current screen.
pub fn hit_test_screen(column: u16, row: u16, frame_area: Rect) -> bool {
    let [_title_area, main_area, _nav_area] = split(frame_area);
    main_area.contains(Position::new(column, row))
}
