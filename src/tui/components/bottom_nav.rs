//! # Bottom Navigation Component
//!
//! One row of tabs along the bottom of the screen, highlighting the selected
//! one.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BottomNavState` lives in `TuiState` and remembers where each item was
//!   drawn, for mouse hit testing
//! - `BottomNavigation` is created each frame with borrowed state
//!
//! It never navigates. `handle_event` reports which item was tapped and the
//! event loop decides what that means.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │      ▸ first      │   second_graph     │
//! └────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::nav::TopLevelDestination;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the bottom bar.
pub struct BottomNavState<T> {
    pub items: Vec<T>,
    /// Prop synced from the app each frame.
    pub selected: T,
    item_areas: Vec<Rect>,
}

impl<T: TopLevelDestination> BottomNavState<T> {
    pub fn new(items: &[T], selected: T) -> Self {
        Self {
            items: items.to_vec(),
            selected,
            item_areas: Vec::new(),
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.items.iter().position(|item| *item == self.selected)
    }

    fn step(&self, forward: bool) -> Option<T> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let next = match (self.selected_index(), forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        self.items.get(next).copied()
    }

    /// Item drawn at the given screen cell, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<T> {
        let position = Position::new(column, row);
        self.item_areas
            .iter()
            .position(|area| area.contains(position))
            .and_then(|index| self.items.get(index).copied())
    }
}

impl<T: TopLevelDestination> EventHandler for BottomNavState<T> {
    type Event = T;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<T> {
        match *event {
            TuiEvent::SelectIndex(index) => self.items.get(index).copied(),
            TuiEvent::NextTab => self.step(true),
            TuiEvent::PrevTab => self.step(false),
            TuiEvent::MouseClick(column, row) => self.hit_test(column, row),
            _ => None,
        }
    }
}

pub struct BottomNavigation<'a, T> {
    state: &'a mut BottomNavState<T>,
}

impl<'a, T: TopLevelDestination> BottomNavigation<'a, T> {
    pub fn new(state: &'a mut BottomNavState<T>) -> Self {
        Self { state }
    }
}

impl<T: TopLevelDestination> Component for BottomNavigation<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let count = self.state.items.len().max(1) as u32;
        let columns = Layout::horizontal(
            self.state
                .items
                .iter()
                .map(|_| Constraint::Ratio(1, count)),
        )
        .split(inner);

        self.state.item_areas = columns.to_vec();

        for (item, column) in self.state.items.iter().zip(columns.iter()) {
            let is_selected = *item == self.state.selected;
            let (label, style) = if is_selected {
                (
                    format!("▸ {}", item.route()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )
            } else {
                (item.route().to_string(), Style::default().fg(Color::Gray))
            };
            let paragraph = Paragraph::new(Line::from(label))
                .style(style)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, *column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::{BOTTOM_NAV_ITEMS, Screen};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut BottomNavState<Screen>) -> Terminal<TestBackend> {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                BottomNavigation::new(state).render(f, area);
            })
            .unwrap();
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, row)].symbol())
            .collect()
    }

    #[test]
    fn test_renders_items_in_order_with_marker() {
        let mut state = BottomNavState::new(&BOTTOM_NAV_ITEMS, Screen::SecondGraph);
        let terminal = draw(&mut state);
        let row = row_text(&terminal, 1);

        let first = row.find("first").unwrap();
        let second = row.find("▸ second_graph").unwrap();
        assert!(first < second);
        assert!(!row.contains("▸ first"));
    }

    #[test]
    fn test_keys_pick_items() {
        let mut state = BottomNavState::new(&BOTTOM_NAV_ITEMS, Screen::First);
        assert_eq!(state.handle_event(&TuiEvent::SelectIndex(1)), Some(Screen::SecondGraph));
        assert_eq!(state.handle_event(&TuiEvent::SelectIndex(5)), None);
        assert_eq!(state.handle_event(&TuiEvent::NextTab), Some(Screen::SecondGraph));
        assert_eq!(state.handle_event(&TuiEvent::PrevTab), Some(Screen::SecondGraph));
        assert_eq!(state.handle_event(&TuiEvent::Tap), None);

        state.selected = Screen::SecondGraph;
        assert_eq!(state.handle_event(&TuiEvent::NextTab), Some(Screen::First));
    }

    #[test]
    fn test_click_hits_rendered_item() {
        let mut state = BottomNavState::new(&BOTTOM_NAV_ITEMS, Screen::First);
        assert_eq!(state.hit_test(5, 1), None);

        draw(&mut state);
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(5, 1)), Some(Screen::First));
        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(35, 1)),
            Some(Screen::SecondGraph)
        );
        assert_eq!(state.handle_event(&TuiEvent::MouseClick(35, 0)), None);
    }
}
