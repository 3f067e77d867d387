//! # TitleBar Component
//!
//! Top status line showing where the user is in the back stack.
//!
//! ## Responsibilities
//!
//! - Display the current route
//! - Display the back stack depth (leaf entries only)
//! - Display the status message (e.g. "at second", "Navigation failed: ...")
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("second".to_string(), 2, "at second".to_string());
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"tabnav [second] depth 2 | at second"`
//! 2. **Default**: `"tabnav [second] depth 2"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
///
/// # Props
///
/// - `route`: Route of the current destination
/// - `depth`: Number of leaf entries on the back stack
/// - `status_message`: Transient status from the last action
pub struct TitleBar {
    pub route: String,
    pub depth: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(route: String, depth: usize, status_message: String) -> Self {
        Self {
            route,
            depth,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("tabnav [{}] depth {}", self.route, self.depth)
        } else {
            format!(
                "tabnav [{}] depth {} | {}",
                self.route, self.depth, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    /// A plain `Span` on a single line; no borders.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                title_bar.render(f, area);
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("second".to_string(), 2, "at second".to_string());
        let text = rendered(&mut title_bar);

        assert!(text.contains("tabnav [second]"));
        assert!(text.contains("depth 2"));
        assert!(text.contains("| at second"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("first".to_string(), 1, "".to_string());
        let text = rendered(&mut title_bar);

        assert!(text.contains("tabnav [first] depth 1"));
        assert!(!text.contains('|'));
    }
}
