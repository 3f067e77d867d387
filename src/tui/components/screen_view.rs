//! # Screen View Component
//!
//! Renders one destination: its route as a centred label, any content lines
//! below it, and a dim hint for what a tap does. Used for every leaf.
//! Taps are not handled here; the event loop turns Enter or a click on this
//! area into `Action::Tap`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::ScreenContent;
use crate::tui::component::Component;

pub struct ScreenView<'a> {
    content: &'a ScreenContent,
}

impl<'a> ScreenView<'a> {
    pub fn new(content: &'a ScreenContent) -> Self {
        Self { content }
    }
}

impl Component for ScreenView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut text_lines = vec![Line::from(Span::styled(
            self.content.title.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))];
        text_lines.extend(self.content.lines.iter().map(|l| Line::from(l.as_str())));
        if !self.content.hint.is_empty() {
            text_lines.push(Line::from(""));
            text_lines.push(Line::from(Span::styled(
                self.content.hint,
                Style::default().fg(Color::DarkGray),
            )));
        }

        let [text_area] = Layout::vertical([Constraint::Length(text_lines.len() as u16)])
            .flex(Flex::Center)
            .areas(inner);

        let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, text_area);
    }
}
