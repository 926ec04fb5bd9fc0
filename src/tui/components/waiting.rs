//! # Waiting Screen Component
//!
//! Shown while the viewport is unset: before the permission request
//! resolves, and forever if it is denied. No map renders without a known
//! center.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct WaitingScreen {
    spinner_frame: usize,
}

impl WaitingScreen {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }
}

impl Component for WaitingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];

        let text_lines = vec![
            Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Yellow)),
                Span::styled(
                    " Acquiring location...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled("devradar", Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let text_height = text_lines.len() as u16;
        let vertical_layout = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .split(area);

        let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, vertical_layout[0]);
    }
}
