//! # Profile Component
//!
//! Full-screen overlay for the marker tap-through destination. Opened with
//! Enter on a selected marker, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ProfileState` lives in `TuiState`
//! - `Profile` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::directory::Dev;
use crate::tui::event::TuiEvent;

/// Persistent state for the profile overlay. The navigation request only
/// carries a github_username; the dev snapshot is whatever the screen knew
/// at open time.
pub struct ProfileState {
    pub github_username: String,
    pub dev: Option<Dev>,
}

impl ProfileState {
    pub fn new(github_username: String, dev: Option<Dev>) -> Self {
        Self {
            github_username,
            dev,
        }
    }

    /// Handle a key event, returning a ProfileEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ProfileEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(ProfileEvent::Dismiss),
            _ => None,
        }
    }
}

/// Events emitted by the profile overlay.
pub enum ProfileEvent {
    Dismiss,
}

/// Transient render wrapper for the profile overlay.
pub struct Profile<'a> {
    state: &'a ProfileState,
}

impl<'a> Profile<'a> {
    pub fn new(state: &'a ProfileState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Profile ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let mut lines = Vec::new();
        if let Some(dev) = &self.state.dev {
            lines.push(Line::styled(
                dev.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                format!("https://github.com/{}", self.state.github_username),
                Style::default().fg(Color::DarkGray),
            ));
            lines.push(Line::raw(""));
            lines.push(Line::raw(
                dev.bio.clone().unwrap_or_else(|| "No bio provided.".to_string()),
            ));
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("Techs: {}", dev.techs.join(", ")),
                Style::default().fg(Color::Cyan),
            ));
            lines.push(Line::styled(
                format!("Avatar: {}", dev.avatar_url),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            // The dev list was replaced since the marker was activated;
            // the username is all that's left to show.
            lines.push(Line::styled(
                format!("https://github.com/{}", self.state.github_username),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, overlay);
    }
}

/// Rect centered in `area`, sized as percentages of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [horizontal] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(vertical);
    horizontal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_dev;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_escape_dismisses() {
        let mut state = ProfileState::new("deva".to_string(), None);
        assert!(matches!(
            state.handle_event(&TuiEvent::Escape),
            Some(ProfileEvent::Dismiss)
        ));
        assert!(matches!(
            state.handle_event(&TuiEvent::InputChar('q')),
            Some(ProfileEvent::Dismiss)
        ));
        assert!(state.handle_event(&TuiEvent::Submit).is_none());
    }

    #[test]
    fn test_render_with_dev_details() {
        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut dev = sample_dev("deva", -23.5, -46.6);
        dev.bio = Some("Builds radars".to_string());
        let state = ProfileState::new("deva".to_string(), Some(dev));

        terminal
            .draw(|f| Profile::new(&state).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Dev deva"));
        assert!(text.contains("github.com/deva"));
        assert!(text.contains("Builds radars"));
    }

    #[test]
    fn test_render_username_only() {
        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        let state = ProfileState::new("ghost".to_string(), None);
        terminal
            .draw(|f| Profile::new(&state).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("github.com/ghost"));
    }
}
