//! Callout for the selected marker: name, bio and techs, anchored inside
//! the map area. The original screen attaches this to the marker itself;
//! a corner box is the terminal equivalent.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::directory::Dev;
use crate::tui::component::Component;

const NO_BIO: &str = "No bio provided.";

pub struct Callout<'a> {
    pub dev: &'a Dev,
}

impl Callout<'_> {
    fn bio_lines(&self, inner_width: u16) -> Vec<String> {
        let bio = self.dev.bio.as_deref().unwrap_or(NO_BIO);
        textwrap::wrap(bio, inner_width.max(1) as usize)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    /// Total height including borders, for the given callout width.
    pub fn required_height(&self, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2);
        // name + bio + techs, plus two border rows
        1 + self.bio_lines(inner_width).len() as u16 + 1 + 2
    }
}

impl Component for Callout<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);

        let mut lines = vec![Line::styled(
            self.dev.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        for bio_line in self.bio_lines(inner_width) {
            lines.push(Line::styled(bio_line, Style::default().fg(Color::Gray)));
        }
        lines.push(Line::styled(
            self.dev.techs.join(", "),
            Style::default().fg(Color::Cyan),
        ));

        let block = Block::bordered().border_style(Style::default().fg(Color::Yellow));
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_dev;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_required_height_single_bio_line() {
        let mut dev = sample_dev("a", 0.0, 0.0);
        dev.bio = Some("short".to_string());
        let callout = Callout { dev: &dev };
        // borders + name + one bio line + techs
        assert_eq!(callout.required_height(40), 5);
    }

    #[test]
    fn test_required_height_grows_with_wrapped_bio() {
        let mut dev = sample_dev("a", 0.0, 0.0);
        dev.bio = Some("a noticeably longer bio that will need wrapping".to_string());
        let callout = Callout { dev: &dev };
        assert!(callout.required_height(20) > callout.required_height(60));
    }

    #[test]
    fn test_render_shows_fallback_bio() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();

        let dev = sample_dev("a", 0.0, 0.0);
        let mut callout = Callout { dev: &dev };
        terminal.draw(|f| callout.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Dev a"));
        assert!(text.contains("No bio provided."));
        assert!(text.contains("rust"));
    }
}
