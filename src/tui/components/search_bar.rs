//! # SearchBar Component
//!
//! Single-line input for the free-text techs filter.
//!
//! ## Responsibilities
//!
//! - Capture text input (insert, backspace, cursor movement, paste)
//! - Emit `Changed` on every edit so the filter state stays in sync
//! - Emit `Submitted` on Enter (the buffer is kept, not cleared)
//!
//! ## State Management
//!
//! The buffer is internal state; `dimmed` is a prop from the input mode.
//! An empty submit is allowed: the filter is passed verbatim, empty or
//! not.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBar
#[derive(Debug, Clone, PartialEq)]
pub enum SearchBarEvent {
    /// Buffer content changed; carries the new filter value.
    Changed(String),
    /// User pressed Enter to dispatch a search.
    Submitted,
}

const PLACEHOLDER: &str = "Search devs by techs...";

/// Techs filter input.
///
/// # Props
///
/// - `dimmed`: true while the map has input focus
///
/// # State
///
/// - `buffer`: the current filter text
/// - `cursor`: byte offset of the cursor within `buffer`
pub struct SearchBar {
    pub buffer: String,
    pub dimmed: bool,
    cursor: usize,
}

impl SearchBar {
    /// Create a new SearchBar pre-filled with an initial filter.
    pub fn new(initial: String) -> Self {
        let cursor = initial.len();
        Self {
            buffer: initial,
            dimmed: false,
            cursor,
        }
    }

    fn prev_char_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Visible slice of the buffer plus the cursor column within it.
    /// Scrolls horizontally so the cursor always stays inside `inner_width`.
    fn visible(&self, inner_width: u16) -> (String, u16) {
        let inner = inner_width as usize;
        let cursor_col = UnicodeWidthStr::width(&self.buffer[..self.cursor]);
        if inner == 0 {
            return (String::new(), 0);
        }
        if cursor_col < inner {
            return (self.buffer.clone(), cursor_col as u16);
        }

        // Drop columns from the front until the cursor fits, keeping one
        // free cell for the cursor itself.
        let target = cursor_col + 1 - inner;
        let mut dropped = 0usize;
        let mut start = 0usize;
        for (idx, c) in self.buffer.char_indices() {
            if dropped >= target {
                start = idx;
                break;
            }
            dropped += UnicodeWidthChar::width(c).unwrap_or(0);
            start = idx + c.len_utf8();
        }
        (self.buffer[start..].to_string(), (cursor_col - dropped) as u16)
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let (visible_text, cursor_col) = self.visible(inner_width);

        let border_style = if self.dimmed {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title(" Techs ");

        let input = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(visible_text)
                .block(block)
                .style(Style::default().fg(Color::Green))
        };

        frame.render_widget(input, area);

        if !self.dimmed {
            frame.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
        }
    }
}

impl EventHandler for SearchBar {
    type Event = SearchBarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchBarEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => {
                // Single-line input: newlines don't belong in the filter
                let cleaned: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                self.buffer.insert_str(self.cursor, &cleaned);
                self.cursor += cleaned.len();
                Some(SearchBarEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(SearchBarEvent::Changed(self.buffer.clone()))
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary();
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary();
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            // The buffer survives a submit: the original screen keeps the
            // filter text after dispatching a search.
            TuiEvent::Submit => Some(SearchBarEvent::Submitted),
            _ => None,
        }
    }
}
