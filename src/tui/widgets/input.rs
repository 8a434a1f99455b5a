//! Console input widget.
//!
//! A bordered single-line text field with a `> ` prompt that scrolls to keep
//! the cursor visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    cursor.saturating_sub(available_width)
}

/// Input bar widget.
pub struct InputBar<'a> {
    text: &'a str,
    cursor: usize,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Creates a new input bar widget.
    pub fn new(text: &'a str, cursor: usize, focused: bool) -> Self {
        Self {
            text,
            cursor,
            focused,
        }
    }

    /// Screen column of the cursor inside `area`.
    pub fn cursor_x(&self, area: Rect) -> u16 {
        let available_width = area.width.saturating_sub(5) as usize;
        let offset = calculate_scroll_offset(self.cursor, available_width);
        // Border (1) + prompt "> " (2)
        area.x + 3 + (self.cursor - offset) as u16
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Console ");

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        // Border left (1) + prompt "> " (2) + border right (1) + cursor space (1) = 5
        let available_width = area.width.saturating_sub(5) as usize;
        let scroll_offset = calculate_scroll_offset(self.cursor, available_width);
        let visible_text: String = self.text.chars().skip(scroll_offset).collect();

        let line = Line::from(vec![
            Span::styled("> ", prompt_style),
            Span::raw(visible_text),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_cursor_within_width() {
        assert_eq!(calculate_scroll_offset(5, 20), 0);
        assert_eq!(calculate_scroll_offset(20, 20), 0);
    }

    #[test]
    fn test_scroll_offset_cursor_beyond_width() {
        assert_eq!(calculate_scroll_offset(25, 20), 5);
        assert_eq!(calculate_scroll_offset(50, 20), 30);
    }

    #[test]
    fn test_scroll_offset_edge_cases() {
        assert_eq!(calculate_scroll_offset(0, 20), 0);
        assert_eq!(calculate_scroll_offset(5, 0), 5);
    }

    #[test]
    fn test_cursor_x() {
        let area = Rect::new(2, 10, 30, 3);
        assert_eq!(InputBar::new("add_gold", 8, true).cursor_x(area), 13);

        // 25 usable columns; the text scrolls past them.
        let long = "x".repeat(40);
        assert_eq!(InputBar::new(&long, 40, true).cursor_x(area), 2 + 3 + 25);
    }
}
