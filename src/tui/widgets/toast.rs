//! Toast notification widget for the TUI.
//!
//! Displays temporary messages that auto-dismiss.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Toast notification widget.
pub struct Toast<'a> {
    message: &'a str,
}

impl<'a> Toast<'a> {
    /// Creates a new toast widget.
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Calculates the area for the toast (top-right corner, below the header).
    pub fn area(screen: Rect) -> Rect {
        let width = 44.min(screen.width.saturating_sub(4));
        let height = 3.min(screen.height);
        let x = screen.x + screen.width.saturating_sub(width + 2);
        let y = screen.y + 2.min(screen.height.saturating_sub(height));
        Rect::new(x, y, width, height)
    }
}

/// Truncates to `max` characters, marking the cut with an ellipsis.
fn truncate(message: &str, max: usize) -> String {
    if message.chars().count() <= max {
        return message.to_string();
    }
    let mut out: String = message.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Widget for Toast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![Span::styled(
            truncate(self.message, inner.width as usize),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]);

        Paragraph::new(line).render(inner, buf);
    }
}
