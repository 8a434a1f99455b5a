//! Header widget for the TUI.
//!
//! Displays the application name, version, pause state and formation.

use crate::game::UnitFormationType;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header {
    paused: bool,
    formation: UnitFormationType,
    unit_count: usize,
}

impl Header {
    /// Creates a new header widget.
    pub fn new(paused: bool, formation: UnitFormationType, unit_count: usize) -> Self {
        Self {
            paused,
            formation,
            unit_count,
        }
    }

    fn status_text(&self) -> String {
        format!(
            " Units: {}  Formation: {} ",
            self.unit_count,
            self.formation.display_name()
        )
    }
}

impl Widget for Header {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Left side: app name and version
        let left_text = format!(" Skirmish v{}", env!("CARGO_PKG_VERSION"));
        let left_span = Span::styled(left_text, style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        // Center: pause indicator
        if self.paused {
            let paused_style = Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            let text = "PAUSED";
            let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
            buf.set_string(x, area.y, text, paused_style);
        }

        // Right side: unit count and formation
        let right_text = self.status_text();
        let right_width = right_text.chars().count() as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, &right_text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_shows_pause_and_formation() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        Header::new(true, UnitFormationType::XCross, 3).render(area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.starts_with(" Skirmish v"));
        assert!(line.contains("PAUSED"));
        assert!(line.contains("Formation: X-Cross"));
        assert!(line.contains("Units: 3"));
    }
}
