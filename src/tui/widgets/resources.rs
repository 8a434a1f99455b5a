//! Resource counters bar.

use crate::hud::resources::ResourceCounters;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct ResourceBar<'a> {
    counters: &'a ResourceCounters,
}

impl<'a> ResourceBar<'a> {
    pub fn new(counters: &'a ResourceCounters) -> Self {
        Self { counters }
    }
}

impl Widget for ResourceBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = Style::default().fg(Color::Gray);
        let value_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::raw(" ")];
        for (kind, text) in self.counters.iter() {
            spans.push(Span::styled(format!("{kind}: "), label_style));
            spans.push(Span::styled(text.to_string(), value_style));
            spans.push(Span::raw("   "));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
