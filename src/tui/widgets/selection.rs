//! Selected-units list and selected-unit menu widgets.

use crate::hud::selection::{SelectedUnitMenu, SelectedUnitsList};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct SelectedUnitsPanel<'a> {
    list: &'a SelectedUnitsList,
}

impl<'a> SelectedUnitsPanel<'a> {
    pub fn new(list: &'a SelectedUnitsList) -> Self {
        Self { list }
    }
}

impl Widget for SelectedUnitsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Selection ({}) ", self.list.total()));

        let lines: Vec<Line> = if self.list.entries.is_empty() {
            vec![Line::from(Span::styled(
                "Nothing selected (s to select)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.list
                .entries
                .iter()
                .map(|e| Line::from(format!("{} x{}", e.name, e.count)))
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Details and skills of the most recently selected unit.
pub struct UnitMenuPanel<'a> {
    menu: &'a SelectedUnitMenu,
}

impl<'a> UnitMenuPanel<'a> {
    pub fn new(menu: &'a SelectedUnitMenu) -> Self {
        Self { menu }
    }
}

impl Widget for UnitMenuPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.menu.title));

        let mut lines = vec![Line::from(Span::styled(
            self.menu.level.as_str(),
            Style::default().fg(Color::Gray),
        ))];
        lines.extend(self.menu.production.iter().map(|p| {
            Line::from(Span::styled(p.as_str(), Style::default().fg(Color::Green)))
        }));

        if !self.menu.skills.is_empty() {
            lines.push(Line::from(""));
        }
        for skill in &self.menu.skills {
            let (state, style) = if skill.ready {
                (
                    "ready",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("busy", Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", skill.slot + 1), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{} ({state})", skill.name), style),
            ]));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
