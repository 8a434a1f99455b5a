//! Building menu and building info panel.

use crate::hud::buildings::{BuildingMenu, InfoPanel};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// List of building buttons; unaffordable ones are dimmed.
pub struct BuildingMenuPanel<'a> {
    menu: &'a BuildingMenu,
    hovered: Option<usize>,
}

impl<'a> BuildingMenuPanel<'a> {
    pub fn new(menu: &'a BuildingMenu, hovered: Option<usize>) -> Self {
        Self { menu, hovered }
    }
}

impl Widget for BuildingMenuPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Buildings ");

        let lines: Vec<Line> = self
            .menu
            .buttons
            .iter()
            .enumerate()
            .map(|(i, button)| {
                let mut style = if button.enabled {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let marker = if self.hovered == Some(i) {
                    style = style.add_modifier(Modifier::REVERSED);
                    "▶ "
                } else {
                    "  "
                };
                Line::from(Span::styled(format!("{marker}{}", button.name), style))
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Title, description and costs of the hovered building.
pub struct InfoPanelWidget<'a> {
    panel: &'a InfoPanel,
}

impl<'a> InfoPanelWidget<'a> {
    pub fn new(panel: &'a InfoPanel) -> Self {
        Self { panel }
    }
}

impl Widget for InfoPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.panel.title));

        let mut lines = vec![Line::from(self.panel.description.as_str()), Line::from("")];
        lines.extend(self.panel.costs.iter().map(|cost| {
            let style = if cost.affordable {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Line::from(Span::styled(
                format!("{}: {}", cost.resource, cost.amount),
                style,
            ))
        }));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
