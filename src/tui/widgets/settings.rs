//! Settings panel overlay.

use crate::game::parameters::{EditorKind, ParameterValue};
use crate::hud::settings::SettingRow;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Width of a slider gauge in cells.
const SLIDER_WIDTH: usize = 12;

pub struct SettingsOverlay<'a> {
    menus: &'a [&'a str],
    selected_menu: usize,
    rows: &'a [SettingRow],
    cursor: usize,
}

impl<'a> SettingsOverlay<'a> {
    pub fn new(
        menus: &'a [&'a str],
        selected_menu: usize,
        rows: &'a [SettingRow],
        cursor: usize,
    ) -> Self {
        Self {
            menus,
            selected_menu,
            rows,
            cursor,
        }
    }

    /// Calculates the centered area for the panel.
    pub fn area(parent: Rect) -> Rect {
        let width = 64.min(parent.width.saturating_sub(4));
        let height = 14.min(parent.height.saturating_sub(4));
        let x = parent.x + (parent.width.saturating_sub(width)) / 2;
        let y = parent.y + (parent.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width, height)
    }
}

/// Text editor for a row: `[x]` toggles, a gauge for sliders, the bare
/// value otherwise.
pub fn editor_text(row: &SettingRow) -> String {
    match (row.editor, row.value) {
        (EditorKind::Toggle, ParameterValue::Bool(on)) => {
            if on { "[x]" } else { "[ ]" }.to_string()
        }
        (EditorKind::Slider { min, max }, value) => {
            let v = value.as_f64().unwrap_or(min);
            let fraction = if max > min { (v - min) / (max - min) } else { 0.0 };
            let filled = (fraction.clamp(0.0, 1.0) * SLIDER_WIDTH as f64).round() as usize;
            format!(
                "{}{} {value}",
                "█".repeat(filled),
                "░".repeat(SLIDER_WIDTH - filled)
            )
        }
        (_, value) => value.to_string(),
    }
}

impl Widget for SettingsOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Settings (game paused, o to close) ");
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(10)])
            .split(inner);

        let menu_lines: Vec<Line> = self
            .menus
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == self.selected_menu {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(format!(" {name}"), style))
            })
            .collect();
        Paragraph::new(menu_lines).render(columns[0], buf);

        let row_lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if i == self.cursor {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{:<20}", row.label), style),
                    Span::raw(editor_text(row)),
                ])
            })
            .collect();
        Paragraph::new(row_lines).render(columns[1], buf);
    }
}
