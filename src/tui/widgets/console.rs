//! Debug console widgets: the help/autocomplete overlay and the log.

use crate::console::{ConsoleLog, DisplayState, LogLevel};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Lines shown below the console input while help or autocomplete is active.
pub struct ConsoleOverlay<'a> {
    display: DisplayState,
    lines: &'a [String],
}

impl<'a> ConsoleOverlay<'a> {
    pub fn new(display: DisplayState, lines: &'a [String]) -> Self {
        Self { display, lines }
    }

    /// Rows needed to show `lines` wrapped at `width`, borders included.
    pub fn height(lines: &[String], width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1) as usize;
        let rows: usize = lines
            .iter()
            .map(|l| l.chars().count().div_ceil(inner).max(1))
            .sum();
        u16::try_from(rows + 2).unwrap_or(u16::MAX)
    }
}

impl Widget for ConsoleOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.display {
            DisplayState::ShowHelp => " Commands ",
            DisplayState::ShowAutocomplete => " Matches ",
            DisplayState::Idle => "",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);

        let content: Vec<Line> = if self.lines.is_empty() {
            vec![Line::from(Span::styled(
                "No matching commands",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.lines.iter().map(|l| Line::from(l.as_str())).collect()
        };

        Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// The console log, newest line at the bottom.
pub struct ConsoleLogPanel<'a> {
    log: &'a ConsoleLog,
}

impl<'a> ConsoleLogPanel<'a> {
    pub fn new(log: &'a ConsoleLog) -> Self {
        Self { log }
    }
}

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Style::default().fg(Color::Gray),
        LogLevel::Warning => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red),
    }
}

impl Widget for ConsoleLogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Log ");
        let visible = block.inner(area).height as usize;

        let skip = self.log.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .log
            .lines()
            .skip(skip)
            .map(|l| Line::from(Span::styled(l.text.as_str(), level_style(l.level))))
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(area: Rect, buf: &Buffer) -> String {
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_overlay_height_wraps() {
        let lines = vec!["a".repeat(10), "b".repeat(25)];
        // Inner width 10: one row, then three rows.
        assert_eq!(ConsoleOverlay::height(&lines, 12), 6);
        assert_eq!(ConsoleOverlay::height(&[], 12), 2);
    }

    #[test]
    fn test_log_panel_shows_newest_lines() {
        let mut log = ConsoleLog::new(10);
        for i in 0..5 {
            log.info(format!("line {i}"));
        }
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        ConsoleLogPanel::new(&log).render(area, &mut buf);

        let screen = rendered(area, &buf);
        assert!(screen.contains("line 3"));
        assert!(screen.contains("line 4"));
        assert!(!screen.contains("line 2"));
    }
}
