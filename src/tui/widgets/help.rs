//! Help overlay widget for the TUI.
//!
//! Displays keyboard shortcuts.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Help overlay widget showing keyboard shortcuts.
pub struct HelpOverlay;

impl HelpOverlay {
    /// Creates a new help overlay widget.
    pub fn new() -> Self {
        Self
    }

    /// Calculates the centered area for the help overlay.
    pub fn area(parent: Rect) -> Rect {
        let width = 54.min(parent.width.saturating_sub(4));
        let height = 26.min(parent.height.saturating_sub(4));
        let x = parent.x + (parent.width.saturating_sub(width)) / 2;
        let y = parent.y + (parent.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width, height)
    }

    /// Returns the help content as lines.
    fn content() -> Vec<Line<'static>> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::White);
        let section_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        vec![
            Line::from(Span::styled("Map", section_style)),
            Self::shortcut_line("s", "Select next unit", key_style, desc_style),
            Self::shortcut_line("x", "Deselect last unit", key_style, desc_style),
            Self::shortcut_line("1-9", "Trigger skill of selected unit", key_style, desc_style),
            Self::shortcut_line("b", "Show next building info", key_style, desc_style),
            Self::shortcut_line("Esc", "Hide building info", key_style, desc_style),
            Self::shortcut_line("o", "Open settings (pauses)", key_style, desc_style),
            Self::shortcut_line("h, ?", "Toggle this help", key_style, desc_style),
            Line::from(""),
            Line::from(Span::styled("Debug console", section_style)),
            Self::shortcut_line("F1, `", "Open / close console", key_style, desc_style),
            Self::shortcut_line("Enter", "Run command", key_style, desc_style),
            Self::shortcut_line("Tab", "Show matching commands", key_style, desc_style),
            Self::shortcut_line("?", "Command: list all commands", key_style, desc_style),
            Line::from(""),
            Line::from(Span::styled("Settings", section_style)),
            Self::shortcut_line("↑/↓", "Select row", key_style, desc_style),
            Self::shortcut_line("←/→", "Move slider", key_style, desc_style),
            Self::shortcut_line("Space", "Flip toggle", key_style, desc_style),
            Self::shortcut_line("Tab", "Next group", key_style, desc_style),
            Line::from(""),
            Line::from(Span::styled("General", section_style)),
            Self::shortcut_line("q, Ctrl+C", "Quit", key_style, desc_style),
        ]
    }

    /// Creates a line with a keyboard shortcut and description.
    fn shortcut_line(
        key: &'static str,
        desc: &'static str,
        key_style: Style,
        desc_style: Style,
    ) -> Line<'static> {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:12}", key), key_style),
            Span::styled(desc, desc_style),
        ])
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keys (h to close) ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        Paragraph::new(Self::content()).block(block).render(area, buf);
    }
}
