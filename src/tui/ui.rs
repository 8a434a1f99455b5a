//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, Focus};
use super::widgets::{
    buildings::{BuildingMenuPanel, InfoPanelWidget},
    console::{ConsoleLogPanel, ConsoleOverlay},
    header::Header,
    help::HelpOverlay,
    input::InputBar,
    resources::ResourceBar,
    selection::{SelectedUnitsPanel, UnitMenuPanel},
    settings::SettingsOverlay,
    toast::Toast,
};
use crate::console::DisplayState;
use crate::hud::settings::SettingsPanel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Rows of console log shown under the input.
const CONSOLE_LOG_ROWS: u16 = 6;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let session = &app.session;

    let console_height = if session.console.visible {
        3 + overlay_height(app, area.width) + CONSOLE_LOG_ROWS
    } else {
        0
    };

    // Main layout: header, resources, console, HUD
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Header
            Constraint::Length(1),              // Resources
            Constraint::Length(console_height), // Console
            Constraint::Min(3),                 // HUD panels
        ])
        .split(area);

    frame.render_widget(
        Header::new(
            session.game.paused,
            session.game.formation,
            session.game.units().len(),
        ),
        main_layout[0],
    );
    frame.render_widget(ResourceBar::new(&session.hud.resources), main_layout[1]);
    if session.console.visible {
        render_console(frame, main_layout[2], app);
    }
    render_hud(frame, main_layout[3], app);

    if session.hud.settings.open {
        render_settings(frame, area, app);
    }
    if app.show_key_help {
        frame.render_widget(HelpOverlay::new(), HelpOverlay::area(area));
    }
    if let Some(toast) = &app.toast {
        frame.render_widget(Toast::new(&toast.message), Toast::area(area));
    }
}

fn overlay_height(app: &App, width: u16) -> u16 {
    if app.session.console.display == DisplayState::Idle {
        return 0;
    }
    let lines = app.session.overlay_lines();
    ConsoleOverlay::height(&lines, width).max(3)
}

/// Renders the console: input line, help/autocomplete overlay and log.
fn render_console(frame: &mut Frame, area: Rect, app: &App) {
    let console = &app.session.console;
    let overlay = overlay_height(app, area.width);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(overlay),
            Constraint::Min(0),
        ])
        .split(area);

    let focused = app.focus() == Focus::Console;
    let input = InputBar::new(&console.input.text, console.input.cursor, focused);
    let cursor_x = input.cursor_x(layout[0]);
    frame.render_widget(input, layout[0]);

    if overlay > 0 {
        let lines = app.session.overlay_lines();
        frame.render_widget(ConsoleOverlay::new(console.display, &lines), layout[1]);
    }
    frame.render_widget(ConsoleLogPanel::new(&console.log), layout[2]);

    if focused {
        frame.set_cursor_position((cursor_x, layout[0].y + 1));
    }
}

/// Renders building menu, info panel, selection list and unit menu.
fn render_hud(frame: &mut Frame, area: Rect, app: &App) {
    let hud = &app.session.hud;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let info_height = if hud.info_panel.visible { 8 } else { 0 };
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(info_height)])
        .split(columns[0]);

    frame.render_widget(
        BuildingMenuPanel::new(&hud.building_menu, hud.hovered()),
        left[0],
    );
    if hud.info_panel.visible {
        frame.render_widget(InfoPanelWidget::new(&hud.info_panel), left[1]);
    }

    if hud.unit_menu.visible {
        let list_height = (hud.selected_units.entries.len() as u16 + 2).clamp(3, 8);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(list_height), Constraint::Min(3)])
            .split(columns[1]);
        frame.render_widget(SelectedUnitsPanel::new(&hud.selected_units), right[0]);
        frame.render_widget(UnitMenuPanel::new(&hud.unit_menu), right[1]);
    } else {
        frame.render_widget(SelectedUnitsPanel::new(&hud.selected_units), columns[1]);
    }
}

fn render_settings(frame: &mut Frame, area: Rect, app: &App) {
    let store = &app.session.game.parameters;
    let panel = &app.session.hud.settings;

    let menus = SettingsPanel::menus(store);
    let rows = panel.rows(store);
    frame.render_widget(
        SettingsOverlay::new(&menus, panel.menu, &rows, panel.cursor),
        SettingsOverlay::area(area),
    );
}
