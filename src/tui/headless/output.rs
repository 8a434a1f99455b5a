//! Result formatting for headless runs: plain screen, JSON report, or a
//! frame-by-frame transcript.

use super::{HeadlessResult, HeadlessState};
use ratatui::buffer::Buffer;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Final screen followed by a run summary.
    #[default]
    Text,
    /// Screen, game state and assertion counts as one JSON document.
    Json,
    /// Every captured frame, labelled with the event that produced it.
    Frames,
}

impl OutputFormat {
    const NAMES: [(&'static str, OutputFormat); 3] = [
        ("text", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("frames", OutputFormat::Frames),
    ];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, format)| *format)
            .ok_or_else(|| format!("Invalid output format: {s}. Expected: text, json, or frames"))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = Self::NAMES
            .iter()
            .find(|(_, format)| format == self)
            .map_or("text", |(name, _)| name);
        f.write_str(name)
    }
}

/// Turns a rendered buffer into text.
pub struct ScreenRenderer;

impl ScreenRenderer {
    /// One line per row with trailing spaces removed; blank rows at the
    /// bottom are dropped. Always ends with a newline.
    pub fn render(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut rows: Vec<String> = (area.y..area.y + area.height)
            .map(|y| {
                let row: String = (area.x..area.x + area.width)
                    .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect();
                row.trim_end().to_string()
            })
            .collect();

        let used = rows.iter().rposition(|row| !row.is_empty()).map_or(0, |i| i + 1);
        rows.truncate(used);

        let mut screen = rows.join("\n");
        screen.push('\n');
        screen
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    screen: &'a str,
    screen_lines: &'a [String],
    events_executed: usize,
    duration_ms: u128,
    assertions: AssertionCounts,
    state: &'a HeadlessState,
}

#[derive(Debug, Serialize)]
struct AssertionCounts {
    passed: usize,
    failed: usize,
}

pub struct HeadlessOutput {
    format: OutputFormat,
}

impl HeadlessOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &HeadlessResult) -> String {
        match self.format {
            OutputFormat::Text => format!(
                "{}\n{}\n{}",
                result.screen,
                run_summary(result),
                state_summary(&result.state)
            ),
            OutputFormat::Json => json_report(result),
            OutputFormat::Frames => frames_transcript(result),
        }
    }
}

/// `Events: N executed in Xms`, plus assertion counts when any ran.
fn run_summary(result: &HeadlessResult) -> String {
    let mut line = format!(
        "Events: {} executed in {}ms",
        result.events_executed,
        result.duration.as_millis()
    );
    if result.assertions_passed + result.assertions_failed > 0 {
        line.push_str(&format!(
            " | Assertions: {} passed, {} failed",
            result.assertions_passed, result.assertions_failed
        ));
    }
    line
}

fn state_summary(state: &HeadlessState) -> String {
    format!(
        "State: gold={} wood={} stone={} units={} selected={} console={}\n",
        state.gold,
        state.wood,
        state.stone,
        state.unit_count,
        state.selected_count,
        if state.console_visible {
            state.display.as_str()
        } else {
            "closed"
        }
    )
}

fn json_report(result: &HeadlessResult) -> String {
    let report = JsonReport {
        screen: &result.screen,
        screen_lines: &result.screen_lines,
        events_executed: result.events_executed,
        duration_ms: result.duration.as_millis(),
        assertions: AssertionCounts {
            passed: result.assertions_passed,
            failed: result.assertions_failed,
        },
        state: &result.state,
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {e}\"}}"))
}

fn frames_transcript(result: &HeadlessResult) -> String {
    let mut out = String::new();
    for frame in &result.frames {
        let label = frame.event.as_deref().unwrap_or("initial");
        out.push_str(&format!(
            "=== FRAME {} ({label}) ===\n{}\n\n",
            frame.number, frame.screen
        ));
    }
    out.push_str(&format!("Total: {} frames | {}\n", result.frames.len(), run_summary(result)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::DisplayState;
    use crate::tui::headless::Frame;
    use std::time::Duration;

    fn sample_result() -> HeadlessResult {
        HeadlessResult {
            screen: "Gold: 500\nConsole".to_string(),
            screen_lines: vec!["Gold: 500".to_string(), "Console".to_string()],
            events_executed: 3,
            duration: Duration::from_millis(150),
            assertions_passed: 2,
            assertions_failed: 0,
            state: HeadlessState {
                focus: "Console".to_string(),
                running: true,
                console_visible: true,
                input_text: "add_gold".to_string(),
                display: DisplayState::ShowAutocomplete,
                log_count: 0,
                last_log: None,
                gold: 500,
                wood: 300,
                stone: 150,
                unit_count: 1,
                selected_count: 0,
                settings_open: false,
                paused: false,
                formation: "None".to_string(),
                enable_fov: true,
            },
            frames: vec![
                Frame {
                    number: 0,
                    event: None,
                    screen: "Initial".to_string(),
                },
                Frame {
                    number: 1,
                    event: Some("type:add_gold".to_string()),
                    screen: "After typing".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_text_output() {
        let text = HeadlessOutput::new(OutputFormat::Text).format(&sample_result());

        assert!(text.starts_with("Gold: 500\nConsole\n"));
        assert!(text.contains("Events: 3 executed in 150ms | Assertions: 2 passed, 0 failed"));
        assert!(text.contains("State: gold=500 wood=300 stone=150 units=1 selected=0 console=show_autocomplete"));
    }

    #[test]
    fn test_text_output_without_assertions() {
        let mut result = sample_result();
        result.assertions_passed = 0;
        result.state.console_visible = false;
        let text = HeadlessOutput::new(OutputFormat::Text).format(&result);

        assert!(!text.contains("Assertions"));
        assert!(text.contains("console=closed"));
    }

    #[test]
    fn test_json_output() {
        let json = HeadlessOutput::new(OutputFormat::Json).format(&sample_result());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["events_executed"], 3);
        assert_eq!(parsed["duration_ms"], 150);
        assert_eq!(parsed["state"]["input_text"], "add_gold");
        assert_eq!(parsed["state"]["display"], "show_autocomplete");
        assert_eq!(parsed["state"]["last_log"], serde_json::Value::Null);
        assert_eq!(parsed["assertions"]["passed"], 2);
    }

    #[test]
    fn test_frames_output() {
        let frames = HeadlessOutput::new(OutputFormat::Frames).format(&sample_result());

        assert!(frames.contains("=== FRAME 0 (initial) ===\nInitial"));
        assert!(frames.contains("=== FRAME 1 (type:add_gold) ==="));
        assert!(frames.contains("Total: 2 frames | Events: 3 executed"));
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Frames.to_string(), "frames");
    }

    #[test]
    fn test_screen_renderer_trims_trailing_blank_rows() {
        let mut buffer = Buffer::empty(ratatui::layout::Rect::new(0, 0, 10, 4));
        buffer.set_string(0, 0, "Gold: 5", ratatui::style::Style::default());
        assert_eq!(ScreenRenderer::render(&buffer), "Gold: 5\n");
    }

    #[test]
    fn test_screen_renderer_blank_buffer() {
        let buffer = Buffer::empty(ratatui::layout::Rect::new(0, 0, 4, 2));
        assert_eq!(ScreenRenderer::render(&buffer), "\n");
    }
}
