//! Debug console state.
//!
//! Owns the input line, visibility, the overlay display state machine and the
//! console log. Submitting a line dispatches it through a [`CommandRouter`].

use crate::commands::handlers::CommandContext;
use crate::commands::router::{CommandRouter, DispatchError};
use crate::game::{EventBus, GameState};
use std::collections::VecDeque;
use tracing::debug;

/// Overlay shown below the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Idle,
    ShowHelp,
    ShowAutocomplete,
}

impl DisplayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ShowHelp => "show_help",
            Self::ShowAutocomplete => "show_autocomplete",
        }
    }
}

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Number of characters in the input.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Inserts a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert(c);
        }
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Severity of a console log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// A line in the console log.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

/// Bounded console log; the oldest lines are dropped first.
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl ConsoleLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, level: LogLevel, text: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(LogLine {
            level,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(LogLevel::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(LogLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LogLevel::Error, text);
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &LogLine> + ExactSizeIterator {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&LogLine> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new(200)
    }
}

/// The debug console.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    pub visible: bool,
    pub input: InputState,
    pub display: DisplayState,
    pub log: ConsoleLog,
    /// Input length seen at the end of the previous frame.
    last_len: usize,
}

impl ConsoleState {
    pub fn new(max_log_lines: usize) -> Self {
        Self {
            log: ConsoleLog::new(max_log_lines),
            ..Self::default()
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Shows autocomplete for the current input. Ignored when the input is blank.
    pub fn request_autocomplete(&mut self) -> bool {
        if self.input.text.trim().is_empty() {
            return false;
        }
        self.display = DisplayState::ShowAutocomplete;
        true
    }

    /// Ends a frame: an overlay is dismissed once the input length changes.
    pub fn end_frame(&mut self) {
        let len = self.input.char_len();
        if self.display != DisplayState::Idle && len != self.last_len {
            debug!(from = ?self.display, "Input changed, dismissing overlay");
            self.display = DisplayState::Idle;
        }
        self.last_len = len;
    }

    /// Clears the input line without dismissing the overlay.
    pub fn clear_input(&mut self) {
        self.input.take();
        self.last_len = 0;
    }

    /// Dispatches the input line.
    ///
    /// Returns `None` for an empty line. The input is cleared only when a
    /// command ran; failed dispatches leave it for editing.
    pub fn submit(
        &mut self,
        router: &CommandRouter,
        game: &mut GameState,
        events: &mut EventBus,
    ) -> Option<Result<String, DispatchError>> {
        if self.input.is_empty() {
            return None;
        }
        let line = self.input.text.clone();

        let mut ctx = CommandContext {
            game,
            events,
            display: &mut self.display,
            log: &mut self.log,
        };
        let result = router
            .dispatch(&line, &mut ctx)
            .map(|name| name.to_string());

        if result.is_ok() {
            self.clear_input();
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(text: &str) -> ConsoleState {
        let mut console = ConsoleState::new(10);
        console.input.insert_str(text);
        console.end_frame();
        console
    }

    #[test]
    fn test_input_insert_and_backspace() {
        let mut input = InputState::new();
        input.insert_str("héllo");
        assert_eq!(input.cursor, 5);
        input.move_left();
        input.backspace();
        assert_eq!(input.text, "hélo");
        input.move_home();
        input.delete();
        assert_eq!(input.text, "élo");
        input.move_end();
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_autocomplete_requires_non_blank_input() {
        let mut console = typed("   ");
        assert!(!console.request_autocomplete());
        assert_eq!(console.display, DisplayState::Idle);

        let mut console = typed("sp");
        assert!(console.request_autocomplete());
        assert_eq!(console.display, DisplayState::ShowAutocomplete);
    }

    #[test]
    fn test_overlay_persists_while_length_unchanged() {
        let mut console = typed("sp");
        console.request_autocomplete();
        console.end_frame();
        console.end_frame();
        assert_eq!(console.display, DisplayState::ShowAutocomplete);
    }

    #[test]
    fn test_length_change_resets_to_idle() {
        let mut console = typed("sp");
        console.request_autocomplete();
        console.end_frame();

        console.input.insert('a');
        console.end_frame();
        assert_eq!(console.display, DisplayState::Idle);
    }

    #[test]
    fn test_clear_input_keeps_overlay() {
        let mut console = typed("?");
        console.display = DisplayState::ShowHelp;
        console.clear_input();
        console.end_frame();
        assert_eq!(console.display, DisplayState::ShowHelp);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = ConsoleLog::new(2);
        log.info("a");
        log.warning("b");
        log.error("c");
        let texts: Vec<&str> = log.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
        assert_eq!(log.last().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_visibility() {
        let mut console = ConsoleState::default();
        console.open();
        assert!(console.visible);
        console.toggle();
        assert!(!console.visible);
        console.toggle();
        console.close();
        assert!(!console.visible);
    }
}
