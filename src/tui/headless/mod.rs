//! Headless mode for scripted testing and automation.
//!
//! Runs the TUI without a terminal, executing scripted events against a
//! [`TestBackend`] and capturing the screen and game state for verification.

mod events;
mod output;

pub use events::{Assertion, Event, EventParser};
pub use output::{HeadlessOutput, OutputFormat, ScreenRenderer};

use crate::app::Session;
use crate::cli::Cli;
use crate::config::Config;
use crate::console::DisplayState;
use crate::error::{Result, SkirmishError};
use crate::game::ResourceKind;
use crate::tui::app::App;
use crate::tui::ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    /// Output format.
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<std::path::PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 40,
            output_format: OutputFormat::Text,
            fail_fast: false,
            output_file: None,
        }
    }
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(SkirmishError::config)?;
        let output_format = cli.parse_output_format().map_err(SkirmishError::config)?;

        Ok(Self {
            width,
            height,
            output_format,
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Screen lines for JSON output.
    pub screen_lines: Vec<String>,
    /// Number of events executed.
    pub events_executed: usize,
    /// Total execution duration.
    pub duration: Duration,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Number of assertions failed.
    pub assertions_failed: usize,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// Frame captures (for frames output mode).
    pub frames: Vec<Frame>,
}

/// Snapshot of application state for JSON output and state assertions.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HeadlessState {
    /// Panel receiving key presses.
    pub focus: String,
    /// Whether the app is still running.
    pub running: bool,
    pub console_visible: bool,
    /// Current console input text.
    pub input_text: String,
    /// Console overlay state.
    pub display: DisplayState,
    /// Number of console log lines.
    pub log_count: usize,
    /// Text of the newest console log line.
    pub last_log: Option<String>,
    pub gold: i64,
    pub wood: i64,
    pub stone: i64,
    pub unit_count: usize,
    pub selected_count: usize,
    pub settings_open: bool,
    pub paused: bool,
    pub formation: String,
    pub enable_fov: bool,
}

impl HeadlessState {
    pub fn from_app(app: &App) -> Self {
        let session = &app.session;
        let game = &session.game;
        let player = game.my_player_id;

        Self {
            focus: format!("{:?}", app.focus()),
            running: app.running,
            console_visible: session.console.visible,
            input_text: session.console.input.text.clone(),
            display: session.console.display,
            log_count: session.console.log.len(),
            last_log: session.console.log.last().map(|l| l.text.clone()),
            gold: game.resource_amount(player, ResourceKind::Gold),
            wood: game.resource_amount(player, ResourceKind::Wood),
            stone: game.resource_amount(player, ResourceKind::Stone),
            unit_count: game.units().len(),
            selected_count: game.selection().len(),
            settings_open: session.hud.settings.open,
            paused: game.paused,
            formation: format!("{:?}", game.formation),
            enable_fov: game.parameters.bool("enable_fov").unwrap_or(false),
        }
    }

    /// Value of a named field, as used by `assert:state:` events.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "focus" => self.focus.clone(),
            "running" => self.running.to_string(),
            "console_visible" => self.console_visible.to_string(),
            "input_text" => self.input_text.clone(),
            "display" => self.display.as_str().to_string(),
            "log_count" => self.log_count.to_string(),
            "last_log" => self.last_log.clone().unwrap_or_default(),
            "gold" => self.gold.to_string(),
            "wood" => self.wood.to_string(),
            "stone" => self.stone.to_string(),
            "unit_count" => self.unit_count.to_string(),
            "selected_count" => self.selected_count.to_string(),
            "settings_open" => self.settings_open.to_string(),
            "paused" => self.paused.to_string(),
            "formation" => self.formation.clone(),
            "enable_fov" => self.enable_fov.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// A captured frame (screen state after an event).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0 = initial state).
    pub number: usize,
    /// Event that produced this frame (None for initial).
    pub event: Option<String>,
    /// Screen content.
    pub screen: String,
}

/// Runs the TUI in headless mode.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    events: Vec<Event>,
    frames: Vec<Frame>,
    start_time: Instant,
    assertions_passed: usize,
    assertions_failed: usize,
}

impl HeadlessRunner {
    /// Creates a new headless runner for a session.
    pub fn new(config: HeadlessConfig, session: Session) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend).map_err(|e| {
            SkirmishError::internal(format!("Failed to create test terminal: {e}"))
        })?;

        Ok(Self {
            config,
            terminal,
            app: App::new(session),
            events: Vec::new(),
            frames: Vec::new(),
            start_time: Instant::now(),
            assertions_passed: 0,
            assertions_failed: 0,
        })
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        let parser = EventParser::new();
        self.events = parser.parse_all(input)?;
        Ok(())
    }

    /// Loads events from a script file, or stdin for `-`.
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| SkirmishError::internal(format!("Failed to read stdin: {e}")))?;
            buffer
        } else {
            std::fs::read_to_string(path).map_err(|e| {
                SkirmishError::internal(format!("Failed to read script file: {e}"))
            })?
        };

        self.load_events(&content)
    }

    /// Runs the headless execution and returns the result.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        self.start_time = Instant::now();

        // Capture initial frame
        self.app.tick();
        self.capture_frame(None)?;

        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            let event_str = event.to_string();
            debug!(event = %event_str, "Headless event");

            match &event {
                Event::Key(key_event) => {
                    self.app.handle_event(crate::tui::Event::Key(*key_event));
                }
                Event::Type(text) => {
                    for c in text.chars() {
                        self.app.session.console.input.insert(c);
                    }
                }
                Event::Command(line) => self.run_command(line),
                Event::Wait(duration) => {
                    tokio::time::sleep(*duration).await;
                }
                Event::Resize(w, h) => {
                    self.terminal
                        .resize(ratatui::layout::Rect::new(0, 0, *w, *h))
                        .map_err(|e| SkirmishError::internal(format!("Resize failed: {e}")))?;
                }
                Event::Snapshot(_name) => {
                    // Snapshots are captured as frames
                }
                Event::Assert(assertion) => {
                    self.draw()?;
                    let screen = self.render_screen();
                    if assertion.check(&screen, &self.app) {
                        self.assertions_passed += 1;
                    } else {
                        info!(assertion = %event_str, "Assertion failed");
                        self.assertions_failed += 1;
                        if self.config.fail_fast {
                            break;
                        }
                    }
                }
            }

            events_executed += 1;

            // End of frame, then render
            self.app.tick();
            self.draw()?;

            if self.config.output_format == OutputFormat::Frames {
                self.capture_frame(Some(event_str))?;
            }

            if !self.app.running {
                break;
            }
        }

        self.app.tick();
        self.draw()?;
        let screen = self.render_screen();
        let screen_lines = screen.lines().map(String::from).collect();
        let state = HeadlessState::from_app(&self.app);
        self.app.session.shutdown();

        Ok(HeadlessResult {
            screen,
            screen_lines,
            events_executed,
            duration: self.start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            state,
            frames: self.frames,
        })
    }

    /// Opens the console, replaces its input with `line` and submits it.
    fn run_command(&mut self, line: &str) {
        let console = &mut self.app.session.console;
        console.open();
        console.clear_input();
        console.input.insert_str(line);
        self.app.session.submit_console();
    }

    fn draw(&mut self) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, &self.app))
            .map_err(|e| SkirmishError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    /// Renders the current screen to a string.
    fn render_screen(&self) -> String {
        ScreenRenderer::render(self.terminal.backend().buffer())
    }

    /// Captures the current frame.
    fn capture_frame(&mut self, event: Option<String>) -> Result<()> {
        self.draw()?;

        let screen = self.render_screen();
        let number = self.frames.len();
        self.frames.push(Frame {
            number,
            event,
            screen,
        });

        Ok(())
    }
}

/// Runs headless mode from CLI arguments. Returns the process exit code.
pub async fn run_headless(cli: &Cli, config: &Config) -> Result<i32> {
    cli.validate_headless().map_err(SkirmishError::config)?;

    let headless_config = HeadlessConfig::from_cli(cli)?;
    let mut session = Session::new(config)?;
    if cli.open_console {
        session.console.open();
    }
    let mut runner = HeadlessRunner::new(headless_config.clone(), session)?;

    if let Some(ref events_str) = cli.events {
        runner.load_events(events_str)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let result = runner.run().await?;

    let output = HeadlessOutput::new(headless_config.output_format);
    let output_str = output.format(&result);

    if let Some(ref path) = headless_config.output_file {
        std::fs::write(path, &output_str).map_err(|e| {
            SkirmishError::internal(format!("Failed to write output file: {e}"))
        })?;
    } else {
        print!("{}", output_str);
    }

    // Exit code reflects assertions
    if result.assertions_failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
