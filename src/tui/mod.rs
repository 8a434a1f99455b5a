//! Terminal User Interface for Skirmish.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod headless;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::app::Session;
use crate::error::{Result, SkirmishError};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    /// Flag to stop the terminal reader.
    shutdown_flag: Arc<AtomicBool>,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Signals shutdown to the terminal reader.
    pub fn signal_shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
    }

    /// Checks if shutdown has been signaled.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| SkirmishError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            SkirmishError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| SkirmishError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| SkirmishError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            SkirmishError::internal(format!("Failed to leave alternate screen: {e}"))
        })?;

        self.terminal
            .show_cursor()
            .map_err(|e| SkirmishError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop until the user quits.
    pub async fn run(&mut self, session: Session) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        let shutdown_flag = Arc::clone(&self.shutdown_flag);
        panic::set_hook(Box::new(move |panic_info| {
            shutdown_flag.store(true, Ordering::SeqCst);
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let mut app = App::new(session);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reader = self
            .event_handler
            .spawn(tx, Arc::clone(&self.shutdown_flag));

        let result = self.run_event_loop(&mut app, &mut rx).await;

        self.signal_shutdown();
        app.session.shutdown();
        let _ = reader.await;

        // Restore panic hook
        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app: &mut App,
        rx: &mut mpsc::UnboundedReceiver<Event>,
    ) -> Result<()> {
        let mut ticker = tokio::time::interval(self.event_handler.tick_rate());

        loop {
            app.tick();

            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| SkirmishError::internal(format!("Failed to draw: {e}")))?;

            if !app.running || self.is_shutdown() {
                break;
            }

            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => app.handle_event(event),
                    None => {
                        debug!("Terminal event reader closed");
                        break;
                    }
                },

                Some(signal) = app.session.skills.next_signal() => {
                    app.session.handle_skill_signal(signal);
                }

                _ = ticker.tick() => app.handle_event(Event::Tick),
            }
        }

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the interactive TUI for a session.
pub async fn run(session: Session) -> Result<()> {
    info!("Starting TUI");
    let mut tui = Tui::new()?;
    tui.run(session).await
}
