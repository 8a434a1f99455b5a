//! Library-level tests against a default session.

mod console_test;
mod skills_test;

use skirmish::app::Session;
use skirmish::config::Config;

/// A session built from the default config, with the console open.
pub fn session() -> Session {
    let mut session = Session::new(&Config::default()).expect("default config is valid");
    session.console.open();
    session
}

/// Types a line into the console and submits it.
pub fn submit(
    session: &mut Session,
    line: &str,
) -> Option<Result<String, skirmish::commands::DispatchError>> {
    session.console.clear_input();
    session.console.input.insert_str(line);
    let result = session.submit_console();
    session.update();
    result
}
