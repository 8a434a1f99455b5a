//! Skirmish - an RTS sandbox with a debug console, in the terminal.

use skirmish::app::Session;
use skirmish::cli::Cli;
use skirmish::config::Config;
use skirmish::error::Result;
use skirmish::{logging, tui};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if cli.headless {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    if cli.headless {
        return tui::headless::run_headless(&cli, &config).await;
    }

    if cli.open_console {
        config.console.open_on_start = true;
    }
    tui::run(Session::new(&config)?).await?;
    Ok(0)
}
