use clap::Parser;
use linedrill::{
    app::{self, Exit},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    error::SessionError,
    input::stdin_key_source,
    interrupt::{report_abort, InterruptGuard},
    launcher::{relaunch_in_new_console, should_relaunch},
    screen::Screen,
    telemetry,
};
use std::{error::Error, io};
use tracing::{error, info, warn};

/// retype a text file line by line until every character is right
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// set when relaunched into its own console window
    #[clap(hide = true)]
    launch_mode: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    telemetry::init(&AppDirs::state_dir());

    if should_relaunch(cfg!(windows), cli.launch_mode.as_deref()) {
        match relaunch_in_new_console() {
            Ok(()) => return Ok(()),
            Err(e) => warn!(error = %e, "relaunch failed, running in place"),
        }
    }

    let _interrupt = match InterruptGuard::install() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!(error = %e, "could not install SIGINT handler");
            None
        }
    };

    let store = FileConfigStore::new();
    let config = store.load();
    if !store.exists() {
        if let Err(e) = store.save(&config) {
            warn!(path = %store.path().display(), error = %e, "could not write default config");
        }
    }

    let mut keys = stdin_key_source();
    let mut screen = Screen::new(io::stdout(), config.miss_flash());

    match app::run(&config, keys.as_mut(), &mut screen) {
        Ok(Exit::Completed(summary)) => info!(misses = summary.misses, "done"),
        Ok(Exit::NoText) => {}
        Err(SessionError::Interrupted) => report_abort(&mut io::stdout())?,
        Err(e) => {
            error!(error = %e, "session failed");
            eprintln!("error: {e}");
        }
    }

    Ok(())
}
