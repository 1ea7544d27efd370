//! Applistock console report

use std::io::{self, Write};

use anyhow::Context;
use tracing::debug;

use applistock::{app, config::Config, logging};

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| e.exit());

    logging::init(&config.logging).context("failed to initialise logging")?;

    debug!(?config, "configuration loaded");

    app::execute(&config, io::stdout().lock())?;

    if !config.no_wait {
        wait_for_enter()?;
    }

    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "\nPress Enter to exit")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(())
}
