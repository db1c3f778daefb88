//! Binary entry point: parse options, start logging, open the store, show the
//! existing sales and hand control to the Ratatui event loop.
use anyhow::Context;
use clap::Parser;
use sales_donations::config::Args;
use sales_donations::logging::setup_logging;
use sales_donations::{open_store, run_app, App, SalesTable};

/// Returning a `Result` bubbles fatal start-up problems (for example an
/// unwritable data directory) up to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let config = Args::parse().resolve()?;
    setup_logging(&config.log_path)?;

    let conn = open_store(&config.db_path).context("failed to open the sales store")?;
    let mut table = SalesTable::new(config.currency_symbol);
    table
        .refresh(&conn)
        .context("failed to load existing sales")?;

    let mut app = App::new(conn, table);
    run_app(&mut app)
}
