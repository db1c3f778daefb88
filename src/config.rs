//! Command-line options and the default locations derived from them.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

use crate::view::DEFAULT_CURRENCY_SYMBOL;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".sales-donations";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "sales_donations.sqlite";
/// Log file written next to the database unless overridden.
const LOG_FILE_NAME: &str = "sales-donations.log";

/// Record beverage sales and the donations that go with them.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to the SQLite database. Created on first run.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Symbol printed in front of prices and donations.
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    pub currency_symbol: String,

    /// File that receives the application log.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings the application runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub currency_symbol: String,
}

impl Args {
    /// Fill in defaults for anything not given on the command line. The home
    /// directory is only looked up when the database path was left out.
    pub fn resolve(self) -> Result<Config> {
        let db_path = match self.db_path {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_path = match self.log_file {
            Some(path) => path,
            None => db_path.with_file_name(LOG_FILE_NAME),
        };

        Ok(Config {
            db_path,
            log_path,
            currency_symbol: self.currency_symbol,
        })
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
