//! Configuration for the server.
//!
//! Settings come from, in order of precedence:
//! - command line arguments and their environment variables
//! - an optional JSON configuration file
//! - built in defaults

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Deserialize;

/// The REST API server for expense_api.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to a JSON configuration file.
    #[arg(short, long, env = "EXPENSES_CONFIG")]
    pub config: Option<PathBuf>,

    /// The port to serve the API from.
    #[arg(short, long, env = "EXPENSES_PORT")]
    pub port: Option<u16>,

    /// File path to the application SQLite database.
    #[arg(long, env = "EXPENSES_STORE_CONNECTION")]
    pub store_connection: Option<PathBuf>,

    /// File path to the page served at `/report.html`.
    #[arg(long, env = "EXPENSES_REPORT_PATH")]
    pub report_path: Option<PathBuf>,
}

/// The contents of a JSON configuration file. Every key is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// The port to serve the API from.
    pub port: Option<u16>,

    /// File path to the application SQLite database.
    #[serde(alias = "storeConnection")]
    pub store_connection: Option<PathBuf>,

    /// File path to the page served at `/report.html`.
    #[serde(alias = "reportPath")]
    pub report_path: Option<PathBuf>,
}

/// Errors that occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file {path:?}: {source}")]
    Read {
        /// The path that was read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or has unexpected keys.
    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        /// The path that was read.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// The resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The port to serve the API from.
    pub port: u16,
    /// File path to the application SQLite database.
    pub store_connection: PathBuf,
    /// File path to the page served at `/report.html`.
    pub report_path: PathBuf,
}

impl Config {
    /// The port used when none is configured.
    pub const DEFAULT_PORT: u16 = 5001;
    /// The database used when none is configured.
    pub const DEFAULT_STORE_CONNECTION: &'static str = "expenses.db";
    /// The report page used when none is configured.
    pub const DEFAULT_REPORT_PATH: &'static str = "report.html";

    /// Resolve the configuration from `args`, reading the config file if one was given.
    ///
    /// # Errors
    /// Returns a [ConfigError] if the config file cannot be read or parsed.
    pub fn load(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        Ok(Self::merge(args, file))
    }

    fn merge(args: Args, file: ConfigFile) -> Self {
        Self {
            port: args.port.or(file.port).unwrap_or(Self::DEFAULT_PORT),
            store_connection: args
                .store_connection
                .or(file.store_connection)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_STORE_CONNECTION)),
            report_path: args
                .report_path
                .or(file.report_path)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_REPORT_PATH)),
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}
