//! CLI configuration via environment variables
//!
//! Abacus uses environment variables for optional configuration.
//! This keeps the CLI simple while allowing customization.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON output (ABACUS_JSON=1)
    pub default_json: bool,
    /// Disable colored output (NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (ABACUS_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable REPL history by default (ABACUS_NO_HISTORY=1)
    pub no_history: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("ABACUS_JSON")
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false),
            no_color: env::var("NO_COLOR").is_ok(),
            history_file: env::var("ABACUS_HISTORY_FILE").ok().map(PathBuf::from),
            no_history: env::var("ABACUS_NO_HISTORY").is_ok(),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. ABACUS_HISTORY_FILE if set
    /// 2. ~/.abacus/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".abacus").join("history"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
