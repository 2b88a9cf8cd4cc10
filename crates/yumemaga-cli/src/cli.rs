//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use yumemaga_workflow::{API_URL_ENV, DEFAULT_API_URL};

use crate::config::{self, DATA_DIR_ENV};

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.3.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// yumemaga - production and contract progress for the ops dashboard
#[derive(Parser, Debug)]
#[command(name = "yumemaga")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the yumemaga service
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Directory holding workflow files (serve, seed)
    #[arg(short, long, env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service over the local data directory
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = yumemaga_api::DEFAULT_PORT)]
        port: u16,
    },

    /// Load workflows from a JSON file into the data directory
    Seed {
        /// File holding one workflow or an array of workflows
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Show progress of a scope
    Progress {
        /// Scope ID (issue month or contract)
        #[arg(required = true)]
        scope: String,

        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List late units of a scope
    Delays {
        #[arg(required = true)]
        scope: String,

        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List upcoming milestones of a scope
    Milestones {
        #[arg(required = true)]
        scope: String,

        /// Only milestones within this many days
        #[arg(long)]
        days: Option<i64>,

        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Check (or uncheck) a checklist item
    Check {
        #[arg(required = true)]
        scope: String,

        #[arg(required = true)]
        unit: String,

        #[arg(required = true)]
        item: String,

        /// Clear the item instead of checking it
        #[arg(long)]
        uncheck: bool,
    },

    /// Mark a unit completed
    Complete {
        #[arg(required = true)]
        scope: String,

        #[arg(required = true)]
        unit: String,
    },

    /// Summarize several scopes
    Dashboard {
        #[arg(required = true, num_args = 1..)]
        scopes: Vec<String>,

        /// Evaluate as of this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Returns the data directory path, using default if not specified.
    pub fn data_dir(&self) -> PathBuf {
        config::resolve_data_dir(self.data_dir.clone())
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_progress() {
        let cli = Cli::parse_from(["yumemaga", "progress", "2025-11", "--today", "2025-10-15"]);
        match cli.command {
            Commands::Progress { scope, today } => {
                assert_eq!(scope, "2025-11");
                assert_eq!(today, NaiveDate::from_ymd_opt(2025, 10, 15));
            }
            _ => panic!("Expected Progress command"),
        }
    }

    #[test]
    fn test_cli_parse_check_uncheck() {
        let cli = Cli::parse_from(["yumemaga", "check", "contract-3", "4", "seal", "--uncheck"]);
        match cli.command {
            Commands::Check {
                scope,
                unit,
                item,
                uncheck,
            } => {
                assert_eq!(scope, "contract-3");
                assert_eq!(unit, "4");
                assert_eq!(item, "seal");
                assert!(uncheck);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_dashboard_scopes() {
        let cli = Cli::parse_from(["yumemaga", "dashboard", "2025-11", "2025-12", "-f", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Dashboard { scopes, .. } => assert_eq!(scopes, vec!["2025-11", "2025-12"]),
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::parse_from(["yumemaga", "serve"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8787);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["yumemaga", "delays", "2025-11", "--today", "10/15"]).is_err());
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["yumemaga", "-vvv", "serve"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
