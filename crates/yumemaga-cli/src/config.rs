//! Locations of yumemaga's local files.
//!
//! ```text
//! ~/.yumemaga/
//! ├── workflows/    # one JSON file per scope (written by `serve` and `seed`)
//! └── config/
//!     └── .env.local
//! ```
//!
//! # Environment Variables
//!
//! - `YUMEMAGA_DATA_DIR`: Override the base directory
//! - `YUMEMAGA_API_URL`: Base URL of the service the client commands talk to

use std::path::PathBuf;

/// Environment variable for a custom data directory.
pub const DATA_DIR_ENV: &str = "YUMEMAGA_DATA_DIR";

/// Default directory name under home.
const DEFAULT_DATA_DIR: &str = ".yumemaga";

const CONFIG_SUBDIR: &str = "config";

/// Picks the data directory: `explicit` if given, else `~/.yumemaga`,
/// else `.yumemaga` in the current directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(DEFAULT_DATA_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    })
}

/// The data directory from `YUMEMAGA_DATA_DIR` or the default.
pub fn data_dir() -> PathBuf {
    resolve_data_dir(std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
}

/// Get the .env.local file path.
pub fn env_file() -> PathBuf {
    data_dir().join(CONFIG_SUBDIR).join(".env.local")
}
