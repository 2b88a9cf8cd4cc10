//! HTTP service for yumemaga scopes.
//!
//! Every response is wrapped in the `{success, data|error}` envelope:
//! - Scope listing and snapshots
//! - Per-scope progress reports
//! - Checklist writes and the completion action
//!
//! # Example
//!
//! ```ignore
//! use yumemaga_api::{ApiConfig, AppState, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default().with_data_dir("/var/lib/yumemaga");
//!     let state = AppState::from_config(config.clone());
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::{ApiConfig, DEFAULT_PORT};
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
