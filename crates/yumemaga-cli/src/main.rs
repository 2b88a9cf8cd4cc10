//! yumemaga CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use yumemaga_cli::cli::Cli;
use yumemaga_cli::commands::{self, Context};
use yumemaga_cli::config;

#[tokio::main]
async fn main() {
    // Settings file under the data directory first, then a local .env.local
    let env_path = config::env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let ctx = Context {
        api_url: cli.api_url.clone(),
        data_dir: cli.data_dir(),
        format: cli.format,
    };

    if let Err(e) = commands::execute(cli.command, &ctx).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
