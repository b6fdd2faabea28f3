//! Vacation Tracker server
//!
//! ```sh
//! # Run with default config (~/.config/vacation-tracker/config.toml)
//! vacation-tracker
//!
//! # Custom config path and port
//! vacation-tracker --config /etc/vacation-tracker/config.toml --port 8080
//!
//! # Validate config without starting
//! vacation-tracker --check
//!
//! # Write a default config file and exit
//! vacation-tracker --init-config
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use vacation_tracker::config::AppConfig;
use vacation_tracker::default_config_path;
use vacation_tracker::server::{init_tracing, ServerHandle, ServerOptions};

/// Vacation request tracker with approval workflow and calendar feeds.
#[derive(Parser, Debug)]
#[command(
    name = "vacation-tracker",
    version,
    about = "Vacation request tracker REST API",
    long_about = "REST API for submitting and approving vacation requests, \
                  with iCalendar feeds of approved time off.\n\n\
                  Default config: ~/.config/vacation-tracker/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "VACATION_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write a default configuration file to the config path and exit.
    #[arg(long, conflicts_with = "check")]
    init_config: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    if cli.init_config {
        if config_path.exists() {
            eprintln!("Refusing to overwrite {}", config_path.display());
            return Err("config file already exists".into());
        }
        AppConfig::default().save(&config_path)?;
        println!("Default configuration written to {}", config_path.display());
        return Ok(());
    }

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => {
            eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.listen_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
