// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use commands::{Command, ContextArgs, Settings};
use doclink::errors::to_error_json;
use doclink::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use doclink::user_config::{load_user_config, UserConfig};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// Doclink - manage linked CAD documents, push versions and insert library parts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend API base URL (default: from ~/.doclink/config.toml)
    #[arg(long, env = "DOCLINK_API_URL", global = true)]
    api_url: Option<String>,

    /// Host of the CAD web client, used to read and write document URLs
    #[arg(long, env = "DOCLINK_CAD_HOST", global = true)]
    cad_host: Option<String>,

    /// Request timeout, e.g. "30s"
    #[arg(long, env = "DOCLINK_TIMEOUT", global = true)]
    timeout: Option<humantime::Duration>,

    /// Enable JSON log format (for log aggregation)
    #[arg(long, env = "DOCLINK_LOG_JSON", default_value = "false", global = true)]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "DOCLINK_LOG_ROTATION", default_value = "daily", global = true)]
    log_rotation: String,

    /// Custom log directory (default: ~/.doclink/logs)
    #[arg(long, env = "DOCLINK_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(flatten)]
    context: ContextArgs,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    /// Flags win over the config file.
    fn settings(&self, config: &UserConfig) -> Settings {
        Settings {
            api_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| config.backend.api_url.clone()),
            cad_host: self
                .cad_host
                .clone()
                .unwrap_or_else(|| config.backend.cad_host.clone()),
            timeout: self.timeout.map_or(config.backend.timeout, Into::into),
            undo_window: config.links.undo_window,
            retry: config.retry_policy(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();

    let log_config = LogConfig {
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };
    let log_config = match &args.log_dir {
        Some(dir) => LogConfig {
            log_dir: PathBuf::from(dir),
            ..log_config
        },
        None => log_config,
    };
    let log_file = log_config.log_dir.join(LOG_FILENAME);
    if let Err(e) = init_logging(log_config) {
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        return Err(e);
    }

    // ~/.doclink/config.toml is optional.
    let user_cfg = load_user_config().unwrap_or_else(|e| {
        warn!("Failed to load user config, using defaults: {e}");
        UserConfig::default()
    });
    let settings = args.settings(&user_cfg);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let Args {
        context, command, ..
    } = args;
    let operation = command.operation();
    match commands::run(command, &context, &settings, &cancel).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(operation, error = %e, "Command failed");
            eprintln!("{}", to_error_json(operation, &e));
            Ok(ExitCode::FAILURE)
        }
    }
}
