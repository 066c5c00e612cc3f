//! BacktestProbe - Main Entry Point
//!
//! Submits one trading strategy to a backtest API endpoint and prints
//! the request payload and the response. Always exits with status 0;
//! failures are reported on stdout.

use anyhow::Result;
use backtest_probe::backtest::{BacktestClient, RequestRunner};
use backtest_probe::common::errors::ProbeError;
use backtest_probe::config::loader::{load_config, validate};
use backtest_probe::config::types::AppConfig;
use backtest_probe::strategy::{load_strategy, test_strategy};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "probe.toml")]
    config: String,

    /// Backtest endpoint URL (overrides configuration)
    #[arg(long, env = "BACKTEST_PROBE_URL")]
    url: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Strategy JSON file to submit instead of the built-in test strategy
    #[arg(short, long)]
    strategy: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the payload and validation findings without sending
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let loaded = load_config(Some(args.config.as_str()));

    let log_level = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.settings.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_logging(&log_level)?;

    info!("Starting backtest probe");
    info!("Configuration file: {}", args.config);

    let mut stdout = std::io::stdout();

    let runner = match loaded.and_then(|config| prepare(&args, config)) {
        Ok(runner) => runner,
        Err(err) => {
            error!("Setup failed: {}", err);
            writeln!(stdout, "Error: {}", err).ok();
            return Ok(());
        }
    };

    let outcome = runner.run(&mut stdout).await;
    stdout.flush().ok();

    info!("Run finished: {:?}", outcome);
    Ok(())
}

/// Apply CLI overrides, pick the payload and build the runner
fn prepare(args: &Args, mut config: AppConfig) -> std::result::Result<RequestRunner, ProbeError> {
    if let Some(url) = &args.url {
        config.target.url = url.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.target.timeout_seconds = timeout;
    }
    validate(&config)?;

    let strategy = match &args.strategy {
        Some(path) => load_strategy(path)?,
        None => test_strategy(),
    };

    let client = BacktestClient::from_config(&config.target)?;
    Ok(RequestRunner::new(client, strategy).dry_run(args.dry_run))
}

/// RUST_LOG, when set, takes precedence over `log_level`
fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    // stdout carries the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn file_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.target.url = "http://localhost:9000/api/backtest/".to_string();
        config.target.timeout_seconds = 5;
        config
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::try_parse_from([
            "backtest_probe",
            "--url",
            "http://127.0.0.1:8100/api/backtest/",
            "--timeout-secs",
            "12",
        ])
        .unwrap();

        let runner = prepare(&args, file_config()).unwrap();
        assert_eq!(runner.client().url(), "http://127.0.0.1:8100/api/backtest/");
        assert_eq!(runner.client().timeout(), Duration::from_secs(12));
        assert_eq!(runner.strategy().id, "test-strategy-123");
    }

    #[test]
    fn test_config_used_without_cli_overrides() {
        let args = Args::try_parse_from(["backtest_probe", "--url", "http://localhost:9000/api/backtest/"])
            .unwrap();

        let runner = prepare(&args, file_config()).unwrap();
        assert_eq!(runner.client().timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_cli_url_is_configuration_error() {
        let args = Args::try_parse_from(["backtest_probe", "--url", "not a url"]).unwrap();
        assert!(matches!(
            prepare(&args, file_config()),
            Err(ProbeError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_cli_timeout_rejected() {
        let args = Args::try_parse_from([
            "backtest_probe",
            "--url",
            "http://127.0.0.1:8100/api/backtest/",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        assert!(prepare(&args, file_config()).is_err());
    }
}
