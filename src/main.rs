use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use qsaudit::aws::{client, error::format_aws_error};
use qsaudit::config::JobConfig;
use qsaudit::job::{self, RunOptions};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Audit QuickSight group memberships and object permissions
#[derive(Parser, Debug)]
#[command(name = "qsaudit", version, about, long_about = None)]
struct Args {
    /// JSON config file (defaults to <config dir>/qsaudit/config.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// AWS region for every service call
    #[arg(short, long)]
    region: Option<String>,

    /// QuickSight namespace to audit
    #[arg(short, long)]
    namespace: Option<String>,

    /// SSM parameter holding the report bucket
    #[arg(long)]
    parameter_key: Option<String>,

    /// Trigger event payload (JSON file); accepted but not interpreted
    #[arg(long)]
    event: Option<PathBuf>,

    /// Keep the generated CSV files in this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write the reports locally without uploading them
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&PathBuf>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let (non_blocking, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(log_file.is_none())
        .with_target(true)
        .with_thread_ids(false)
        .init();

    tracing::debug!("qsaudit started with log level: {:?}", level);

    Ok(Some(guard))
}

fn load_config(args: &Args) -> Result<JobConfig> {
    let mut config = JobConfig::load(args.config.as_deref())?;

    if let Some(region) = &args.region {
        config.region = Some(region.clone());
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(key) = &args.parameter_key {
        config.parameter_key = key.clone();
    }

    Ok(config)
}

fn load_event(path: Option<&PathBuf>) -> Result<serde_json::Value> {
    let Some(path) = path else {
        return Ok(serde_json::Value::Null);
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event file {}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_ref())?;

    let config = load_config(&args)?;
    let event = load_event(args.event.as_ref())?;
    let options = RunOptions {
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };

    tracing::info!(
        "Auditing namespace {} (region: {})",
        config.namespace,
        config.region.as_deref().unwrap_or("default chain")
    );

    let services = client::connect(config.region.as_deref()).await;

    match job::handle(&event, &services, &config, &options).await {
        Ok(summary) => {
            for report in &summary.reports {
                match &report.object_key {
                    Some(key) => tracing::info!(
                        "{:?}: {} rows -> s3://{}/{}",
                        report.kind,
                        report.rows,
                        summary.bucket,
                        key
                    ),
                    None => tracing::info!(
                        "{:?}: {} rows -> {}",
                        report.kind,
                        report.rows,
                        report.local_path.display()
                    ),
                }
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!("Audit failed: {}", format_aws_error(&err));
            tracing::debug!("{:?}", err);
            Err(err)
        }
    }
}
