use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::{path::PathBuf, str::FromStr};
use striker_core::Side;
use tokio::sync::broadcast;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod agent_loop;
mod snapshots;
mod transport;

#[derive(Debug, Parser)]
#[command(name = "striker", about = "A soccer server agent driven by console commands")]
pub(crate) struct Args {
    /// Team name sent to the server
    #[clap(long, short, default_value = "IBAPRO")]
    team: String,

    /// Initial placement and kickoff turn: X Y [TURN]
    #[clap(
        long,
        short,
        num_args = 2..=3,
        allow_hyphen_values = true,
        default_values_t = [-10.0, 0.0]
    )]
    params: Vec<f64>,

    /// Soccer server address. Without it, commands are printed to stdout.
    #[clap(long)]
    server: Option<SocketAddr>,

    #[clap(long, default_value = "7")]
    protocol_version: u32,

    /// Side to play on when not connected to a server
    #[clap(long, default_value = "left")]
    side: Side,

    /// JSON-lines file with one perception snapshot per tick
    #[clap(long)]
    snapshots: Option<PathBuf>,

    #[clap(long, default_value = "100")]
    tick_ms: u64,

    #[clap(long, short = 'f', default_value = "striker-settings.json")]
    settings_file: PathBuf,

    #[clap(long, default_value = "info")]
    log_level: String,

    #[clap(long, default_value = "auto")]
    log_file: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up log file
    let log_file_path = if args.log_file != "auto" {
        PathBuf::from(args.log_file.clone())
    } else {
        let time = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let filename = format!("striker-{time}.log");
        dirs::data_local_dir()
            .map(|p| p.join("striker").join(&filename))
            .unwrap_or_else(|| PathBuf::from(&filename))
    };
    let log_dir = match log_file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&log_dir)
        .await
        .context(format!("Failed to create log directory: {}", log_dir.display()))?;
    let log_file_name = log_file_path
        .file_name()
        .context("Log file path has no file name")?;

    // Create log file appender
    let appender = tracing_appender::rolling::never(&log_dir, log_file_name);
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);

    // Set up tracing, `log` records from the libraries are forwarded as well
    let log_level = tracing::Level::from_str(&args.log_level)
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", args.log_level))?;
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::from_level(log_level));
    let logfile_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking_appender);
    tracing_subscriber::registry()
        .with(console_layer)
        .with(logfile_layer)
        .try_init()
        .context("Unable to set global tracing subscriber")?;

    tracing::info!("Saving logs to {}", log_file_path.display());

    let (stop_tx, stop_rx) = broadcast::channel(1);
    let mut main_task = tokio::spawn(agent_loop::run(args, stop_rx));

    let result = tokio::select! {
        result = &mut main_task => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            // The loop may already be gone, in which case there is nobody to tell
            let _ = stop_tx.send(());
            main_task.await
        }
    };

    match result.context("Agent task panicked")? {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::error!("Agent failed: {:#}", err);
            Err(err)
        }
    }
}
