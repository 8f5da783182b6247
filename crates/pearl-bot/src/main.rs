//! pearl market maker - replay entry point
//!
//! Reads recorded exchange ticks (JSON lines), runs the strategy on each,
//! and writes the resulting orders as JSON lines.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pearl_telemetry::Metrics;
use tracing::info;

/// Inventory-skewed market maker over recorded order book ticks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PEARL_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON-lines file of trading states, one tick per line
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write order records (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write Prometheus text metrics here after the replay
    #[arg(long)]
    metrics_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    pearl_telemetry::init_logging()?;

    info!("Starting pearl v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > PEARL_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PEARL_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = pearl_bot::AppConfig::from_file(&config_path)?;
    let active: Vec<&str> = config.active_products().map(|p| p.symbol.as_str()).collect();
    info!(?active, window = config.history.window_size, "Configuration loaded");

    let mut trader = pearl_bot::Trader::new(config)?;

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;
    let input = BufReader::new(input);

    let summary = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            pearl_bot::replay(&mut trader, input, BufWriter::new(file))?
        }
        None => pearl_bot::replay(&mut trader, input, io::stdout().lock())?,
    };

    if let Some(path) = &args.metrics_out {
        let text = Metrics::render()?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create metrics file {}", path.display()))?;
        file.write_all(text.as_bytes())?;
    }

    info!(ticks = summary.ticks, orders = summary.orders, "Done");
    Ok(())
}
