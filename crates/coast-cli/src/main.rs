//! `coast`: command-line front end for the coastal simulator.
//! Responses go to stdout as JSON; logs go to stderr.

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use coast_api::encode::decode_data_uri;
use coast_api::{AnalyzeRequest, CoastService, Operation, ServiceConfig};

#[derive(Parser, Debug)]
#[command(name = "coast", about = "Synthetic coastal zone simulator")]
struct Args {
    /// Service config JSON (`width`, `height`, `seed`).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fixed RNG seed; overrides the config file.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Grid width in cells; overrides the config file.
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Grid height in cells; overrides the config file.
    #[arg(long, global = true)]
    height: Option<usize>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the zone map for one year offset.
    Analyze {
        /// Years of simulated erosion.
        #[arg(short = 'y', long, default_value_t = 0)]
        future_year: u32,

        /// Overlay transects and compute the risk index.
        #[arg(short = 't', long)]
        show_transects: bool,

        /// Also write the rendered map to this PNG file.
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Multi-year vegetation and erosion report.
    Report,
    /// Optimistic restoration forecast.
    Predict {
        /// Also write the forecast map to this PNG file.
        #[arg(long)]
        png: Option<PathBuf>,
    },
    /// Send a raw JSON body to a named operation (analyze-coast,
    /// generate-report, ai-predictor).
    Request {
        operation: String,

        #[arg(short, long, default_value = "{}")]
        body: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let service = CoastService::new(load_config(&args)?)?;

    let (operation, body, png) = match args.command {
        Command::Analyze { future_year, show_transects, png } => {
            let req = AnalyzeRequest { future_year, show_transects, bbox: None };
            (Operation::Analyze.to_string(), serde_json::to_string(&req)?, png)
        }
        Command::Report => (Operation::Report.to_string(), String::new(), None),
        Command::Predict { png } => (Operation::Predict.to_string(), String::new(), png),
        Command::Request { operation, body } => (operation, body, None),
    };

    match service.handle(&operation, &body) {
        Ok(response) => {
            if let Some(path) = png {
                write_image(&response, &path)?;
            }
            print_json(&response, args.pretty)
        }
        Err(payload) => {
            print_json(&payload, args.pretty)?;
            bail!("{operation} failed: {}", payload.error)
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<ServiceConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            ServiceConfig::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => ServiceConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate()?;
    Ok(config)
}

/// Decode the response's image field and write it out as a PNG file.
fn write_image(response: &serde_json::Value, path: &Path) -> Result<()> {
    let Some(uri) = ["mask_image", "gis_image"]
        .iter()
        .find_map(|key| response.get(*key).and_then(|v| v.as_str()))
    else {
        bail!("response carries no image");
    };

    let png = decode_data_uri(uri)?;
    fs::write(path, png).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote image");
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
