use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wb_figures::{Config, build_figures_with};

/// Build the air transport chart specifications as JSON
#[derive(Parser, Debug)]
#[command(
    name = "wb-figures",
    about = "Clean World Bank indicator data and emit line-chart specifications",
    version
)]
struct Args {
    /// JSON config overriding the dataset path, years, countries or indicators
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Dataset to read instead of the configured one
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Write the chart JSON here instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(data) = args.data {
        config.dataset_path = data;
    }

    let figures = build_figures_with(&config)
        .with_context(|| format!("building figures from {}", config.dataset_path.display()))?;
    log::info!("built {} figures", figures.len());

    let json = serde_json::to_string_pretty(&figures).context("serialising figures")?;
    match &args.out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("writing to stdout")?;
        }
    }
    Ok(())
}
