mod config;
mod error;
mod loader;
mod models;
mod pipeline;
mod source;
mod storage;

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;
use crate::error::FixtureError;
use crate::pipeline::{Pipeline, RunStats};
use crate::source::HttpSource;

/// Downloads daily OHLCV bars and writes them as a JSON chart fixture.
#[derive(Parser)]
#[command(name = "mochart-fetch", version)]
struct Cli {
    /// Log more (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "mochart_fetch=info,warn",
        1 => "mochart_fetch=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::new(filter))
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let symbol = config.source.symbol.clone();

    let result = match HttpSource::new(&config.source) {
        Ok(source) => Pipeline::new(config, Box::new(source)).run().await,
        Err(e) => Err(FixtureError::Fetch(e)),
    };

    report(result, &symbol, &mut io::stdout(), &mut io::stderr())
}

/// Success line to `out`, failure line to `err`, and the matching exit status.
fn report(
    result: error::Result<RunStats>,
    symbol: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> ExitCode {
    match result {
        Ok(stats) => {
            let _ = writeln!(
                out,
                "Wrote {} bars to {}",
                stats.bars_written,
                stats.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = writeln!(err, "Failed to fetch or write {} data: {}", symbol, e);
            ExitCode::FAILURE
        }
    }
}
