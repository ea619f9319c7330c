//! Pipeline orchestrator: ties source → loader → storage together.
//!
//! One run is strictly sequential:
//!   1. Fetch the daily CSV (single request, no retry)
//!   2. Parse it into bars, dropping malformed rows, sorted oldest first
//!   3. Overwrite the fixture file
//!
//! A fetch failure returns before the fixture is touched.

use crate::config::AppConfig;
use crate::error::{FixtureError, Result};
use crate::loader::parse_bars;
use crate::source::CsvSource;
use crate::storage::FixtureFile;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

pub struct Pipeline {
    config: AppConfig,
    source: Box<dyn CsvSource>,
}

impl Pipeline {
    pub fn new(config: AppConfig, source: Box<dyn CsvSource>) -> Self {
        Self { config, source }
    }

    pub async fn run(&self) -> Result<RunStats> {
        let started = Instant::now();

        // ── 1. Fetch ──────────────────────────────────────────────────────────
        info!("=== {}: fetching {} ===", self.config.source.symbol, self.source.endpoint());
        let csv_text = self.source.fetch_csv().await.map_err(FixtureError::Fetch)?;

        // ── 2. Parse ──────────────────────────────────────────────────────────
        let parsed = parse_bars(&csv_text);
        if let (Some(first), Some(last)) = (parsed.bars.first(), parsed.bars.last()) {
            info!("Bar range: {} → {}", first.time, last.time);
        }

        // ── 3. Write ──────────────────────────────────────────────────────────
        let fixture = FixtureFile::new(&self.config.output.path);
        let bars_written = fixture.write(&parsed.bars)?;

        let stats = RunStats {
            bars_written,
            rows_skipped: parsed.skipped,
            output_path: fixture.path().to_path_buf(),
        };

        info!(
            "=== Done: {} bars | {} skipped rows | took {:.2?} ===",
            stats.bars_written,
            stats.rows_skipped,
            started.elapsed()
        );

        Ok(stats)
    }
}

#[derive(Debug)]
pub struct RunStats {
    pub bars_written: usize,
    pub rows_skipped: usize,
    pub output_path: PathBuf,
}
