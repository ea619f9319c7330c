use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level failures. Any of these ends the run with exit status 1.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Everything the fetcher can hit: bad url, connect, timeout, status, body decode.
    #[error("fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    #[error("failed to encode bars as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FixtureError>;
