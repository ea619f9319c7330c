use crate::error::{FixtureError, Result};
use crate::models::Bar;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The fixture on disk: one pretty-printed JSON array of bars, nothing else.
pub struct FixtureFile {
    path: PathBuf,
}

impl FixtureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the fixture with `bars`. The parent directory must already exist.
    /// Not atomic: a crash mid-write can leave a truncated file.
    pub fn write(&self, bars: &[Bar]) -> Result<usize> {
        // encode first so a serializer error never clobbers the old file
        let json = serde_json::to_string_pretty(bars)?;

        fs::write(&self.path, json).map_err(|source| FixtureError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Wrote {} bars to {:?}", bars.len(), self.path);
        Ok(bars.len())
    }
}
