//! File manifest standing in for a depot connection's existence checks

use ahash::AHashSet;
use anyhow::{Context, Result};
use async_trait::async_trait;
use scanner::{AsyncExistsCheck, ExistsCheck};
use std::path::Path;

/// Set of depot files known to exist
#[derive(Debug, Default)]
pub struct Manifest {
    paths: AHashSet<String>,
}

impl Manifest {
    /// Read one depot path per line; blank lines and `#` comments are skipped
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Ok(Self::from_lines(&text))
    }

    pub fn from_lines(text: &str) -> Self {
        let paths = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

impl ExistsCheck for Manifest {
    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.paths.contains(path))
    }
}

#[async_trait]
impl AsyncExistsCheck for Manifest {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.paths.contains(path))
    }
}
