use std::path::PathBuf;

use globset::GlobSet;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppError;
use crate::format::format_bytes;
use crate::model::StorageStatistics;
use crate::path::{remove_contents, total_dir_size};

/// Measures and clears the configured cache directories.
pub struct CacheManager {
    dirs: Vec<PathBuf>,
    exclude: Option<GlobSet>,
}

impl CacheManager {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let dirs = config.cache_paths()?;
        let exclude = config.compile_excludes()?;
        Ok(Self { dirs, exclude })
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Total size of every cache directory; missing or unreadable directories count as zero.
    pub fn calculate_cache_size(&self) -> u64 {
        let total = total_dir_size(&self.dirs, self.exclude.as_ref());

        info!("Cache size calculated: {}", format_bytes(total));
        total
    }

    /// Clear every cache directory and return the number of bytes freed.
    pub fn clear_cache(&self) -> Result<u64, AppError> {
        let before = self.calculate_cache_size();
        for dir in &self.dirs {
            debug!(path = %dir.display(), "clearing cache directory");
            remove_contents(dir, self.exclude.as_ref())?;
        }
        let after = self.calculate_cache_size();
        let freed = before.saturating_sub(after);

        info!("Cache cleared successfully: {} freed", format_bytes(freed));
        Ok(freed)
    }

    pub fn statistics(&self) -> StorageStatistics {
        StorageStatistics::new(self.calculate_cache_size())
    }
}

pub fn cleared_message(freed: u64) -> String {
    if freed > 0 {
        format!("Cache cleared: {} freed", format_bytes(freed))
    } else {
        "Cache was already empty".to_string()
    }
}
