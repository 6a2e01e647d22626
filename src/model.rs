use std::path::PathBuf;

use serde::Serialize;

use crate::format::format_bytes;
use crate::settings::MediaType;

/// Split of a volume between application data, everything else and free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageUsageBreakdown {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub app: u64,
    pub other: u64,
}

impl StorageUsageBreakdown {
    /// `used` saturates at zero and `app` is clamped so that `app + other == used`.
    pub fn new(total: u64, free: u64, app: u64) -> Self {
        let free = free.min(total);
        let used = total - free;
        let app = app.min(used);
        Self { total, used, free, app, other: used - app }
    }

    pub fn used_fraction(&self) -> f64 {
        self.fraction(self.used)
    }

    pub fn app_fraction(&self) -> f64 {
        self.fraction(self.app)
    }

    pub fn other_fraction(&self) -> f64 {
        self.fraction(self.other)
    }

    fn fraction(&self, part: u64) -> f64 {
        if self.total == 0 { 0.0 } else { part as f64 / self.total as f64 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStatistics {
    pub cache_size: u64,
    pub cache_size_formatted: String,
}

impl StorageStatistics {
    pub fn new(cache_size: u64) -> Self {
        Self { cache_size, cache_size_formatted: format_bytes(cache_size) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeFile {
    pub path: PathBuf,
    pub size: u64,
    pub kind: Option<MediaType>,
}

impl LargeFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let kind = MediaType::from_path(&path);
        LargeFile { path, size, kind }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.map(|kind| kind.display_name()).unwrap_or("Other")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
}

/// Storage consumed by a single child of a directory.
#[derive(Debug, Clone)]
pub struct EntryUsage {
    pub path: PathBuf,
    pub size: u64,
    pub kind: ItemKind,
}

impl EntryUsage {
    pub fn directory(path: PathBuf, size: u64) -> Self {
        EntryUsage { path, size, kind: ItemKind::Directory }
    }

    pub fn file(path: PathBuf, size: u64) -> Self {
        EntryUsage { path, size, kind: ItemKind::File }
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub fn total_size<I>(sizes: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    sizes.into_iter().fold(0, u64::saturating_add)
}
