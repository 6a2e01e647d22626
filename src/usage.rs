use std::path::{Path, PathBuf};

use globset::GlobSet;
use tracing::debug;

use crate::error::AppError;
use crate::format::format_bytes_to_gb;
use crate::model::StorageUsageBreakdown;
use crate::path::{display_path, total_dir_size};

pub const BAR_WIDTH: usize = 40;

/// Read total and available space for the volume holding `path`.
pub fn measure_volume(path: &Path, app_bytes: u64) -> Result<StorageUsageBreakdown, AppError> {
    if !path.exists() {
        return Err(AppError::MissingPath(display_path(path)));
    }
    let total = fs2::total_space(path)?;
    let free = fs2::available_space(path)?;
    debug!(path = %path.display(), total, free, app_bytes, "measured volume");
    Ok(StorageUsageBreakdown::new(total, free, app_bytes))
}

/// Combined size of the application's data and cache directories.
pub fn app_data_size(dirs: &[PathBuf], exclude: Option<&GlobSet>) -> u64 {
    total_dir_size(dirs, exclude)
}

pub fn used_line(usage: &StorageUsageBreakdown) -> String {
    format!("{} used", format_bytes_to_gb(usage.used))
}

pub fn free_line(usage: &StorageUsageBreakdown) -> String {
    format!("{} free", format_bytes_to_gb(usage.free))
}

/// Fixed-width bar: `#` app data, `=` other used space, `.` free space.
pub fn usage_bar(usage: &StorageUsageBreakdown) -> String {
    let used_cells = cells(usage.used_fraction());
    let app_cells = cells(usage.app_fraction()).min(used_cells);
    let other_cells = used_cells - app_cells;
    let free_cells = BAR_WIDTH - used_cells;

    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    bar.push_str(&"#".repeat(app_cells));
    bar.push_str(&"=".repeat(other_cells));
    bar.push_str(&".".repeat(free_cells));
    bar.push(']');
    bar
}

fn cells(fraction: f64) -> usize {
    ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
}
