use std::path::PathBuf;

use serde::Serialize;

use crate::config::Config;
use crate::error::AppError;
use crate::format::{format_bytes, format_bytes_to_gb};
use crate::model::StorageUsageBreakdown;
use crate::path::display_path;
use crate::usage::{app_data_size, free_line, measure_volume, usage_bar, used_line};

use super::with_spinner;

pub struct UsageOptions {
    pub root: PathBuf,
    pub json: bool,
}

#[derive(Serialize)]
struct UsageReport<'a> {
    path: String,
    #[serde(flatten)]
    usage: &'a StorageUsageBreakdown,
}

pub fn execute_usage(options: UsageOptions) -> Result<StorageUsageBreakdown, AppError> {
    let config = Config::load()?;
    let exclude = config.compile_excludes()?;
    let mut app_dirs = config.app_paths()?;
    app_dirs.extend(config.cache_paths()?);

    let app_bytes =
        with_spinner("Measuring app data...", || app_data_size(&app_dirs, exclude.as_ref()));
    let usage = measure_volume(&options.root, app_bytes)?;

    if options.json {
        let report = UsageReport { path: display_path(&options.root), usage: &usage };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_usage(&options, &usage);
    }
    Ok(usage)
}

fn print_usage(options: &UsageOptions, usage: &StorageUsageBreakdown) {
    println!("Storage usage for {}:", display_path(&options.root));
    println!("  {:<24} {}", used_line(usage), free_line(usage));
    println!("  {}", usage_bar(usage));
    println!("  # App data: {}", format_bytes(usage.app));
    println!("  = Apps and other items: {}", format_bytes(usage.other));
    println!("  Total: {}", format_bytes_to_gb(usage.total));
}
