use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::AppError;
use crate::format::format_bytes;
use crate::model::{EntryUsage, ItemKind, LargeFile, total_size};
use crate::path::display_path;
use crate::review::{entry_usage, find_large_files};
use crate::settings::MediaType;

use super::with_spinner;

pub struct LargeOptions {
    pub roots: Vec<PathBuf>,
    pub threshold: Option<u64>,
    pub media: Vec<MediaType>,
    pub verbose: bool,
}

pub struct EntriesOptions {
    pub root: PathBuf,
    pub limit: Option<usize>,
}

pub fn execute_large(options: LargeOptions) -> Result<Vec<LargeFile>, AppError> {
    let config = Config::load()?;
    let exclude = config.compile_excludes()?;
    let threshold = match options.threshold {
        Some(threshold) => threshold,
        None => config.large_file_threshold_bytes()?,
    };

    let files = with_spinner("Looking for large files...", || {
        find_large_files(&options.roots, threshold, &options.media, exclude.as_ref())
    })?;
    let total = total_size(files.iter().map(|file| file.size));

    println!("Large files (at least {}):", format_bytes(threshold));
    let mut by_kind: BTreeMap<&'static str, (u64, usize)> = BTreeMap::new();
    for file in &files {
        let entry = by_kind.entry(file.kind_name()).or_default();
        entry.0 = entry.0.saturating_add(file.size);
        entry.1 += 1;
    }
    for (kind, (size, count)) in &by_kind {
        println!("- {:<9} {:>10} across {} file(s)", kind, format_bytes(*size), count);
    }
    if options.verbose {
        for file in &files {
            println!(
                "    • {:<60} {:<9} {:>10}",
                display_path(&file.path),
                file.kind_name(),
                format_bytes(file.size)
            );
        }
    }
    println!("Total: {} across {} file(s)", format_bytes(total), files.len());
    Ok(files)
}

pub fn execute_entries(options: EntriesOptions) -> Result<Vec<EntryUsage>, AppError> {
    let config = Config::load()?;
    let exclude = config.compile_excludes()?;
    let entries = with_spinner("Measuring entries...", || {
        entry_usage(&options.root, exclude.as_ref())
    })?;

    println!("Storage by entry in {}:", display_path(&options.root));
    let shown = options.limit.unwrap_or(entries.len());
    for entry in entries.iter().take(shown) {
        let marker = match entry.kind {
            ItemKind::Directory => "/",
            ItemKind::File => "",
        };
        println!("  {:<40} {:>10}", format!("{}{}", entry.name(), marker), format_bytes(entry.size));
    }
    if entries.len() > shown {
        println!("  ... and {} more", entries.len() - shown);
    }
    println!("Total: {}", format_bytes(total_size(entries.iter().map(|entry| entry.size))));
    Ok(entries)
}
