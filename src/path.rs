use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs_next as dirs;
use globset::GlobSet;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::AppError;

/// Replace the home directory prefix with `~` to make output easier to read.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        let mut display = PathBuf::from("~");
        display.push(stripped);
        return display.display().to_string();
    }

    path.display().to_string()
}

/// Use the explicit path when given, otherwise the home directory.
pub fn resolve_root(explicit: Option<PathBuf>) -> PathBuf {
    explicit.or_else(dirs::home_dir).unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    })
}

pub fn resolve_roots(explicit: &[PathBuf]) -> Vec<PathBuf> {
    if explicit.is_empty() { vec![resolve_root(None)] } else { explicit.to_vec() }
}

pub fn is_excluded(path: &Path, exclude: Option<&GlobSet>) -> bool {
    if let Some(set) = exclude {
        let candidate = if path.is_absolute() {
            path.to_string_lossy().to_string()
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(path).to_string_lossy().to_string(),
                Err(_) => path.to_string_lossy().to_string(),
            }
        };
        set.is_match(&candidate)
    } else {
        false
    }
}

/// Recursive size of every regular file below `path`.
///
/// Unreadable entries are logged and skipped rather than failing the walk.
pub fn path_size(path: &Path, exclude: Option<&GlobSet>) -> Result<u64, AppError> {
    if is_excluded(path, exclude) {
        return Ok(0);
    }
    if path.is_file() {
        return Ok(path.metadata()?.len());
    }

    let mut total = 0u64;
    let mut walker = WalkDir::new(path).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(path = ?err.path(), "skipping unreadable entry: {err}");
                continue;
            }
        };

        let entry_path = entry.path();
        if is_excluded(entry_path, exclude) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        if entry.file_type().is_file() {
            match entry.metadata() {
                Ok(metadata) => total = total.saturating_add(metadata.len()),
                Err(err) => warn!(path = %entry_path.display(), "skipping entry: {err}"),
            }
        }
    }
    Ok(total)
}

/// Sum of `path_size` over every existing directory, sized in parallel.
///
/// A directory that fails to size is logged and counted as zero.
pub fn total_dir_size(dirs: &[PathBuf], exclude: Option<&GlobSet>) -> u64 {
    dirs.par_iter()
        .filter(|dir| dir.exists())
        .map(|dir| match path_size(dir, exclude) {
            Ok(size) => size,
            Err(err) => {
                warn!(path = %dir.display(), "failed to size directory: {err}");
                0
            }
        })
        .reduce(|| 0, u64::saturating_add)
}

/// Remove everything below `root`, deepest entries first, keeping `root` itself.
///
/// Excluded entries are left in place along with the directories that contain them.
pub fn remove_contents(root: &Path, exclude: Option<&GlobSet>) -> Result<(), AppError> {
    if !root.is_dir() || is_excluded(root, exclude) {
        return Ok(());
    }

    let mut entries = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(path = ?err.path(), "skipping unreadable entry: {err}");
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        if is_excluded(entry.path(), exclude) {
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }
        entries.push((entry.into_path(), is_dir));
    }

    // Pre-order walk reversed: children are removed before their parents.
    for (entry_path, is_dir) in entries.into_iter().rev() {
        let result =
            if is_dir { fs::remove_dir(&entry_path) } else { fs::remove_file(&entry_path) };

        match result {
            Ok(()) => debug!(path = %entry_path.display(), "removed"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) if err.kind() == io::ErrorKind::DirectoryNotEmpty => {
                debug!(path = %entry_path.display(), "kept non-empty directory");
            }
            Err(err) => return Err(AppError::Io(err)),
        }
    }
    Ok(())
}
