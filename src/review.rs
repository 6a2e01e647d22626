use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::AppError;
use crate::model::{EntryUsage, LargeFile};
use crate::path::{display_path, is_excluded, path_size};
use crate::settings::MediaType;

/// Regular files at or above `threshold` bytes, largest first.
///
/// A non-empty `media` restricts the result to files classified as one of those types.
pub fn find_large_files(
    roots: &[PathBuf],
    threshold: u64,
    media: &[MediaType],
    exclude: Option<&GlobSet>,
) -> Result<Vec<LargeFile>, AppError> {
    let mut files = Vec::new();
    for root in roots {
        if !root.exists() {
            debug!(path = %root.display(), "skipping missing root");
            continue;
        }

        let mut walker = WalkDir::new(root).into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(path = ?err.path(), "skipping unreadable entry: {err}");
                    continue;
                }
            };

            let path = entry.path();
            if is_excluded(path, exclude) {
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) if metadata.len() >= threshold => {
                    let file = LargeFile::new(path.to_path_buf(), metadata.len());
                    if media.is_empty() || file.kind.is_some_and(|kind| media.contains(&kind)) {
                        files.push(file);
                    }
                }
                Ok(_) => {}
                Err(err) => warn!(path = %path.display(), "skipping entry: {err}"),
            }
        }
    }

    files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    Ok(files)
}

/// Storage used by each immediate child of `root`, largest first.
pub fn entry_usage(root: &Path, exclude: Option<&GlobSet>) -> Result<Vec<EntryUsage>, AppError> {
    if !root.is_dir() {
        return Err(AppError::MissingPath(display_path(root)));
    }

    let mut children = Vec::new();
    for entry in fs::read_dir(root)? {
        match entry {
            Ok(entry) => children.push(entry.path()),
            Err(err) => warn!(path = %root.display(), "skipping unreadable entry: {err}"),
        }
    }
    children.retain(|path| !is_excluded(path, exclude));

    let mut entries: Vec<EntryUsage> = children
        .into_par_iter()
        .filter_map(|path| match path_size(&path, exclude) {
            Ok(size) if path.is_dir() => Some(EntryUsage::directory(path, size)),
            Ok(size) => Some(EntryUsage::file(path, size)),
            Err(err) => {
                warn!(path = %path.display(), "skipping entry: {err}");
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::ItemKind;
    use tempfile::TempDir;

    fn write(path: &Path, len: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![1u8; len]).unwrap();
    }

    #[test]
    fn large_files_respect_threshold_and_order() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("small.txt"), 10);
        write(&temp.path().join("videos/a.mp4"), 4000);
        write(&temp.path().join("docs/b.pdf"), 1000);
        write(&temp.path().join("docs/c.pdf"), 1000);

        let files = find_large_files(&[temp.path().to_path_buf()], 1000, &[], None).unwrap();
        let sizes: Vec<u64> = files.iter().map(|file| file.size).collect();
        assert_eq!(sizes, vec![4000, 1000, 1000]);
        assert!(files[1].path.ends_with("docs/b.pdf"));
        assert!(files[2].path.ends_with("docs/c.pdf"));
    }

    #[test]
    fn large_files_filter_by_media_type() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("clip.mp4"), 500);
        write(&temp.path().join("scan.pdf"), 400);
        write(&temp.path().join("raw.bin"), 300);

        let roots = [temp.path().to_path_buf()];
        let all = find_large_files(&roots, 0, &[], None).unwrap();
        let kinds: Vec<Option<MediaType>> = all.iter().map(|file| file.kind).collect();
        assert_eq!(kinds, vec![Some(MediaType::Video), Some(MediaType::Document), None]);

        let videos = find_large_files(&roots, 0, &[MediaType::Video], None).unwrap();
        assert_eq!(videos.len(), 1);
        assert!(videos[0].path.ends_with("clip.mp4"));
    }

    #[cfg(unix)]
    #[test]
    fn entries_tolerate_dangling_links() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("ok/a.bin"), 64);
        std::os::unix::fs::symlink(temp.path().join("gone.bin"), temp.path().join("dangling"))
            .unwrap();

        let entries = entry_usage(temp.path(), None).unwrap();
        let names: Vec<String> = entries.iter().map(EntryUsage::name).collect();
        assert_eq!(names, vec!["ok", "dangling"]);
        assert_eq!(entries[1].size, 0);
    }

    #[test]
    fn large_files_skip_missing_roots() {
        let files =
            find_large_files(&[PathBuf::from("/definitely/not/here")], 0, &[], None).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn entries_are_sorted_by_size() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("family/a.jpg"), 1500);
        write(&temp.path().join("family/b.jpg"), 500);
        write(&temp.path().join("work/c.doc"), 50);
        write(&temp.path().join("notes.txt"), 120);

        let entries = entry_usage(temp.path(), None).unwrap();
        let names: Vec<String> = entries.iter().map(EntryUsage::name).collect();
        assert_eq!(names, vec!["family", "notes.txt", "work"]);
        assert_eq!(entries[0].size, 2000);
        assert_eq!(entries[0].kind, ItemKind::Directory);
        assert_eq!(entries[1].kind, ItemKind::File);
    }

    #[test]
    fn entries_require_existing_directory() {
        let err = entry_usage(Path::new("/definitely/not/here"), None).unwrap_err();
        assert!(matches!(err, AppError::MissingPath(_)));
    }
}
