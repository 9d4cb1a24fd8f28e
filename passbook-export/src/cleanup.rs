//! Removal of intermediate artifacts after a successful merge.
//!
//! Every path is attempted on its own; a failure is recorded and the rest still run.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: &Path, result: std::io::Result<()>) {
        match result {
            Ok(()) => self.removed.push(path.to_path_buf()),
            Err(e) => {
                log::warn!("failed to delete {}: {}", path.display(), e);
                self.failures.push(CleanupFailure {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Empty each folder entry by entry, then remove the folder itself.
///
/// Folders that do not exist are skipped. A folder that could not be emptied is left in
/// place. Listing nested folders after their parent is fine: they are already gone.
pub fn cleanup_folders(folders: &[impl AsRef<Path>]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for folder in folders {
        let folder = folder.as_ref();
        if !folder.exists() {
            continue;
        }

        let entries = match fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) => {
                report.record(folder, Err(e));
                continue;
            }
        };

        let before = report.failures.len();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let result = remove_entry(&path);
                    report.record(&path, result);
                }
                Err(e) => report.record(folder, Err(e)),
            }
        }

        if report.failures.len() == before {
            report.record(folder, fs::remove_dir(folder));
        }
    }

    report
}
