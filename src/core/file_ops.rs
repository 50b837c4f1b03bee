//! Delete and move operations applied to a batch of selected paths.
//!
//! Every path in a batch is attempted on its own. A failure is recorded in
//! the [`BatchReport`] and the remaining paths are still processed.

use super::error::CoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// A single path that could not be deleted or moved.
#[derive(Debug)]
pub struct OperationFailure {
    pub path: PathBuf,
    pub error: CoreError,
}

/// The per-path result of a batch operation.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<PathBuf>,
    pub failures: Vec<OperationFailure>,
}

impl BatchReport {
    /// `true` if every path in the batch went through.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: &Path, result: Result<(), CoreError>) {
        match result {
            Ok(()) => self.succeeded.push(path.to_path_buf()),
            Err(error) => {
                tracing::warn!("Operation failed for {:?}: {}", path, error);
                self.failures.push(OperationFailure {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }
}

/// Removes a file, or a directory together with everything beneath it.
///
/// A symbolic link is removed itself; its target is left alone.
pub fn delete_path(path: &Path) -> Result<(), CoreError> {
    let metadata = fs::symlink_metadata(path).map_err(CoreError::io(path))?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(CoreError::io(path))
    } else {
        fs::remove_file(path).map_err(CoreError::io(path))
    }
}

pub fn delete_paths(paths: &[PathBuf]) -> BatchReport {
    let mut report = BatchReport::default();
    for path in paths {
        report.record(path, delete_path(path));
    }
    tracing::info!(
        "Deleted {} of {} selected item(s)",
        report.succeeded.len(),
        paths.len()
    );
    report
}

/// Moves `path` to `destination/<base name>` and returns the new path.
///
/// An existing target is never overwritten: the move fails with
/// [`CoreError::DestinationExists`]. If renaming a regular file fails (for
/// example across filesystems) the file is copied and the original removed.
pub fn move_path(path: &Path, destination: &Path) -> Result<PathBuf, CoreError> {
    let name = path
        .file_name()
        .ok_or_else(|| CoreError::NoFileName(path.to_path_buf()))?;
    let target = destination.join(name);
    if fs::symlink_metadata(&target).is_ok() {
        return Err(CoreError::DestinationExists(target));
    }

    let metadata = fs::symlink_metadata(path).map_err(CoreError::io(path))?;
    match fs::rename(path, &target) {
        Ok(()) => Ok(target),
        Err(rename_err) if metadata.is_file() => {
            tracing::debug!(
                "Rename of {:?} failed ({}), falling back to copy",
                path,
                rename_err
            );
            copy_then_remove(path, &target)?;
            Ok(target)
        }
        Err(rename_err) => Err(CoreError::Io(rename_err, path.to_path_buf())),
    }
}

fn copy_then_remove(path: &Path, target: &Path) -> Result<(), CoreError> {
    fs::copy(path, target).map_err(CoreError::io(path))?;
    if let Err(e) = fs::remove_file(path) {
        // Leave the source as the only copy.
        if let Err(cleanup) = fs::remove_file(target) {
            tracing::warn!("Failed to remove partial copy {:?}: {}", target, cleanup);
        }
        return Err(CoreError::Io(e, path.to_path_buf()));
    }
    Ok(())
}

pub fn move_paths(paths: &[PathBuf], destination: &Path) -> BatchReport {
    let mut report = BatchReport::default();
    let destination_ok = destination.is_dir();
    for path in paths {
        let result = if destination_ok {
            move_path(path, destination).map(|_| ())
        } else {
            Err(CoreError::NotADirectory(destination.to_path_buf()))
        };
        report.record(path, result);
    }
    tracing::info!(
        "Moved {} of {} selected item(s) to {:?}",
        report.succeeded.len(),
        paths.len(),
        destination
    );
    report
}

/// The directory to show in the file manager for `path`.
///
/// Directories are opened themselves; for anything else the containing
/// directory is opened.
pub fn reveal_target(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}
