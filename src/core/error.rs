//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Scanning never produces one of these; they only come out of the
/// mutating operations in [`super::file_ops`], one per failed path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {}: {}", .1.display(), .0)]
    Io(#[source] std::io::Error, PathBuf),

    /// The move target already exists; nothing is overwritten.
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The path has no final component to carry over to the destination.
    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |err| CoreError::Io(err, path)
    }
}
