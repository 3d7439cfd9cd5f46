//! Errors that end the run with a usage exit status.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status for usage and environment errors.
pub const USAGE_EXIT_CODE: u8 = 2;

/// Usage and environment errors.
///
/// Filesystem failures are not part of this type:
/// they propagate as plain `anyhow` errors.
#[derive(Error, Debug)]
pub enum StripError {
    #[error("Must provide a path")]
    MissingPath,

    #[error("{} path does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Strip string can not be empty")]
    EmptyStrip,

    #[error("Not a valid response: '{0}'")]
    InvalidResponse(String),
}
