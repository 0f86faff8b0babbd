//! Error types for configuration and output operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type of the crate
///
/// Search exhaustion is not an error; it is reported through
/// [`crate::engine::SearchOutcome`].
#[derive(Debug)]
pub enum Nmbr9Error {
    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to write a board image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for Nmbr9Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for Nmbr9Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::InvalidParameter { .. } => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, Nmbr9Error>;

impl From<image::ImageError> for Nmbr9Error {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for Nmbr9Error {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Attaches the path and operation to I/O failures
pub trait WithPath<T> {
    /// Replace the placeholder path and operation of the error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<Nmbr9Error>,
{
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            Nmbr9Error::FileSystem { source, .. } => Nmbr9Error::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            Nmbr9Error::ImageExport { source, .. } => Nmbr9Error::ImageExport {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> Nmbr9Error {
    Nmbr9Error::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
