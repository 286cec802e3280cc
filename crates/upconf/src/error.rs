//! Error types for configuration discovery and loading.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error returned by loaders and transform hooks.
pub type LoaderError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while searching for or loading a configuration file.
///
/// Every variant is `Clone` so that a failed outcome can be stored in the
/// result caches and replayed to later callers, exactly like a success.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The path does not exist or is a directory.
    ///
    /// The upward search treats this as "try the next candidate"; a direct
    /// [`load`](crate::Explorer::load) surfaces it to the caller.
    #[error("config file not found: {}", .path.display())]
    NotFound {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: Arc<io::Error>,
    },

    /// No loader is registered for the file's extension and there is no
    /// default loader.
    #[error("no loader specified for {}", describe_extension(.extension.as_deref()))]
    NoLoader {
        /// The extension without its leading dot, or `None` for files
        /// without an extension.
        extension: Option<String>,
    },

    /// The selected loader rejected the file contents.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The loader's error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The package manifest is not valid JSON.
    #[error("failed to parse package manifest {}: {source}", .path.display())]
    Manifest {
        /// The manifest path.
        path: PathBuf,
        /// The JSON error.
        source: Arc<serde_json::Error>,
    },

    /// The session's transform hook failed.
    #[error("config transform failed: {source}")]
    Transform {
        /// The hook's error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// A meta-config file was found but its contents are unusable.
    #[error("invalid meta config {}: {reason}", .path.display())]
    MetaConfig {
        /// The meta-config file.
        path: PathBuf,
        /// A description of what is wrong.
        reason: String,
    },

    /// The current working directory could not be determined.
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(Arc<io::Error>),
}

impl Error {
    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Classify an I/O error raised while reading `path`.
    ///
    /// Missing files and directories map to [`Error::NotFound`], everything
    /// else to [`Error::Read`].
    pub(crate) fn from_read(path: PathBuf, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::IsADirectory => Error::NotFound { path },
            _ if path.is_dir() => Error::NotFound { path },
            _ => Error::Read {
                path,
                source: Arc::new(err),
            },
        }
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable description of an extension for error messages.
pub(crate) fn describe_extension(extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("extension \".{ext}\""),
        None => "files without extensions".to_string(),
    }
}
