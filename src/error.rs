use std::fmt;
use std::path::{Path, PathBuf};

/// Error type for the cleanup pipeline
#[derive(Debug)]
pub enum CleanupError {
    /// Kubeconfig could not be located, read or parsed
    Load { path: PathBuf, message: String },
    /// Interactive selection failed or named an unknown context
    Selection(String),
    /// Kubeconfig could not be serialized or written back
    Write { path: PathBuf, message: String },
}

impl CleanupError {
    /// Build a load error for the given path
    pub fn load(path: &Path, message: impl Into<String>) -> Self {
        CleanupError::Load {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Build a write error for the given path
    pub fn write(path: &Path, message: impl Into<String>) -> Self {
        CleanupError::Write {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupError::Load { path, message } => {
                write!(f, "Failed to load kubeconfig {}: {}", path.display(), message)
            }
            CleanupError::Selection(msg) => write!(f, "Context selection failed: {}", msg),
            CleanupError::Write { path, message } => {
                write!(f, "Failed to write kubeconfig {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for CleanupError {}

impl From<dialoguer::Error> for CleanupError {
    fn from(err: dialoguer::Error) -> Self {
        CleanupError::Selection(err.to_string())
    }
}

/// Result type alias for cleanup operations
pub type Result<T> = std::result::Result<T, CleanupError>;
