//! Error types for configuration composition

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration composition
#[derive(Debug, Error)]
pub enum XatError {
    /// Ambiguous or self-contradictory top-level options
    #[error("Invalid option '{property}': {message}")]
    UsageError { property: String, message: String },

    /// A feature is enabled but the plugin it needs cannot be resolved
    #[error(
        "Feature '{feature}' requires the package '{package}', which is not installed in this project"
    )]
    MissingDependency { feature: String, package: String },

    /// Configuration file loading or parsing errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Dependency,
    Config,
    Io,
    Internal,
}

impl XatError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            XatError::UsageError { .. } => ErrorKind::Usage,
            XatError::MissingDependency { .. } => ErrorKind::Dependency,
            XatError::ConfigError { .. } => ErrorKind::Config,
            XatError::IoError { .. } => ErrorKind::Io,
            XatError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Create a usage error naming the offending property
    pub fn usage_error(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UsageError {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Create a missing dependency error
    pub fn missing_dependency(feature: impl Into<String>, package: impl Into<String>) -> Self {
        Self::MissingDependency {
            feature: feature.into(),
            package: package.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for XatError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
