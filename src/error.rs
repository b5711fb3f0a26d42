//! Unified error types for sbom-prep.
//!
//! The normalization passes themselves degrade gracefully on malformed
//! license data; the errors here cover caller precondition violations,
//! snapshot I/O and configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-prep operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PrepError {
    /// The inventory violates a precondition of the normalization pipeline
    #[error("Inventory integrity check failed: {context}")]
    Integrity {
        context: String,
        #[source]
        source: IntegrityErrorKind,
    },

    /// Errors while reading or writing an inventory snapshot
    #[error("Snapshot handling failed: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific integrity error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IntegrityErrorKind {
    #[error("file '{file}' references unknown package '{package}'")]
    UnknownPackage { file: String, package: String },
}

/// Specific snapshot error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("JSON serialization failed: {0}")]
    Serialization(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-prep operations
pub type Result<T> = std::result::Result<T, PrepError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PrepError {
    /// Create an integrity error with context
    pub fn integrity(context: impl Into<String>, source: IntegrityErrorKind) -> Self {
        Self::Integrity {
            context: context.into(),
            source,
        }
    }

    /// A file points at a package id missing from the package catalog
    pub fn unknown_package(file: impl Into<String>, package: impl Into<String>) -> Self {
        Self::integrity(
            "file/package references",
            IntegrityErrorKind::UnknownPackage {
                file: file.into(),
                package: package.into(),
            },
        )
    }

    /// Create a snapshot error with context
    pub fn snapshot(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::Snapshot {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        Self::snapshot(
            "JSON deserialization",
            SnapshotErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever context the error already carries, so a
/// failure deep in snapshot loading reads `"loading x.json: JSON deserialization"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PrepError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: PrepError, new_ctx: &str) -> PrepError {
    match err {
        PrepError::Integrity {
            context: existing,
            source,
        } => PrepError::Integrity {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PrepError::Snapshot {
            context: existing,
            source,
        } => PrepError::Snapshot {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PrepError::Io {
            path,
            message,
            source,
        } => PrepError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PrepError::Config(msg) => PrepError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
