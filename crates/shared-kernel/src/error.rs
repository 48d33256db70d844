// crates/shared-kernel/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NoteCountError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<NoteCountError>,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl NoteCountError {
    /// True when the error (or any context layer around it) is a display target
    /// that has not appeared yet.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_retryable(),
            Self::Application(ApplicationError::DisplayTargetUnavailable { .. }) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteCountError>;

/// Domain-layer specific errors.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown count type '{value}'")]
    UnknownCountType { value: String },

    #[error("Invalid setting '{field}': {reason}")]
    InvalidSetting { field: String, reason: String },
}

/// Application-layer errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Display target unavailable: {reason}")]
    DisplayTargetUnavailable { reason: String },

    #[error("Failed to list candidate files: {reason}")]
    FileListingFailed {
        reason: String,
        #[source]
        source: Option<Box<NoteCountError>>,
    },
}

/// Infrastructure-layer errors.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} data: {details}")]
    SerializationError { format: String, details: String },

    #[error("File system operation failed: {operation} on '{path}': {source}")]
    FileSystemOperation {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed under '{path}': {details}")]
    WalkFailed { path: PathBuf, details: String },
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            format: "JSON".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NoteCountError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<NoteCountError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| NoteCountError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| NoteCountError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
