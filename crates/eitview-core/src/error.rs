//! Error types for eitview.

use thiserror::Error;

/// The main error type for eitview operations.
#[derive(Error, Debug)]
pub enum EitViewError {
    /// No mesh has been loaded into the viewer.
    #[error("viewer not initialized - call initialize() with a mesh first")]
    NotInitialized,

    /// The mesh description is unusable.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// A viewer setting is out of range.
    #[error("invalid option {name}: {message}")]
    InvalidOption { name: &'static str, message: String },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A delivered frame matrix has no columns.
    #[error("frame buffer has no frames")]
    EmptyFrameBuffer,

    /// A matrix text file could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for eitview operations.
pub type Result<T> = std::result::Result<T, EitViewError>;
