//! Error types for the inference engine
//!
//! Most of these never reach a caller: the public entry points recover
//! insufficient or degenerate input locally and degrade to zeroed or demo
//! results. They exist so the internal steps can use `?`.

use thiserror::Error;

/// Errors raised by the kernel, the regression engine and configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Dimension mismatch in {operation}: {left:?} vs {right:?}")]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Insufficient sample: need at least {required} rows, got {actual}")]
    InsufficientSample { required: usize, actual: usize },

    #[error("Input length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
