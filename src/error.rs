//! Error types for building and driving a cloth engine.
//!
//! Only construction and caller-owned buffer projection can fail; per-frame
//! stepping normalizes its inputs instead of reporting errors.

use alloc::string::String;
use thiserror::Error;

/// Errors that can occur while building or projecting a cloth.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// The lattice needs at least one column.
    #[error("column count must be at least 1 (got {cols})")]
    InvalidColumns { cols: usize },

    /// The viewport aspect ratio must be positive and finite.
    #[error("aspect ratio must be positive and finite (got {0})")]
    InvalidAspectRatio(f64),

    /// The column count and aspect ratio ask for more particles than a
    /// lattice may hold.
    #[error("{cols} columns by {rows} rows exceeds the lattice size limit")]
    LatticeTooLarge { cols: usize, rows: f64 },

    /// A tuning constant is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-owned vertex buffer does not match the constraint count.
    #[error("vertex buffer holds {actual} floats, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Convenience alias for `Result<T, ClothError>`.
pub type ClothResult<T> = Result<T, ClothError>;
