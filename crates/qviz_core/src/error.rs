//! Error types for QVIZ
//!
//! Gantree: L0_Foundation → Errors
//!
//! Error taxonomy shared by every QVIZ crate.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QVIZ
/// Gantree: QvizError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QvizError {
    // ========================================================================
    // Result Errors
    // ========================================================================
    /// Result is missing, malformed, or shape-mismatched
    /// Gantree: InvalidResult(String) // 결과 검증
    #[error("Invalid simulation result: {0}")]
    InvalidResult(String),

    /// Backend reported failure
    #[error("Simulation failed: {0}")]
    ResultUnsuccessful(String),

    /// Qubit or basis-state index outside valid bounds
    /// Gantree: IndexOutOfRange{{index,len}} // 인덱스 범위
    #[error("Index {index} out of range: length is {len}")]
    IndexOutOfRange { index: usize, len: usize },

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// Second live task found for one owner
    /// Gantree: AnimationTaskConflict{{owner}} // 태스크 충돌
    #[error("Animation task conflict: {owner} already has a running task")]
    AnimationTaskConflict { owner: String },

    // ========================================================================
    // Configuration / I/O Errors
    // ========================================================================
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QVIZ operations
/// Gantree: QvizResult<T> // type alias
pub type QvizResult<T> = Result<T, QvizError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QvizError {
    fn from(err: serde_json::Error) -> Self {
        QvizError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QvizError {
    fn from(err: std::io::Error) -> Self {
        QvizError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QvizError {
    /// Check if error means "this result cannot be shown"
    pub fn is_invalid_result(&self) -> bool {
        matches!(
            self,
            QvizError::InvalidResult(_) | QvizError::ResultUnsuccessful(_) | QvizError::JsonError(_)
        )
    }

    /// Check if error is an invariant violation
    pub fn is_fatal(&self) -> bool {
        matches!(self, QvizError::AnimationTaskConflict { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
