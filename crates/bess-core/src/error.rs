//! Unified error types for the BESS toolkit
//!
//! This module provides a common error type [`BessError`] that can represent
//! failures from any stage of an arbitrage run (input validation, model
//! construction, solving, reporting). Stage-specific code converts into
//! `BessError` so callers can distinguish "bad input" from "no feasible
//! schedule exists" from "solver could not converge in time".

use thiserror::Error;

/// Unified error type for all BESS operations.
///
/// Each variant corresponds to one failure class in the taxonomy:
/// caller mistakes ([`BessError::InvalidParameter`]) are never retried,
/// infeasible specifications name the offending constraint class, and solver
/// failures carry the backend status text.
#[derive(Error, Debug)]
pub enum BessError {
    /// Malformed scenario or battery inputs (caller error)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Constraints cannot be simultaneously satisfied
    #[error("infeasible specification: {0}")]
    InfeasibleSpecification(String),

    /// Solver-level failure (infeasible/unbounded/timeout without incumbent)
    #[error("solver error: {0}")]
    Solver(String),

    /// Reporter invoked on a result with no usable schedule
    #[error("no schedule available: {0}")]
    NoSchedule(String),

    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using BessError.
pub type BessResult<T> = Result<T, BessError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for BessError {
    fn from(err: anyhow::Error) -> Self {
        BessError::Other(err.to_string())
    }
}

impl From<String> for BessError {
    fn from(s: String) -> Self {
        BessError::Other(s)
    }
}

impl From<&str> for BessError {
    fn from(s: &str) -> Self {
        BessError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for BessError {
    fn from(err: serde_json::Error) -> Self {
        BessError::Parse(err.to_string())
    }
}
