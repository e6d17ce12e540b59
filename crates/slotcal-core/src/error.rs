//! Error types for slotcal-core.
//!
//! The calendar, availability and action computations never fail: malformed
//! input degrades to a sentinel value. These errors only cover the boundaries
//! that genuinely can fail, such as decoding input documents and talking to
//! a preference storage backend.

use thiserror::Error;

/// The main error type for slotcal operations.
#[derive(Debug, Error)]
pub enum SlotCalError {
    /// Input text could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A preference storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be encoded or decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for slotcal operations.
pub type Result<T> = std::result::Result<T, SlotCalError>;
