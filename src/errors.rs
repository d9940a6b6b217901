//! Error types for pipeline construction.
//!
//! The per-frame path deliberately has no error cases: malformed geometry
//! degrades into non-finite scores rather than faulting, and missing
//! optional data is handled by omission. Errors exist only where a caller
//! can hand over an unusable configuration up front.

use std::fmt;

/// Errors that can occur when building a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// The identity registry was empty. Registration assigns entries
    /// round-robin, so at least one entry is required.
    EmptyRegistry,

    /// Configuration parameter out of its valid range.
    Configuration {
        /// Description of the configuration issue
        description: String,
    },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::EmptyRegistry => {
                write!(f, "identity registry must contain at least one entry")
            }
            TrackerError::Configuration { description } => {
                write!(f, "Configuration error: {}", description)
            }
        }
    }
}

impl std::error::Error for TrackerError {}
