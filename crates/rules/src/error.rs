//! Error types for embedded rule metadata.

use thiserror::Error;

/// Errors that can occur when reading rule metadata out of module code.
#[derive(Debug, Error)]
pub enum MetadataError {
	/// The start marker was found without a matching end marker on the same line.
	#[error("unterminated rule metadata starting at byte {0}")]
	Unterminated(usize),

	/// The payload is not a JSON array of rule tuples.
	#[error("invalid rule metadata: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
