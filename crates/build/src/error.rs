//! Error types for build configuration.

use thiserror::Error;

/// Errors that can occur when validating a [`BuildConfig`](crate::BuildConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A module-id pattern is not a valid regular expression.
	#[error("invalid {field} pattern: {source}")]
	InvalidPattern {
		/// Which option held the pattern.
		field: &'static str,
		/// The underlying regex error.
		#[source]
		source: regex::Error,
	},

	/// Emit mode was configured with an empty filename.
	#[error("output filename must not be empty")]
	EmptyFilename,

	/// Append mode was configured with an empty asset name.
	#[error("append target must not be empty")]
	EmptyAppendTarget,

	/// No import sources were configured, so no module would ever be read.
	#[error("at least one import source is required")]
	NoImportSources,

	/// The content hash length is zero or exceeds the digits one digest has.
	#[error("hash digest length must be between 1 and {max}, got {0}", max = crate::fingerprint::MAX_DIGEST_LENGTH)]
	InvalidDigestLength(usize),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
