//! Build configuration.
//!
//! Options are collected by [`BuildConfigBuilder`] and validated once in
//! [`BuildConfigBuilder::build`]; a [`BuildConfig`] is always usable as is.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::{ConfigError, Result};
use crate::fingerprint::MAX_DIGEST_LENGTH;

/// Module ids whose identity, not just their class set, decides styling.
pub const DEFAULT_ALWAYS_RECOMPUTE: &str = r"\.stylex\.(?:js|ts|tsx)$";

/// Module ids the rule extractor runs on: `.js`, `.jsx`, `.mjs`, `.cjs`,
/// `.ts`, `.tsx`, `.mts`, `.cts`.
pub const DEFAULT_MODULE_PATTERN: &str = r"\.[mc]?[jt]sx?$";

/// Import specifiers that mark a module as using atomic styles.
pub const DEFAULT_IMPORT_SOURCES: &[&str] = &["stylex", "@stylexjs/stylex"];

/// Asset created in emit mode when no filename is configured.
pub const DEFAULT_FILENAME: &str = "stylex.css";

/// Length of the content fingerprint handed to filename templating: the whole
/// digest.
pub const DEFAULT_HASH_DIGEST_LENGTH: usize = MAX_DIGEST_LENGTH;

/// Selects the existing asset the stylesheet is appended to.
#[derive(Clone)]
pub enum AppendTarget {
	/// First asset whose name ends with this string.
	Suffix(String),
	/// First asset the predicate accepts.
	Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl AppendTarget {
	/// Creates a predicate target.
	pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
		Self::Predicate(Arc::new(f))
	}

	/// Returns `true` if the asset named `name` is the target.
	pub fn matches(&self, name: &str) -> bool {
		match self {
			Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
			Self::Predicate(f) => f(name),
		}
	}
}

impl fmt::Debug for AppendTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Suffix(suffix) => f.debug_tuple("Suffix").field(suffix).finish(),
			Self::Predicate(_) => f.write_str("Predicate(..)"),
		}
	}
}

impl From<&str> for AppendTarget {
	fn from(suffix: &str) -> Self {
		Self::Suffix(suffix.to_owned())
	}
}

impl From<String> for AppendTarget {
	fn from(suffix: String) -> Self {
		Self::Suffix(suffix)
	}
}

/// Where the rendered stylesheet goes.
#[derive(Debug, Clone)]
pub enum OutputMode {
	/// Concatenate onto an asset the build already produced.
	Append(AppendTarget),
	/// Create a new asset. The filename may carry templating tokens the
	/// orchestrator resolves using the content fingerprint.
	Emit {
		/// Asset filename.
		filename: String,
	},
}

/// Validated build configuration.
#[derive(Debug, Clone)]
pub struct BuildConfig {
	/// Wrap priority tiers in `@layer` blocks instead of padding selectors.
	pub use_layers: bool,
	/// Module ids whose every update invalidates the stylesheet.
	pub always_recompute: Option<Regex>,
	/// Module ids eligible for rule extraction.
	pub module_pattern: Regex,
	/// Import specifiers a module must mention to be read for rules.
	pub import_sources: Vec<String>,
	/// Output destination.
	pub output: OutputMode,
	/// Salt prepended to the CSS when fingerprinting.
	pub hash_salt: Option<String>,
	/// Fingerprint length in hex digits.
	pub hash_digest_length: usize,
}

impl BuildConfig {
	/// Starts a builder holding the defaults.
	pub fn builder() -> BuildConfigBuilder {
		BuildConfigBuilder::default()
	}
}

/// Unvalidated configuration; see [`BuildConfig`] for the meaning of each option.
#[derive(Debug, Clone)]
pub struct BuildConfigBuilder {
	use_layers: bool,
	always_recompute: Option<String>,
	module_pattern: String,
	import_sources: Vec<String>,
	output: OutputMode,
	hash_salt: Option<String>,
	hash_digest_length: usize,
}

impl Default for BuildConfigBuilder {
	fn default() -> Self {
		Self {
			use_layers: false,
			always_recompute: Some(DEFAULT_ALWAYS_RECOMPUTE.to_owned()),
			module_pattern: DEFAULT_MODULE_PATTERN.to_owned(),
			import_sources: DEFAULT_IMPORT_SOURCES.iter().map(|s| (*s).to_owned()).collect(),
			output: OutputMode::Emit {
				filename: DEFAULT_FILENAME.to_owned(),
			},
			hash_salt: None,
			hash_digest_length: DEFAULT_HASH_DIGEST_LENGTH,
		}
	}
}

impl BuildConfigBuilder {
	pub fn use_layers(mut self, use_layers: bool) -> Self {
		self.use_layers = use_layers;
		self
	}

	pub fn always_recompute(mut self, pattern: impl Into<String>) -> Self {
		self.always_recompute = Some(pattern.into());
		self
	}

	/// Disables the always-recompute rule; only class-set changes invalidate.
	pub fn no_always_recompute(mut self) -> Self {
		self.always_recompute = None;
		self
	}

	pub fn module_pattern(mut self, pattern: impl Into<String>) -> Self {
		self.module_pattern = pattern.into();
		self
	}

	pub fn import_sources<I, S>(mut self, sources: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.import_sources = sources.into_iter().map(Into::into).collect();
		self
	}

	/// Appends to an existing asset instead of emitting one.
	pub fn append_to(mut self, target: impl Into<AppendTarget>) -> Self {
		self.output = OutputMode::Append(target.into());
		self
	}

	/// Emits a new asset with this filename.
	pub fn filename(mut self, filename: impl Into<String>) -> Self {
		self.output = OutputMode::Emit {
			filename: filename.into(),
		};
		self
	}

	pub fn hash_salt(mut self, salt: impl Into<String>) -> Self {
		self.hash_salt = Some(salt.into());
		self
	}

	pub fn hash_digest_length(mut self, length: usize) -> Self {
		self.hash_digest_length = length;
		self
	}

	/// Validates the options.
	///
	/// # Errors
	///
	/// Fails on invalid patterns, an empty filename or append target, an
	/// empty import-source list, or a digest length outside
	/// `1..=`[`MAX_DIGEST_LENGTH`].
	pub fn build(self) -> Result<BuildConfig> {
		let compile = |field: &'static str, pattern: &str| {
			Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { field, source })
		};

		match &self.output {
			OutputMode::Emit { filename } if filename.is_empty() => return Err(ConfigError::EmptyFilename),
			OutputMode::Append(AppendTarget::Suffix(suffix)) if suffix.is_empty() => {
				return Err(ConfigError::EmptyAppendTarget);
			}
			_ => {}
		}
		if self.import_sources.is_empty() {
			return Err(ConfigError::NoImportSources);
		}
		if !(1..=MAX_DIGEST_LENGTH).contains(&self.hash_digest_length) {
			return Err(ConfigError::InvalidDigestLength(self.hash_digest_length));
		}

		Ok(BuildConfig {
			use_layers: self.use_layers,
			always_recompute: self
				.always_recompute
				.as_deref()
				.map(|pattern| compile("always_recompute", pattern))
				.transpose()?,
			module_pattern: compile("module_pattern", &self.module_pattern)?,
			import_sources: self.import_sources,
			output: self.output,
			hash_salt: self.hash_salt,
			hash_digest_length: self.hash_digest_length,
		})
	}
}
