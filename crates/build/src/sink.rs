//! Seams to the build orchestrator.

use strata_store::Invalidation;

/// Receives ingest results that require the stylesheet to be rebuilt.
///
/// Orchestrators typically react by marking previously emitted CSS assets as
/// changed so their watchers trigger another pass.
pub trait InvalidationSink {
	/// Called once per ingest of `module_id` that returned a rebuild-requiring
	/// `signal`.
	fn invalidate(&mut self, module_id: &str, signal: Invalidation);
}

impl<F> InvalidationSink for F
where
	F: FnMut(&str, Invalidation),
{
	fn invalidate(&mut self, module_id: &str, signal: Invalidation) {
		self(module_id, signal)
	}
}

/// A new stylesheet asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssAsset {
	/// Configured filename, templating tokens unresolved.
	pub filename: String,
	/// Rendered CSS.
	pub source: String,
	/// Content fingerprint for the orchestrator's templating.
	pub content_hash: String,
}

/// The orchestrator's asset table for the current pass.
pub trait AssetSink {
	/// Names of the assets produced so far, in the orchestrator's order.
	fn asset_names(&self) -> Vec<String>;

	/// Concatenates `css` onto the named asset.
	fn append(&mut self, name: &str, css: &str);

	/// Adds a new asset.
	fn emit(&mut self, asset: CssAsset);
}
