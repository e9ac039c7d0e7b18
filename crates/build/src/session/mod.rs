//! One build session: the rule store, the configuration it was created with,
//! and the last rendered stylesheet.

use std::borrow::Cow;
use std::fmt;

use strata_rules::{StyleRule, metadata};
use strata_store::{Invalidation, RuleStore};
use tracing::{debug, trace, warn};
use xxhash_rust::xxh3::Xxh3;

use crate::config::{BuildConfig, OutputMode};
use crate::fingerprint::fingerprint;
use crate::sink::{AssetSink, CssAsset, InvalidationSink};


/// Result of [`BuildSession::ingest_module_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutput<'c> {
	/// Module code with the rule metadata comment removed.
	pub code: Cow<'c, str>,
	/// Whether the update requires the stylesheet to be rebuilt.
	pub invalidation: Invalidation,
}

/// What [`BuildSession::emit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
	/// CSS was concatenated onto an existing asset.
	Appended {
		/// Name of the asset.
		asset: String,
	},
	/// A new asset was created.
	Created {
		/// Configured filename.
		filename: String,
		/// Content fingerprint of the CSS.
		content_hash: String,
	},
	/// Nothing was written.
	Skipped(SkipReason),
}

/// Why [`BuildSession::emit`] wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// No active module has rules.
	NoRules,
	/// Append mode, and no asset matched the target.
	NoMatchingAsset,
}

#[derive(Debug)]
struct RenderCache {
	key: u64,
	css: Option<String>,
}

/// Build-session façade over the rule store and the compiler.
///
/// Owned by the build orchestrator for the lifetime of one session (for a
/// dev server, the whole process). Not internally synchronized.
pub struct BuildSession {
	config: BuildConfig,
	store: RuleStore,
	invalidation: Option<Box<dyn InvalidationSink + Send>>,
	cache: Option<RenderCache>,
}

impl fmt::Debug for BuildSession {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BuildSession")
			.field("config", &self.config)
			.field("store", &self.store)
			.field("invalidation", &self.invalidation.is_some())
			.field("cache", &self.cache)
			.finish()
	}
}

impl BuildSession {
	/// Creates a session with an empty store.
	pub fn new(config: BuildConfig) -> Self {
		let store = match &config.always_recompute {
			Some(pattern) => RuleStore::with_always_recompute(pattern.clone()),
			None => RuleStore::new(),
		};
		Self {
			config,
			store,
			invalidation: None,
			cache: None,
		}
	}

	/// Routes invalidating ingest results to `sink`.
	pub fn with_invalidation_sink(mut self, sink: impl InvalidationSink + Send + 'static) -> Self {
		self.invalidation = Some(Box::new(sink));
		self
	}

	pub fn config(&self) -> &BuildConfig {
		&self.config
	}

	pub fn store(&self) -> &RuleStore {
		&self.store
	}

	/// Returns `true` if the rule extractor should run on this module.
	pub fn accepts(&self, module_id: &str) -> bool {
		self.config.module_pattern.is_match(module_id)
	}

	/// Replaces a module's rules, notifying the invalidation sink when the
	/// stylesheet must be rebuilt.
	pub fn ingest(&mut self, module_id: &str, rules: Vec<StyleRule>) -> Invalidation {
		let signal = self.store.ingest(module_id, rules);
		if signal.is_required()
			&& let Some(sink) = self.invalidation.as_mut()
		{
			sink.invalidate(module_id, signal);
		}
		signal
	}

	/// Reads the rules embedded in a transformed module and ingests them.
	///
	/// Modules that mention none of the configured import sources pass
	/// through untouched. A module without metadata ingests an empty rule
	/// list. Malformed metadata is logged and the module keeps its previous
	/// rules for this pass.
	pub fn ingest_module_code<'c>(&mut self, module_id: &str, code: &'c str) -> ModuleOutput<'c> {
		let unchanged = |code: Cow<'c, str>| ModuleOutput {
			code,
			invalidation: Invalidation::Unchanged,
		};

		if !self.config.import_sources.iter().any(|source| code.contains(source.as_str())) {
			trace!(module = module_id, "no style imports");
			return unchanged(Cow::Borrowed(code));
		}

		let split = match metadata::split(code) {
			Ok(split) => split,
			Err(error) => {
				warn!(module = module_id, %error, "skipping module with malformed rule metadata");
				return unchanged(Cow::Borrowed(code));
			}
		};

		let rules = match split.payload.map(metadata::parse_rules).transpose() {
			Ok(rules) => rules.unwrap_or_default(),
			Err(error) => {
				warn!(module = module_id, %error, "skipping module with malformed rule metadata");
				return unchanged(split.code);
			}
		};

		let invalidation = self.ingest(module_id, rules);
		ModuleOutput {
			code: split.code,
			invalidation,
		}
	}

	/// Restricts compilation to the modules of the latest completed graph.
	pub fn set_active_modules<I, S>(&mut self, ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.store.set_active_modules(ids);
	}

	/// Drops a module that no longer exists.
	pub fn remove_module(&mut self, module_id: &str) -> bool {
		self.store.remove(module_id).is_some()
	}

	/// Compiles the active snapshot. Uncached; see [`render`](Self::render).
	pub fn compile_current(&self, use_layers: bool) -> Option<String> {
		strata_compiler::compile(self.store.snapshot(), use_layers)
	}

	/// Compiles the active snapshot in the configured mode, reusing the last
	/// result if the snapshot has not changed since.
	pub fn render(&mut self) -> Option<String> {
		let use_layers = self.config.use_layers;
		let snapshot = self.store.snapshot();
		let key = snapshot_key(&snapshot, use_layers);

		if let Some(cache) = &self.cache
			&& cache.key == key
		{
			trace!(key, "reusing rendered stylesheet");
			return cache.css.clone();
		}

		let css = strata_compiler::compile(snapshot, use_layers);
		self.cache = Some(RenderCache { key, css: css.clone() });
		css
	}

	/// Content fingerprint of `css` with the configured salt and length.
	pub fn fingerprint(&self, css: &str) -> String {
		fingerprint(css, self.config.hash_salt.as_deref(), self.config.hash_digest_length)
	}

	/// Writes the rendered stylesheet to the orchestrator's assets.
	pub fn emit(&mut self, assets: &mut dyn AssetSink) -> Emitted {
		match self.config.output.clone() {
			OutputMode::Append(target) => {
				let Some(asset) = assets.asset_names().into_iter().find(|name| target.matches(name)) else {
					debug!(?target, "no asset to append stylesheet to");
					return Emitted::Skipped(SkipReason::NoMatchingAsset);
				};
				let Some(css) = self.render() else {
					return Emitted::Skipped(SkipReason::NoRules);
				};
				assets.append(&asset, &css);
				debug!(asset = %asset, bytes = css.len(), "appended stylesheet");
				Emitted::Appended { asset }
			}
			OutputMode::Emit { filename } => {
				let Some(css) = self.render() else {
					return Emitted::Skipped(SkipReason::NoRules);
				};
				let content_hash = self.fingerprint(&css);
				debug!(filename = %filename, %content_hash, bytes = css.len(), "emitting stylesheet");
				assets.emit(CssAsset {
					filename: filename.clone(),
					source: css,
					content_hash: content_hash.clone(),
				});
				Emitted::Created { filename, content_hash }
			}
		}
	}
}

/// Hash identifying a snapshot's content and the rendering mode.
fn snapshot_key(snapshot: &[&StyleRule], use_layers: bool) -> u64 {
	let mut hasher = Xxh3::new();
	hasher.update(&[u8::from(use_layers)]);
	for rule in snapshot {
		hasher.update(rule.key.as_bytes());
		hasher.update(&[0]);
		hasher.update(rule.ltr().as_bytes());
		hasher.update(&[0]);
		match rule.rtl() {
			Some(rtl) => {
				hasher.update(&[1]);
				hasher.update(rtl.as_bytes());
			}
			None => hasher.update(&[2]),
		}
		hasher.update(&rule.priority.to_le_bytes());
	}
	hasher.digest()
}
