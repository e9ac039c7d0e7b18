//! Per-module rule lists for one build session.
//!
//! Each module's entry is replaced wholesale whenever the source-to-rule
//! compiler reports new output for it. [`RuleStore::ingest`] tells the caller
//! whether the replacement changed the set of classes that exist, which is
//! what decides if the aggregate stylesheet has to be rebuilt.
//!
//! The store is single-writer: hosts that drive builds from several workers
//! must serialize access themselves.

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use strata_rules::StyleRule;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Outcome of [`RuleStore::ingest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Invalidation {
	/// Same set of class keys as before; the module only changed which
	/// existing classes it uses.
	Unchanged,
	/// Keys were added or removed.
	KeysChanged,
	/// The module id matches the always-recompute pattern.
	AlwaysRecompute,
}

impl Invalidation {
	/// Returns `true` if cached stylesheet output must be recomputed.
	#[inline]
	pub fn is_required(self) -> bool {
		!matches!(self, Self::Unchanged)
	}
}

impl From<Invalidation> for bool {
	fn from(signal: Invalidation) -> Self {
		signal.is_required()
	}
}

/// Rules of every module seen this session, plus the membership of the last
/// completed module graph.
#[derive(Debug, Default, Clone)]
pub struct RuleStore {
	modules: FxHashMap<String, Vec<StyleRule>>,
	/// `None` until the first completed graph; every module counts as active.
	active: Option<FxHashSet<String>>,
	always_recompute: Option<Regex>,
}

impl RuleStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty store whose [`ingest`](Self::ingest) always
	/// invalidates for module ids matching `pattern`.
	pub fn with_always_recompute(pattern: Regex) -> Self {
		Self {
			always_recompute: Some(pattern),
			..Self::default()
		}
	}

	/// Replaces a module's rules and reports whether dependents must be
	/// invalidated.
	pub fn ingest(&mut self, module_id: impl Into<String>, rules: Vec<StyleRule>) -> Invalidation {
		let module_id = module_id.into();
		let keys_changed = {
			let new_keys: FxHashSet<&str> = rules.iter().map(|rule| rule.key.as_str()).collect();
			let old_keys: FxHashSet<&str> = self
				.modules
				.get(&module_id)
				.map(|old| old.iter().map(|rule| rule.key.as_str()).collect())
				.unwrap_or_default();
			old_keys.len() != new_keys.len() || new_keys.iter().any(|key| !old_keys.contains(key))
		};

		let signal = if keys_changed {
			Invalidation::KeysChanged
		} else if self.always_recomputes(&module_id) {
			Invalidation::AlwaysRecompute
		} else {
			Invalidation::Unchanged
		};

		debug!(module = %module_id, rules = rules.len(), ?signal, "ingested module rules");
		self.modules.insert(module_id, rules);
		signal
	}

	/// Replaces the set of modules whose rules are visible to [`snapshot`](Self::snapshot).
	pub fn set_active_modules<I, S>(&mut self, ids: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let active: FxHashSet<String> = ids.into_iter().map(Into::into).collect();
		debug!(active = active.len(), stored = self.modules.len(), "updated active modules");
		self.active = Some(active);
	}

	/// All rules of active modules.
	///
	/// Modules are visited in id order so the sequence is stable between
	/// calls; the compiler does not depend on it.
	pub fn snapshot(&self) -> Vec<&StyleRule> {
		let mut modules: Vec<_> = self.modules.iter().filter(|(id, _)| self.is_active(id)).collect();
		modules.sort_unstable_by(|a, b| a.0.cmp(b.0));
		modules.into_iter().flat_map(|(_, rules)| rules).collect()
	}

	/// Returns `true` if the module's rules are visible to snapshots.
	pub fn is_active(&self, module_id: &str) -> bool {
		self.active.as_ref().is_none_or(|active| active.contains(module_id))
	}

	/// Returns `true` if `module_id` matches the always-recompute pattern.
	pub fn always_recomputes(&self, module_id: &str) -> bool {
		self.always_recompute.as_ref().is_some_and(|pattern| pattern.is_match(module_id))
	}

	/// The rules a module most recently produced.
	pub fn rules(&self, module_id: &str) -> Option<&[StyleRule]> {
		self.modules.get(module_id).map(Vec::as_slice)
	}

	/// Returns `true` if the module has an entry.
	pub fn contains(&self, module_id: &str) -> bool {
		self.modules.contains_key(module_id)
	}

	/// Drops a module's entry, returning its rules.
	pub fn remove(&mut self, module_id: &str) -> Option<Vec<StyleRule>> {
		self.modules.remove(module_id)
	}

	/// Number of modules with an entry, active or not.
	pub fn len(&self) -> usize {
		self.modules.len()
	}

	/// Returns `true` if no module has an entry.
	pub fn is_empty(&self) -> bool {
		self.modules.is_empty()
	}

	/// Forgets all modules and the active set. The always-recompute pattern is kept.
	pub fn clear(&mut self) {
		self.modules.clear();
		self.active = None;
	}
}
