//! Compiles the union of every module's atomic rules into one stylesheet.
//!
//! Modules are processed in whatever order the bundler likes, yet the output
//! must cascade the same way every time. [`compile`] gets there by sorting
//! rules into a total order, grouping them into priority tiers of 1000, and
//! making each tier beat the ones before it, either by padding selectors with
//! inert `:not(#\#)` pseudo-classes or by placing each tier in its own
//! `@layer`.

/// Priority tiers and per-tier deduplication.
pub mod bucket;
/// Rule ordering.
pub mod order;
/// Per-bucket rendering.
pub mod render;

pub use bucket::{PriorityBucket, group_by_tier};
pub use order::{RuleOrder, sort_rules};
use strata_rules::StyleRule;

/// Renders `rules` to CSS.
///
/// With `use_layers`, each priority tier is wrapped in `@layer priority<n>`
/// behind a layer-order statement; otherwise tier `n` (0-based) gets `n + 1`
/// specificity pads. Returns `None` when there are no rules. The result
/// depends only on the multiset of rules, never on their order.
pub fn compile<'a>(rules: impl IntoIterator<Item = &'a StyleRule>, use_layers: bool) -> Option<String> {
	let mut sorted: Vec<&StyleRule> = rules.into_iter().collect();
	if sorted.is_empty() {
		return None;
	}
	sort_rules(&mut sorted);
	let buckets = group_by_tier(&sorted);

	let body = buckets
		.iter()
		.enumerate()
		.map(|(index, bucket)| render::render_bucket(bucket, index, use_layers))
		.collect::<Vec<_>>()
		.join("\n");

	tracing::trace!(rules = sorted.len(), buckets = buckets.len(), use_layers, "compiled stylesheet");

	if use_layers {
		Some(render::layer_order_header(buckets.len()) + &body)
	} else {
		Some(body)
	}
}
