use strata_rules::Variant;
use strata_rules::selector::{LTR_ANCESTOR, RTL_ANCESTOR, add_ancestor_selector, add_specificity_level};

use crate::bucket::PriorityBucket;

/// Name of the cascade layer holding the bucket at `index`.
pub fn layer_name(index: usize) -> String {
	format!("priority{}", index + 1)
}

/// `@layer priority1, priority2, ...;` statement fixing layer precedence.
pub fn layer_order_header(buckets: usize) -> String {
	let names: Vec<_> = (0..buckets).map(layer_name).collect();
	format!("@layer {};\n", names.join(", "))
}

/// Renders one variant into one or two rules.
///
/// Direction-sensitive variants expand into an LTR rule scoped under
/// [`LTR_ANCESTOR`] and an RTL rule scoped under [`RTL_ANCESTOR`]. Without
/// layers, each rule is padded to bucket `index`'s specificity first.
fn expand_variant(variant: &Variant, index: usize, use_layers: bool, out: &mut Vec<String>) {
	let escalate = |text: &str| {
		if use_layers {
			text.to_owned()
		} else {
			add_specificity_level(text, index)
		}
	};
	let ltr = escalate(&variant.ltr);
	match variant.rtl.as_deref() {
		None => out.push(ltr),
		Some(rtl) => {
			out.push(add_ancestor_selector(&ltr, LTR_ANCESTOR));
			out.push(add_ancestor_selector(&escalate(rtl), RTL_ANCESTOR));
		}
	}
}

/// Renders the bucket at `index`: deduplicated, direction-expanded rules
/// joined by newlines, wrapped in its layer block when layers are on.
pub fn render_bucket(bucket: &PriorityBucket<'_>, index: usize, use_layers: bool) -> String {
	let mut rules = Vec::with_capacity(bucket.rules.len());
	for variant in bucket.deduplicated() {
		expand_variant(variant, index, use_layers, &mut rules);
	}
	let body = rules.join("\n");
	if use_layers {
		format!("@layer {}{{\n{body}\n}}", layer_name(index))
	} else {
		body
	}
}
