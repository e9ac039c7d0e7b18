use indexmap::IndexMap;
use strata_rules::{StyleRule, Variant};

/// A maximal run of sorted rules sharing one priority tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityBucket<'a> {
	/// `priority / 1000` shared by every rule in the bucket.
	pub tier: u32,
	/// Rules in sorted order, duplicates included.
	pub rules: Vec<&'a StyleRule>,
}

impl<'a> PriorityBucket<'a> {
	/// Variants keyed by class name, later rules replacing earlier ones.
	///
	/// A replaced key keeps the position of its first occurrence.
	pub fn deduplicated(&self) -> impl Iterator<Item = &'a Variant> + use<'a> {
		let mut by_key: IndexMap<&'a str, &'a Variant> = IndexMap::with_capacity(self.rules.len());
		for &rule in &self.rules {
			by_key.insert(&rule.key, &rule.variant);
		}
		by_key.into_values()
	}
}

/// Groups sorted rules into priority buckets in a single pass.
///
/// The input must already be sorted by priority; buckets come out in
/// ascending tier order.
pub fn group_by_tier<'a>(sorted: &[&'a StyleRule]) -> Vec<PriorityBucket<'a>> {
	sorted.iter().fold(Vec::new(), |mut buckets: Vec<PriorityBucket<'a>>, &rule| {
		let tier = rule.tier();
		match buckets.last_mut() {
			Some(last) if last.tier == tier => last.rules.push(rule),
			last => {
				debug_assert!(
					last.is_none_or(|last| last.tier < tier),
					"priority tiers out of order: rules were not sorted"
				);
				buckets.push(PriorityBucket { tier, rules: vec![rule] });
			}
		}
		buckets
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rule(key: &str, priority: u32) -> StyleRule {
		StyleRule::new(key, format!(".{key}{{color:red}}"), priority)
	}

	#[test]
	fn splits_on_tier_change() {
		let rules = [rule("a", 0), rule("b", 999), rule("c", 1000), rule("d", 3000), rule("e", 3500)];
		let sorted: Vec<_> = rules.iter().collect();
		let buckets = group_by_tier(&sorted);
		let shape: Vec<_> = buckets.iter().map(|b| (b.tier, b.rules.len())).collect();
		assert_eq!(shape, vec![(0, 2), (1, 1), (3, 2)]);
	}

	#[test]
	fn empty_input_has_no_buckets() {
		assert!(group_by_tier(&[]).is_empty());
	}

	#[test]
	fn dedup_keeps_last_variant_at_first_position() {
		let first = StyleRule::new("x", ".x{color:red}", 10);
		let other = StyleRule::new("y", ".y{margin:0}", 10);
		let last = StyleRule::new("x", ".x{color:blue}", 20);
		let bucket = PriorityBucket {
			tier: 0,
			rules: vec![&first, &other, &last],
		};
		let texts: Vec<_> = bucket.deduplicated().map(|v| v.ltr.as_str()).collect();
		assert_eq!(texts, vec![".x{color:blue}", ".y{margin:0}"]);
	}

	#[test]
	#[should_panic(expected = "not sorted")]
	#[cfg(debug_assertions)]
	fn unsorted_input_trips_assertion() {
		let rules = [rule("a", 2000), rule("b", 100)];
		let sorted: Vec<_> = rules.iter().collect();
		group_by_tier(&sorted);
	}
}
