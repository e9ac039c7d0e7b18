use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use strata_rules::selector::{at_rule_header, declaration_block, is_at_rule};
use strata_rules::{StyleRule, locale_compare};

/// Where a rule falls relative to at-rules of the same priority.
///
/// A plain rule and an at-rule of equal priority order by their headers. The
/// plain header never starts with `@`, so that comparison is settled by its
/// first character alone and splits plain rules into those sorting before
/// every at-rule and those sorting after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Placement {
	BeforeAtRules,
	AtRule,
	AfterAtRules,
}

impl Placement {
	fn of(text: &str) -> Self {
		if is_at_rule(text) {
			Self::AtRule
		} else if locale_compare(at_rule_header(text), "@") == Ordering::Less {
			Self::BeforeAtRules
		} else {
			Self::AfterAtRules
		}
	}
}

/// Total order over one set of rules, independent of where they came from.
///
/// 1. ascending priority;
/// 2. at-rule vs plain rule: by at-rule header, only among priorities that
///    have an at-rule;
/// 3. by trailing declaration block, locale-aware;
/// 4. by full LTR text, key, and RTL text, so that no two distinct rules
///    compare equal.
///
/// Step 2 depends on which priorities carry at-rules, so the order is built
/// from the rules it will sort.
#[derive(Debug, Default, Clone)]
pub struct RuleOrder {
	with_at_rules: FxHashSet<u32>,
}

impl RuleOrder {
	pub fn new<'a>(rules: impl IntoIterator<Item = &'a StyleRule>) -> Self {
		let with_at_rules = rules
			.into_iter()
			.filter(|rule| rule.is_at_rule())
			.map(|rule| rule.priority)
			.collect();
		Self { with_at_rules }
	}

	pub fn compare(&self, a: &StyleRule, b: &StyleRule) -> Ordering {
		a.priority
			.cmp(&b.priority)
			.then_with(|| self.compare_placement(a, b))
			.then_with(|| locale_compare(declaration_block(a.ltr()), declaration_block(b.ltr())))
			.then_with(|| locale_compare(a.ltr(), b.ltr()))
			.then_with(|| a.key.cmp(&b.key))
			.then_with(|| a.rtl().cmp(&b.rtl()))
	}

	/// Only called on equal priorities.
	fn compare_placement(&self, a: &StyleRule, b: &StyleRule) -> Ordering {
		if self.with_at_rules.contains(&a.priority) {
			Placement::of(a.ltr()).cmp(&Placement::of(b.ltr()))
		} else {
			Ordering::Equal
		}
	}
}

/// Sorts rules in place by the [`RuleOrder`] of the slice itself.
pub fn sort_rules(rules: &mut [&StyleRule]) {
	let order = RuleOrder::new(rules.iter().copied());
	rules.sort_by(|a, b| order.compare(a, b));
}
