use serde::{Deserialize, Serialize};

use crate::selector;

/// Width of one priority tier. Rules whose priorities share
/// `priority / PRIORITY_TIER` render in the same bucket.
pub const PRIORITY_TIER: u32 = 1000;

/// Literal CSS for one atomic class, in left-to-right form and, when the
/// declaration is direction sensitive, its mirrored right-to-left form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
	/// Full CSS rule text, possibly wrapped in an at-rule.
	pub ltr: String,
	/// Mirrored rule text for `dir="rtl"` documents.
	#[serde(default)]
	pub rtl: Option<String>,
}

impl Variant {
	/// Creates a direction-insensitive variant.
	pub fn ltr(ltr: impl Into<String>) -> Self {
		Self { ltr: ltr.into(), rtl: None }
	}

	/// Creates a variant with both directions.
	pub fn bidi(ltr: impl Into<String>, rtl: impl Into<String>) -> Self {
		Self {
			ltr: ltr.into(),
			rtl: Some(rtl.into()),
		}
	}

	/// Returns `true` if the variant has a right-to-left form.
	#[inline]
	pub fn is_bidi(&self) -> bool {
		self.rtl.is_some()
	}
}

/// One atomic rule emitted by a module.
///
/// Serializes as the `[key, {ltr, rtl}, priority]` tuple the source-to-rule
/// compiler embeds in module metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RuleTuple", into = "RuleTuple")]
pub struct StyleRule {
	/// Generated class name; unique within one module's output.
	pub key: String,
	/// The CSS text for this class.
	pub variant: Variant,
	/// Cascade priority; higher values win regardless of source order.
	pub priority: u32,
}

#[derive(Serialize, Deserialize)]
struct RuleTuple(String, Variant, u32);

impl From<RuleTuple> for StyleRule {
	fn from(RuleTuple(key, variant, priority): RuleTuple) -> Self {
		Self { key, variant, priority }
	}
}

impl From<StyleRule> for RuleTuple {
	fn from(rule: StyleRule) -> Self {
		RuleTuple(rule.key, rule.variant, rule.priority)
	}
}

impl StyleRule {
	/// Creates a direction-insensitive rule.
	pub fn new(key: impl Into<String>, ltr: impl Into<String>, priority: u32) -> Self {
		Self {
			key: key.into(),
			variant: Variant::ltr(ltr),
			priority,
		}
	}

	/// Attaches a right-to-left form to the rule.
	pub fn with_rtl(mut self, rtl: impl Into<String>) -> Self {
		self.variant.rtl = Some(rtl.into());
		self
	}

	/// Left-to-right rule text.
	#[inline]
	pub fn ltr(&self) -> &str {
		&self.variant.ltr
	}

	/// Right-to-left rule text, if any.
	#[inline]
	pub fn rtl(&self) -> Option<&str> {
		self.variant.rtl.as_deref()
	}

	/// Priority tier this rule buckets into.
	#[inline]
	pub fn tier(&self) -> u32 {
		self.priority / PRIORITY_TIER
	}

	/// Returns `true` if the LTR text is wrapped in an at-rule.
	#[inline]
	pub fn is_at_rule(&self) -> bool {
		selector::is_at_rule(&self.variant.ltr)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_wire_tuple() {
		let json = r#"["x1", {"ltr": ".x1{margin-left:4px}", "rtl": ".x1{margin-right:4px}"}, 3000]"#;
		let rule: StyleRule = serde_json::from_str(json).unwrap();
		assert_eq!(rule.key, "x1");
		assert_eq!(rule.ltr(), ".x1{margin-left:4px}");
		assert_eq!(rule.rtl(), Some(".x1{margin-right:4px}"));
		assert_eq!(rule.priority, 3000);
	}

	#[test]
	fn missing_rtl_reads_as_none() {
		let rule: StyleRule = serde_json::from_str(r#"["x1", {"ltr": ".x1{color:red}"}, 1]"#).unwrap();
		assert_eq!(rule.rtl(), None);

		let rule: StyleRule = serde_json::from_str(r#"["x1", {"ltr": ".x1{color:red}", "rtl": null}, 1]"#).unwrap();
		assert!(!rule.variant.is_bidi());
	}

	#[test]
	fn serializes_back_to_tuple() {
		let rule = StyleRule::new("x1", ".x1{color:red}", 3000);
		let json = serde_json::to_string(&rule).unwrap();
		assert_eq!(json, r#"["x1",{"ltr":".x1{color:red}","rtl":null},3000]"#);
	}

	#[test]
	fn rejects_negative_priority() {
		let err = serde_json::from_str::<StyleRule>(r#"["x1", {"ltr": ".x1{}"}, -1]"#);
		assert!(err.is_err());
	}

	#[test]
	fn tier_floors_priority() {
		assert_eq!(StyleRule::new("a", ".a{}", 0).tier(), 0);
		assert_eq!(StyleRule::new("a", ".a{}", 999).tier(), 0);
		assert_eq!(StyleRule::new("a", ".a{}", 1000).tier(), 1);
		assert_eq!(StyleRule::new("a", ".a{}", 5130).tier(), 5);
	}
}
