//! Rule text is opaque to strata except for a handful of structural cuts:
//! the at-rule header, the trailing declaration block, and the insertion
//! points for ancestor selectors and specificity padding.

/// Ancestor selector scoping the LTR half of a bidirectional rule.
pub const LTR_ANCESTOR: &str = "html:not([dir='rtl'])";

/// Ancestor selector scoping the RTL half of a bidirectional rule.
pub const RTL_ANCESTOR: &str = "html[dir='rtl']";

/// Inert pseudo-class appended once per bucket level to escalate specificity.
///
/// Matches every element (no element has the id `#`) while counting as one
/// id selector.
pub const SPECIFICITY_PAD: &str = ":not(#\\#)";

/// Returns `true` if the text starts with an at-rule (`@media`, `@supports`, ...).
#[inline]
pub fn is_at_rule(text: &str) -> bool {
	text.starts_with('@')
}

/// Returns `true` for `@keyframes` blocks, which carry no selector.
#[inline]
pub fn is_keyframes(text: &str) -> bool {
	text.starts_with("@keyframes")
}

/// Text preceding the first `{`, e.g. `@media (min-width: 800px)`.
///
/// Returns the whole text when it has no block.
pub fn at_rule_header(text: &str) -> &str {
	text.find('{').map_or(text, |idx| &text[..idx])
}

/// Text from the last `{` to the end, e.g. `{color:red}}`.
///
/// Returns the whole text when it has no block.
pub fn declaration_block(text: &str) -> &str {
	text.rfind('{').map_or(text, |idx| &text[idx..])
}

/// Scopes a rule under `ancestor`.
///
/// Plain rules get `"<ancestor> "` prepended. At-rule-wrapped rules keep their
/// header verbatim and get the ancestor inserted right after the first `{`.
pub fn add_ancestor_selector(text: &str, ancestor: &str) -> String {
	if !is_at_rule(text) {
		return format!("{ancestor} {text}");
	}
	let split = text.find('{').map_or(text.len(), |idx| idx + 1);
	let (header, rest) = text.split_at(split);
	format!("{header}{ancestor} {rest}")
}

/// Appends `level + 1` copies of [`SPECIFICITY_PAD`] to the rule's selector.
///
/// The padding lands before the first `::` pseudo-element if there is one,
/// since pseudo-elements must stay last in a compound selector, and otherwise
/// right before the last `{`. `@keyframes` blocks are returned unchanged.
pub fn add_specificity_level(text: &str, level: usize) -> String {
	if is_keyframes(text) {
		return text.to_owned();
	}
	let split = text.find("::").or_else(|| text.rfind('{')).unwrap_or(text.len());
	let (selector, rest) = text.split_at(split);
	let pad = SPECIFICITY_PAD.repeat(level + 1);
	format!("{selector}{pad}{rest}")
}
