//! The source-to-rule compiler hands its output to the build as a JSON array
//! of rule tuples embedded in a block comment of the transformed module:
//!
//! ```text
//! /*__stylex_metadata_start__[["x1",{"ltr":".x1{color:red}","rtl":null},3000]]__stylex_metadata_end__*/
//! ```
//!
//! The comment must be removed before the code reaches the bundle.

use std::borrow::Cow;

use crate::StyleRule;
use crate::error::{MetadataError, Result};

/// Opening marker of an embedded metadata comment.
pub const METADATA_START: &str = "/*__stylex_metadata_start__";

/// Closing marker of an embedded metadata comment.
pub const METADATA_END: &str = "__stylex_metadata_end__*/";

/// Module code with its metadata comment removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitModule<'a> {
	/// Code without the metadata comment.
	pub code: Cow<'a, str>,
	/// Raw JSON payload, if the module carried one.
	pub payload: Option<&'a str>,
}

/// Finds the first complete metadata comment in `code` and cuts it out.
///
/// The payload ends at the last end marker on the line the start marker is
/// on; metadata never spans lines. A start marker without an end marker on its
/// line is passed over in favor of a later, complete one.
///
/// # Errors
///
/// Returns [`MetadataError::Unterminated`], carrying the offset of the first
/// start marker, if no start marker has an end marker on its line. The caller
/// keeps the code untouched in that case.
pub fn split(code: &str) -> Result<SplitModule<'_>> {
	let mut first = None;
	let mut from = 0;
	while let Some(found) = code[from..].find(METADATA_START) {
		let start = from + found;
		if first.is_none() {
			first = Some(start);
		}
		let body_start = start + METADATA_START.len();
		let line_end = code[body_start..].find('\n').map_or(code.len(), |idx| body_start + idx);

		if let Some(end) = code[body_start..line_end].rfind(METADATA_END).filter(|&idx| idx > 0) {
			let tail = body_start + end + METADATA_END.len();
			let mut stripped = String::with_capacity(code.len() - (tail - start));
			stripped.push_str(&code[..start]);
			stripped.push_str(&code[tail..]);
			return Ok(SplitModule {
				code: Cow::Owned(stripped),
				payload: Some(&code[body_start..body_start + end]),
			});
		}
		// Any later marker on this line has no end marker after it either.
		from = line_end;
	}

	match first {
		Some(start) => Err(MetadataError::Unterminated(start)),
		None => Ok(SplitModule {
			code: Cow::Borrowed(code),
			payload: None,
		}),
	}
}

/// Parses a metadata payload into rules.
///
/// # Errors
///
/// Returns [`MetadataError::Json`] if the payload is not an array of
/// `[key, {ltr, rtl}, priority]` tuples.
pub fn parse_rules(payload: &str) -> Result<Vec<StyleRule>> {
	Ok(serde_json::from_str(payload)?)
}

/// Renders the metadata comment for `rules`, as the source-to-rule compiler
/// would emit it.
///
/// # Errors
///
/// Returns [`MetadataError::Json`] if serialization fails.
pub fn annotate(rules: &[StyleRule]) -> Result<String> {
	let json = serde_json::to_string(rules)?;
	Ok(format!("{METADATA_START}{json}{METADATA_END}"))
}
