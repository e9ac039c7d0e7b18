//! Root-locale string collation.
//!
//! Rule ordering has to reproduce the collation order bundlers see from a
//! default-locale string compare, which is not byte order: whitespace sorts
//! before punctuation, punctuation before digits, digits before letters,
//! accented letters sit next to their base letter, and case is consulted only
//! after everything else. This module defers to the CLDR root collation at
//! tertiary strength and breaks any remaining tie on code points so the result
//! is a total order.

use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};

thread_local! {
	static ROOT: Option<CollatorBorrowed<'static>> = root_collator();
}

fn root_collator() -> Option<CollatorBorrowed<'static>> {
	let mut options = CollatorOptions::default();
	options.strength = Some(Strength::Tertiary);
	Collator::try_new(Default::default(), options).ok()
}

/// Compares two strings the way a root-locale collator would, then by code
/// points.
///
/// Without collation data, only the code-point comparison remains.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
	if a == b {
		return Ordering::Equal;
	}
	ROOT.with(|collator| collator.as_ref().map_or(Ordering::Equal, |collator| collator.compare(a, b)))
		.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
	use std::cmp::Ordering::*;

	use proptest::prelude::*;

	use super::*;

	#[test]
	fn punctuation_before_digits_before_letters() {
		assert_eq!(locale_compare("-", "0"), Less);
		assert_eq!(locale_compare("9", "a"), Less);
		assert_eq!(locale_compare("_", "-"), Less);
	}

	#[test]
	fn letters_compare_case_insensitively_first() {
		assert_eq!(locale_compare("B", "a"), Greater);
		assert_eq!(locale_compare("a", "B"), Less);
		assert_eq!(locale_compare("Apple", "apricot"), Less);
	}

	#[test]
	fn lowercase_precedes_uppercase_on_tie() {
		assert_eq!(locale_compare("a", "A"), Less);
		assert_eq!(locale_compare("abC", "abc"), Greater);
	}

	#[test]
	fn declaration_blocks_order_by_property() {
		assert_eq!(locale_compare("{color:red}", "{margin:0}"), Less);
		assert_eq!(locale_compare("{margin-left:0}", "{margin:0}"), Less);
		assert_eq!(locale_compare("{color:blue}", "{color:red}"), Less);
	}

	#[test]
	fn prefix_sorts_first() {
		assert_eq!(locale_compare("{color:red", "{color:red}"), Less);
		assert_eq!(locale_compare("", "a"), Less);
	}

	#[test]
	fn accented_letters_sort_with_their_base_letter() {
		assert_eq!(locale_compare("{content:\"é\"}", "{content:\"f\"}"), Less);
		assert_eq!(locale_compare("{font-family:Ärial}", "{font-family:Bodoni}"), Less);
		assert_eq!(locale_compare("e", "é"), Less);
	}

	#[test]
	fn non_ascii_spaces_and_punctuation_precede_letters_and_digits() {
		assert_eq!(locale_compare("{a:1}", "{a:\u{a0}1}"), Greater);
		assert_eq!(locale_compare("{x:—}", "{x:a}"), Less);
	}

	proptest! {
		#[test]
		fn equal_only_when_identical(a in ".{0,12}", b in ".{0,12}") {
			prop_assert_eq!(locale_compare(&a, &b) == Equal, a == b);
		}

		#[test]
		fn antisymmetric(a in "[ -~]{0,12}", b in "[ -~]{0,12}") {
			prop_assert_eq!(locale_compare(&a, &b), locale_compare(&b, &a).reverse());
		}
	}
}
