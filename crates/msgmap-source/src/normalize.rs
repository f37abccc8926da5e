// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion of platform locale strings into the `language[_REGION]` grammar.

use msgmap_core::LocaleTag;
use tracing::debug;

/// Locale names that mean "no localisation" rather than a language.
const NEUTRAL_LOCALES: &[&str] = &["C", "POSIX"];

/// Normalise a POSIX locale name such as `en_US.UTF-8` or `sr_RS@latin`.
///
/// The codeset and modifier are dropped. `C` and `POSIX` yield `None`. A
/// region that does not fit the grammar (e.g. `es_419`) is dropped while the
/// language is kept.
///
/// ```
/// use msgmap_source::normalize_posix;
///
/// assert_eq!(normalize_posix("en_US.UTF-8").as_deref(), Some("en_US"));
/// assert_eq!(normalize_posix("sr_RS@latin").as_deref(), Some("sr_RS"));
/// assert_eq!(normalize_posix("C.UTF-8"), None);
/// ```
pub fn normalize_posix(raw: &str) -> Option<String> {
	let stripped = strip_codeset_and_modifier(raw)?;
	let (language, region) = match stripped.split_once(['_', '-']) {
		Some((language, region)) => (language, Some(region)),
		None => (stripped, None),
	};

	from_parts(language, region)
}

/// Normalise a BCP-47 tag as reported by the operating system, such as
/// `en-US` or `zh-Hans-CN`.
///
/// The region is the first two-letter alphabetic subtag after the language.
/// Script subtags and numeric regions are skipped, and an extension
/// singleton ends the search. `C` and `POSIX` yield `None`.
///
/// ```
/// use msgmap_source::normalize_bcp47;
///
/// assert_eq!(normalize_bcp47("en-US").as_deref(), Some("en_US"));
/// assert_eq!(normalize_bcp47("zh-Hans-CN").as_deref(), Some("zh_CN"));
/// assert_eq!(normalize_bcp47("es-419").as_deref(), Some("es"));
/// assert_eq!(normalize_bcp47("C"), None);
/// ```
pub fn normalize_bcp47(raw: &str) -> Option<String> {
	let stripped = strip_codeset_and_modifier(raw)?;
	let mut subtags = stripped.split(['-', '_']);
	let language = subtags.next()?;
	if language.eq_ignore_ascii_case("und") {
		return None;
	}

	let region = subtags
		.take_while(|s| s.len() != 1)
		.find(|s| s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()));

	from_parts(language, region)
}

/// Normalise every value, dropping the ones that cannot be expressed and
/// keeping only the first occurrence of each resulting locale.
pub fn normalize_all<I, S>(raw: I, normalize: fn(&str) -> Option<String>) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut out: Vec<String> = Vec::new();
	for value in raw {
		let value = value.as_ref();
		match normalize(value) {
			Some(locale) if !out.contains(&locale) => out.push(locale),
			Some(_) => {}
			None => debug!(locale = value, "skipping locale that cannot be normalized"),
		}
	}
	out
}

/// The locale name without codeset or modifier, or `None` when nothing
/// remains or the name is a neutral locale.
fn strip_codeset_and_modifier(raw: &str) -> Option<&str> {
	let stripped = raw.trim().split(['.', '@']).next()?.trim();
	if stripped.is_empty()
		|| NEUTRAL_LOCALES
			.iter()
			.any(|neutral| stripped.eq_ignore_ascii_case(neutral))
	{
		return None;
	}
	Some(stripped)
}

fn from_parts(language: &str, region: Option<&str>) -> Option<String> {
	let language = LocaleTag::parse_table_tag(language).ok()?;
	let with_region = region.and_then(|r| {
		LocaleTag::new(language.language(), Some(r.to_ascii_uppercase().as_str())).ok()
	});

	Some(with_region.unwrap_or(language).to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_posix_variants() {
		assert_eq!(normalize_posix("en_US").as_deref(), Some("en_US"));
		assert_eq!(normalize_posix("de_DE.ISO-8859-1").as_deref(), Some("de_DE"));
		assert_eq!(normalize_posix("ca_ES.UTF-8@valencia").as_deref(), Some("ca_ES"));
		assert_eq!(normalize_posix("fr").as_deref(), Some("fr"));
		assert_eq!(normalize_posix("pt_br").as_deref(), Some("pt_BR"));
		assert_eq!(normalize_posix("es_419").as_deref(), Some("es"));
	}

	#[test]
	fn test_posix_neutral_and_empty() {
		assert_eq!(normalize_posix("C"), None);
		assert_eq!(normalize_posix("POSIX"), None);
		assert_eq!(normalize_posix("C.UTF-8"), None);
		assert_eq!(normalize_posix(""), None);
		assert_eq!(normalize_posix("   "), None);
		assert_eq!(normalize_posix(".UTF-8"), None);
	}

	#[test]
	fn test_posix_garbage_language() {
		assert_eq!(normalize_posix("12_US"), None);
		assert_eq!(normalize_posix("/usr/lib/locale"), None);
	}

	#[test]
	fn test_bcp47_variants() {
		assert_eq!(normalize_bcp47("en").as_deref(), Some("en"));
		assert_eq!(normalize_bcp47("EN-us").as_deref(), Some("en_US"));
		assert_eq!(normalize_bcp47("sr-Latn-RS").as_deref(), Some("sr_RS"));
		assert_eq!(normalize_bcp47("zh-Hant").as_deref(), Some("zh"));
		assert_eq!(normalize_bcp47("de-DE-u-co-phonebk").as_deref(), Some("de_DE"));
		assert_eq!(normalize_bcp47("en-u-rg-gbzzzz").as_deref(), Some("en"));
		assert_eq!(normalize_bcp47("und"), None);
		assert_eq!(normalize_bcp47(""), None);
	}

	#[test]
	fn test_bcp47_neutral_locales() {
		assert_eq!(normalize_bcp47("C"), None);
		assert_eq!(normalize_bcp47("POSIX"), None);
		assert_eq!(normalize_bcp47("C.UTF-8"), None);
		assert_eq!(normalize_bcp47("posix"), None);
		assert_eq!(normalize_posix("c.utf8"), None);
	}

	#[test]
	fn test_bcp47_any_extension_ends_region_search() {
		assert_eq!(normalize_bcp47("en-t-ja-JP").as_deref(), Some("en"));
		assert_eq!(normalize_bcp47("fr-CA-t-en-US").as_deref(), Some("fr_CA"));
		assert_eq!(normalize_bcp47("de-x-AT").as_deref(), Some("de"));
	}

	#[test]
	fn test_normalize_all_dedupes_in_order() {
		let values = ["en-US", "fr-CA", "en-US", "und", "fr"];
		assert_eq!(
			normalize_all(values, normalize_bcp47),
			vec!["en_US", "fr_CA", "fr"]
		);
	}

	proptest! {
		/// Whatever normalisation produces is accepted by the registry grammar.
		#[test]
		fn output_always_parses(raw in "[a-zA-Z]{1,8}([-_][a-zA-Z0-9]{1,8}){0,3}(\\.[A-Za-z0-9-]{1,8})?") {
			if let Some(locale) = normalize_posix(&raw) {
				prop_assert!(LocaleTag::parse(&locale).is_ok());
			}
			if let Some(locale) = normalize_bcp47(&raw) {
				prop_assert!(LocaleTag::parse(&locale).is_ok());
			}
		}
	}
}
