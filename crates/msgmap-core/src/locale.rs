// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validated `language[_REGION]` locale tags.

use std::fmt;
use std::str::FromStr;

use crate::error::{LocaleError, Segment};

/// Maximum length in bytes of either the language or the region segment.
pub const MAX_SEGMENT_LEN: usize = 63;

/// Separator between the language and region segments.
pub const REGION_SEPARATOR: char = '_';

/// A parsed locale such as `en` or `en_US`.
///
/// The language is always lowercase ASCII letters and the region, when
/// present, uppercase ASCII letters. A `LocaleTag` cannot exist in any other
/// shape: every constructor validates its input and fails instead of
/// producing a partially filled value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(try_from = "String", into = "String")
)]
pub struct LocaleTag {
	language: String,
	region: Option<String>,
}

#[derive(Clone, Copy)]
enum CaseRule {
	/// Language must already be lowercase and region uppercase.
	Strict,
	/// Any ASCII letter is accepted and folded to canonical case.
	Fold,
}

impl LocaleTag {
	/// Parse a preference string using the strict grammar.
	///
	/// ```
	/// use msgmap_core::LocaleTag;
	///
	/// let tag = LocaleTag::parse("en_US").unwrap();
	/// assert_eq!(tag.language(), "en");
	/// assert_eq!(tag.region(), Some("US"));
	///
	/// assert!(LocaleTag::parse("en_us").is_err());
	/// assert!(LocaleTag::parse("").is_err());
	/// ```
	pub fn parse(raw: &str) -> Result<Self, LocaleError> {
		Self::parse_with(raw, CaseRule::Strict)
	}

	/// Parse a candidate table tag.
	///
	/// Tables and platform retrieval may disagree on case, so letters of
	/// either case are accepted here and canonicalised. Everything else
	/// (separator, character class, length caps) matches [`LocaleTag::parse`].
	pub fn parse_table_tag(raw: &str) -> Result<Self, LocaleError> {
		Self::parse_with(raw, CaseRule::Fold)
	}

	/// Build a tag from already separated segments, validated strictly.
	pub fn new(language: &str, region: Option<&str>) -> Result<Self, LocaleError> {
		let language = validate_segment(language, Segment::Language, CaseRule::Strict)?;
		let region = region
			.map(|r| validate_segment(r, Segment::Region, CaseRule::Strict))
			.transpose()?;
		Ok(Self { language, region })
	}

	fn parse_with(raw: &str, rule: CaseRule) -> Result<Self, LocaleError> {
		if raw.is_empty() {
			return Err(LocaleError::Empty);
		}

		let (language, region) = match raw.split_once(REGION_SEPARATOR) {
			Some((language, region)) => (language, Some(region)),
			None => (raw, None),
		};

		let language = validate_segment(language, Segment::Language, rule)?;
		let region = region
			.map(|r| validate_segment(r, Segment::Region, rule))
			.transpose()?;

		Ok(Self { language, region })
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn region(&self) -> Option<&str> {
		self.region.as_deref()
	}

	pub fn has_region(&self) -> bool {
		self.region.is_some()
	}

	/// The same language with the region dropped.
	pub fn language_only(&self) -> Self {
		Self {
			language: self.language.clone(),
			region: None,
		}
	}

	/// True when both tags name the same language, regardless of region.
	pub fn same_language(&self, other: &LocaleTag) -> bool {
		self.language == other.language
	}

	/// True when language and region agree, or both tags lack a region.
	pub fn matches_exactly(&self, other: &LocaleTag) -> bool {
		self.same_language(other) && self.region == other.region
	}
}

fn validate_segment(segment: &str, kind: Segment, rule: CaseRule) -> Result<String, LocaleError> {
	if segment.is_empty() {
		return Err(match kind {
			Segment::Language => LocaleError::EmptyLanguage,
			Segment::Region => LocaleError::EmptyRegion,
		});
	}

	if segment.len() > MAX_SEGMENT_LEN {
		return Err(LocaleError::TooLong {
			segment: kind,
			len: segment.len(),
			max: MAX_SEGMENT_LEN,
		});
	}

	let valid = match (rule, kind) {
		(CaseRule::Strict, Segment::Language) => segment.bytes().all(|b| b.is_ascii_lowercase()),
		(CaseRule::Strict, Segment::Region) => segment.bytes().all(|b| b.is_ascii_uppercase()),
		(CaseRule::Fold, _) => segment.bytes().all(|b| b.is_ascii_alphabetic()),
	};

	if !valid {
		return Err(match kind {
			Segment::Language => LocaleError::InvalidLanguage(segment.to_string()),
			Segment::Region => LocaleError::InvalidRegion(segment.to_string()),
		});
	}

	Ok(match kind {
		Segment::Language => segment.to_ascii_lowercase(),
		Segment::Region => segment.to_ascii_uppercase(),
	})
}

impl fmt::Display for LocaleTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.region {
			Some(region) => write!(f, "{}{}{}", self.language, REGION_SEPARATOR, region),
			None => f.write_str(&self.language),
		}
	}
}

impl FromStr for LocaleTag {
	type Err = LocaleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<&str> for LocaleTag {
	type Error = LocaleError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::parse(value)
	}
}

impl TryFrom<String> for LocaleTag {
	type Error = LocaleError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<LocaleTag> for String {
	fn from(tag: LocaleTag) -> Self {
		tag.to_string()
	}
}
