// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Choosing a translation table for the registered preferences.
//!
//! For each preferred locale, in order, the candidate table is scanned once.
//! An entry agreeing on language and region (or with neither side having a
//! region) is returned immediately. Otherwise the first entry agreeing on
//! language alone is returned before the next preference is considered, so
//! a language match for an earlier preference beats an exact match for a
//! later one. When nothing matches, the default entry is returned.

use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::locale::LocaleTag;
use crate::registry::{PreferenceRegistry, SharedRegistry};

/// Why an entry was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
	/// Language and region agree with a preferred locale.
	Exact,
	/// Only the language agrees with a preferred locale.
	Language,
	/// No preferred locale matched; the designated default was used.
	Default,
}

/// The entry picked by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
	/// Position of the chosen entry in the candidate table.
	pub index: usize,
	pub kind: MatchKind,
}

/// Resolve `entries` against `registry`, returning the chosen resource.
///
/// `entries` pairs locale strings with resources; table order is significant
/// and ties go to the earlier entry. Entries whose locale cannot be parsed
/// are never matched (they can still be the default).
///
/// ```
/// use msgmap_core::{resolve, PreferenceRegistry};
///
/// let registry = PreferenceRegistry::with_langs(["fr_CA", "en_US"]).unwrap();
/// let table = [("en_US", "hello"), ("fr", "bonjour")];
///
/// assert_eq!(resolve(&registry, &table, 0).unwrap(), &"bonjour");
/// ```
pub fn resolve<'t, S, T>(
	registry: &PreferenceRegistry,
	entries: &'t [(S, T)],
	default_index: usize,
) -> Result<&'t T, ResolveError>
where
	S: AsRef<str>,
{
	let resolution = resolve_match(registry, entries, default_index)?;
	Ok(&entries[resolution.index].1)
}

/// Like [`resolve`] but reports which entry was chosen and why.
pub fn resolve_match<S, T>(
	registry: &PreferenceRegistry,
	entries: &[(S, T)],
	default_index: usize,
) -> Result<Resolution, ResolveError>
where
	S: AsRef<str>,
{
	check_default(entries.len(), default_index)?;

	let tags: Vec<Option<LocaleTag>> = entries
		.iter()
		.map(|(raw, _)| parse_entry_tag(raw.as_ref()))
		.collect();

	Ok(select(registry, || tags.iter().map(Option::as_ref), default_index))
}

fn check_default(len: usize, default_index: usize) -> Result<(), ResolveError> {
	if len == 0 {
		return Err(ResolveError::EmptyTable);
	}
	if default_index >= len {
		return Err(ResolveError::DefaultIndexOutOfRange {
			index: default_index,
			len,
		});
	}
	Ok(())
}

fn parse_entry_tag(raw: &str) -> Option<LocaleTag> {
	match LocaleTag::parse_table_tag(raw) {
		Ok(tag) => Some(tag),
		Err(e) => {
			debug!(tag = raw, error = %e, "candidate table entry has an unparseable locale, it will never match");
			None
		}
	}
}

fn select<'a, F, I>(registry: &PreferenceRegistry, tags: F, default_index: usize) -> Resolution
where
	F: Fn() -> I,
	I: Iterator<Item = Option<&'a LocaleTag>>,
{
	let resolution = find_match(registry, tags).unwrap_or(Resolution {
		index: default_index,
		kind: MatchKind::Default,
	});
	trace!(
		index = resolution.index,
		kind = ?resolution.kind,
		generation = registry.generation(),
		"resolved translation table"
	);
	resolution
}

fn find_match<'a, F, I>(registry: &PreferenceRegistry, tags: F) -> Option<Resolution>
where
	F: Fn() -> I,
	I: Iterator<Item = Option<&'a LocaleTag>>,
{
	for preferred in registry {
		let mut language_match = None;

		for (index, tag) in tags().enumerate() {
			let Some(tag) = tag else {
				continue;
			};
			if !tag.same_language(preferred) {
				continue;
			}
			if tag.matches_exactly(preferred) {
				return Some(Resolution {
					index,
					kind: MatchKind::Exact,
				});
			}
			language_match.get_or_insert(index);
		}

		if let Some(index) = language_match {
			return Some(Resolution {
				index,
				kind: MatchKind::Language,
			});
		}
	}

	None
}

/// One entry of a [`CandidateTable`].
#[derive(Debug, Clone)]
pub struct CandidateEntry<T> {
	tag: Option<LocaleTag>,
	resource: T,
}

impl<T> CandidateEntry<T> {
	/// The parsed locale, or `None` when the source string was malformed.
	pub fn tag(&self) -> Option<&LocaleTag> {
		self.tag.as_ref()
	}

	pub fn resource(&self) -> &T {
		&self.resource
	}
}

/// A candidate table whose locales are parsed once and whose default entry
/// has been checked up front, so resolving it cannot fail.
#[derive(Debug, Clone)]
pub struct CandidateTable<T> {
	entries: Vec<CandidateEntry<T>>,
	default_index: usize,
}

impl<T> CandidateTable<T> {
	/// Build a table with an explicit default position.
	pub fn new<I, S>(entries: I, default_index: usize) -> Result<Self, ResolveError>
	where
		I: IntoIterator<Item = (S, T)>,
		S: AsRef<str>,
	{
		let entries = parse_entries(entries);
		check_default(entries.len(), default_index)?;
		Ok(Self {
			entries,
			default_index,
		})
	}

	/// Build a table whose first entry is the default.
	pub fn with_default_first<I, S>(entries: I) -> Result<Self, ResolveError>
	where
		I: IntoIterator<Item = (S, T)>,
		S: AsRef<str>,
	{
		Self::new(entries, 0)
	}

	/// Build a table whose default is the first entry exactly matching
	/// `default_locale`.
	pub fn with_default_locale<I, S>(
		entries: I,
		default_locale: &LocaleTag,
	) -> Result<Self, ResolveError>
	where
		I: IntoIterator<Item = (S, T)>,
		S: AsRef<str>,
	{
		let mut table = Self::with_default_first(entries)?;
		let index = table
			.position(default_locale)
			.ok_or_else(|| ResolveError::DefaultLocaleMissing(default_locale.to_string()))?;
		table.set_default_index(index)?;
		Ok(table)
	}

	/// Position of the first entry exactly matching `locale`.
	pub fn position(&self, locale: &LocaleTag) -> Option<usize> {
		self.entries
			.iter()
			.position(|e| e.tag.as_ref().is_some_and(|t| t.matches_exactly(locale)))
	}

	/// Designate a different entry as the default.
	pub fn set_default_index(&mut self, index: usize) -> Result<(), ResolveError> {
		check_default(self.entries.len(), index)?;
		self.default_index = index;
		Ok(())
	}

	/// The resource best matching `registry`.
	pub fn resolve(&self, registry: &PreferenceRegistry) -> &T {
		&self.entries[self.resolve_match(registry).index].resource
	}

	pub fn resolve_match(&self, registry: &PreferenceRegistry) -> Resolution {
		select(
			registry,
			|| self.entries.iter().map(|e| e.tag.as_ref()),
			self.default_index,
		)
	}

	/// Resolve against a [`SharedRegistry`], holding its read lock only for
	/// the duration of the match.
	pub fn resolve_shared(&self, registry: &SharedRegistry) -> &T {
		let resolution = registry.read(|r| self.resolve_match(r));
		&self.entries[resolution.index].resource
	}

	pub fn default_index(&self) -> usize {
		self.default_index
	}

	pub fn default_resource(&self) -> &T {
		&self.entries[self.default_index].resource
	}

	pub fn get(&self, index: usize) -> Option<&CandidateEntry<T>> {
		self.entries.get(index)
	}

	pub fn entries(&self) -> &[CandidateEntry<T>] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false; construction rejects empty tables.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

fn parse_entries<I, S, T>(entries: I) -> Vec<CandidateEntry<T>>
where
	I: IntoIterator<Item = (S, T)>,
	S: AsRef<str>,
{
	entries
		.into_iter()
		.map(|(raw, resource)| CandidateEntry {
			tag: parse_entry_tag(raw.as_ref()),
			resource,
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn registry(langs: &[&str]) -> PreferenceRegistry {
		PreferenceRegistry::with_langs(langs).unwrap()
	}

	#[test]
	fn test_exact_match_wins() {
		let table = [("en_US", "A"), ("en_GB", "B"), ("en", "C")];
		let r = registry(&["en_US"]);
		assert_eq!(resolve(&r, &table, 2).unwrap(), &"A");
		assert_eq!(
			resolve_match(&r, &table, 2).unwrap(),
			Resolution {
				index: 0,
				kind: MatchKind::Exact
			}
		);
	}

	#[test]
	fn test_exact_match_later_in_table() {
		let table = [("en", "C"), ("en_GB", "B"), ("en_US", "A")];
		assert_eq!(resolve(&registry(&["en_US"]), &table, 0).unwrap(), &"A");
	}

	#[test]
	fn test_regionless_preference_matches_regionless_entry() {
		let table = [("en_US", "A"), ("en", "C")];
		let resolution = resolve_match(&registry(&["en"]), &table, 0).unwrap();
		assert_eq!(resolution.index, 1);
		assert_eq!(resolution.kind, MatchKind::Exact);
	}

	#[test]
	fn test_language_fallback() {
		let table = [("en_US", "A"), ("fr", "B")];
		let resolution = resolve_match(&registry(&["en_CA"]), &table, 1).unwrap();
		assert_eq!(resolution.index, 0);
		assert_eq!(resolution.kind, MatchKind::Language);
	}

	#[test]
	fn test_language_fallback_takes_first_in_table_order() {
		let table = [("pt_PT", "A"), ("pt_BR", "B"), ("pt", "C")];
		assert_eq!(resolve(&registry(&["pt_AO"]), &table, 2).unwrap(), &"A");
	}

	#[test]
	fn test_preference_order_dominates_match_quality() {
		let table = [("fr", "B"), ("en_US", "A")];
		let resolution = resolve_match(&registry(&["fr_FR", "en_US"]), &table, 1).unwrap();
		assert_eq!(resolution.index, 0);
		assert_eq!(resolution.kind, MatchKind::Language);
	}

	#[test]
	fn test_falls_through_to_later_preference() {
		let table = [("en_US", "A"), ("fr", "B")];
		assert_eq!(resolve(&registry(&["de_DE", "fr_CA"]), &table, 0).unwrap(), &"B");
	}

	#[test]
	fn test_no_match_returns_default() {
		let table = [("en_US", "A"), ("fr", "B")];
		let resolution = resolve_match(&registry(&["de_DE"]), &table, 0).unwrap();
		assert_eq!(
			resolution,
			Resolution {
				index: 0,
				kind: MatchKind::Default
			}
		);
		assert_eq!(resolve(&registry(&["de_DE"]), &table, 1).unwrap(), &"B");
	}

	#[test]
	fn test_empty_registry_returns_default() {
		let table = [("en_US", "A"), ("fr", "B")];
		let empty = PreferenceRegistry::new();
		assert_eq!(resolve(&empty, &table, 1).unwrap(), &"B");
	}

	#[test]
	fn test_table_case_is_ignored() {
		let table = [("fr", "B"), ("EN_us", "A")];
		let resolution = resolve_match(&registry(&["en_US"]), &table, 0).unwrap();
		assert_eq!(resolution.index, 1);
		assert_eq!(resolution.kind, MatchKind::Exact);
	}

	#[test]
	fn test_malformed_table_entries_never_match() {
		let table = [("en-US", "X"), ("", "Y"), ("en_US", "A")];
		assert_eq!(resolve(&registry(&["en_US"]), &table, 0).unwrap(), &"A");
		// ...but may still serve as the default.
		assert_eq!(resolve(&registry(&["ja"]), &table, 1).unwrap(), &"Y");
	}

	#[test]
	fn test_contract_violations() {
		let empty: [(&str, &str); 0] = [];
		assert_eq!(
			resolve(&registry(&["en"]), &empty, 0),
			Err(ResolveError::EmptyTable)
		);

		let table = [("en", "A")];
		assert_eq!(
			resolve(&registry(&["en"]), &table, 1),
			Err(ResolveError::DefaultIndexOutOfRange { index: 1, len: 1 })
		);
	}

	#[test]
	fn test_candidate_table_resolves_like_slices() {
		let table = CandidateTable::new([("en_US", 1), ("en_GB", 2), ("fr", 3)], 0).unwrap();
		assert_eq!(table.len(), 3);
		assert_eq!(*table.resolve(&registry(&["en_GB"])), 2);
		assert_eq!(*table.resolve(&registry(&["fr_BE"])), 3);
		assert_eq!(*table.resolve(&registry(&["es"])), 1);
		assert_eq!(table.get(2).unwrap().tag().unwrap().to_string(), "fr");
	}

	#[test]
	fn test_candidate_table_default_first() {
		let table = CandidateTable::with_default_first([("de", "Hallo"), ("en", "Hello")]).unwrap();
		assert_eq!(table.default_index(), 0);
		assert_eq!(*table.default_resource(), "Hallo");
		assert_eq!(*table.resolve(&PreferenceRegistry::new()), "Hallo");
	}

	#[test]
	fn test_candidate_table_default_locale() {
		let en_us = LocaleTag::parse("en_US").unwrap();
		let table =
			CandidateTable::with_default_locale([("fr", "B"), ("en_us", "A"), ("en", "C")], &en_us)
				.unwrap();
		assert_eq!(table.default_index(), 1);
		assert_eq!(*table.resolve(&registry(&["ko"])), "A");

		let missing = CandidateTable::with_default_locale([("fr", "B")], &en_us);
		assert_eq!(
			missing.unwrap_err(),
			ResolveError::DefaultLocaleMissing("en_US".to_string())
		);
	}

	#[test]
	fn test_candidate_table_position_and_default() {
		let mut table = CandidateTable::with_default_first([("en", 'a'), ("DE_at", 'b')]).unwrap();
		let de_at = LocaleTag::parse("de_AT").unwrap();
		assert_eq!(table.position(&de_at), Some(1));
		assert_eq!(table.position(&LocaleTag::parse("de").unwrap()), None);

		table.set_default_index(1).unwrap();
		assert_eq!(*table.default_resource(), 'b');
		assert!(table.set_default_index(2).is_err());
		assert_eq!(table.default_index(), 1);
	}

	#[test]
	fn test_candidate_table_rejects_bad_construction() {
		let empty: Vec<(&str, u8)> = Vec::new();
		assert_eq!(
			CandidateTable::with_default_first(empty).unwrap_err(),
			ResolveError::EmptyTable
		);
		assert!(matches!(
			CandidateTable::new([("en", 1)], 3),
			Err(ResolveError::DefaultIndexOutOfRange { index: 3, len: 1 })
		));
	}

	#[test]
	fn test_candidate_table_shared_registry() {
		let shared = SharedRegistry::new();
		let table = CandidateTable::with_default_first([("en", "A"), ("sv", "B")]).unwrap();
		assert_eq!(*table.resolve_shared(&shared), "A");
		shared.set(["sv_SE"]).unwrap();
		assert_eq!(*table.resolve_shared(&shared), "B");
	}

	proptest! {
		/// Resolution is deterministic and always lands inside the table.
		#[test]
		fn resolve_is_idempotent_and_in_range(
			prefs in prop::collection::vec("[a-c]{1,2}(_[A-C]{1,2})?", 0..5),
			tags in prop::collection::vec("[a-cA-C]{1,2}(_[a-cA-C]{1,2})?", 1..8),
			default_pick in any::<prop::sample::Index>(),
		) {
			let mut registry = PreferenceRegistry::new();
			if !prefs.is_empty() {
				registry.set(&prefs).unwrap();
			}
			let table: Vec<(String, usize)> = tags.into_iter().enumerate().map(|(i, t)| (t, i)).collect();
			let default_index = default_pick.index(table.len());

			let first = resolve_match(&registry, &table, default_index).unwrap();
			let second = resolve_match(&registry, &table, default_index).unwrap();
			prop_assert_eq!(first, second);
			prop_assert!(first.index < table.len());
			if registry.is_empty() {
				prop_assert_eq!(first.kind, MatchKind::Default);
				prop_assert_eq!(first.index, default_index);
			}
		}
	}
}
