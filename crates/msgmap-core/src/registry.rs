// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The ordered list of preferred locales.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::RegistryError;
use crate::locale::LocaleTag;

/// User-preferred locales, most preferred first.
///
/// The registry is an ordinary owned value: construct one at startup, update
/// it when the user's locale settings change and pass it to the resolver.
/// It performs no internal locking. Callers sharing one across threads must
/// serialise [`set`](Self::set)/[`clear`](Self::clear) against resolution
/// themselves, or use [`SharedRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceRegistry {
	tags: Vec<LocaleTag>,
	generation: u64,
}

impl PreferenceRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry already holding `langs`.
	pub fn with_langs<I, S>(langs: I) -> Result<Self, RegistryError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut registry = Self::new();
		registry.set(langs)?;
		Ok(registry)
	}

	/// Replace the preferred locales.
	///
	/// Every entry is validated before anything is stored. If any entry is
	/// malformed, or the list is empty, an error naming the first bad entry is
	/// returned and the registry keeps its previous contents.
	pub fn set<I, S>(&mut self, langs: I) -> Result<(), RegistryError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let staged = validate_all(langs)?;
		self.install(staged);
		Ok(())
	}

	/// Replace the preferred locales with tags that are already validated.
	pub fn set_tags(&mut self, tags: Vec<LocaleTag>) -> Result<(), RegistryError> {
		if tags.is_empty() {
			return Err(RegistryError::EmptyList);
		}
		self.install(tags);
		Ok(())
	}

	fn install(&mut self, tags: Vec<LocaleTag>) {
		self.tags = tags;
		self.generation += 1;
		debug!(
			count = self.tags.len(),
			generation = self.generation,
			"preferred languages updated"
		);
	}

	/// Remove all preferred locales. Always succeeds.
	pub fn clear(&mut self) {
		if !self.tags.is_empty() {
			self.tags = Vec::new();
			self.generation += 1;
			debug!(generation = self.generation, "preferred languages cleared");
		}
	}

	/// The current preferences, most preferred first.
	pub fn tags(&self) -> &[LocaleTag] {
		&self.tags
	}

	pub fn iter(&self) -> std::slice::Iter<'_, LocaleTag> {
		self.tags.iter()
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	/// Incremented by every successful `set` and every `clear` that removed
	/// something. Lets callers cache resolutions per generation.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

impl<'a> IntoIterator for &'a PreferenceRegistry {
	type Item = &'a LocaleTag;
	type IntoIter = std::slice::Iter<'a, LocaleTag>;

	fn into_iter(self) -> Self::IntoIter {
		self.tags.iter()
	}
}

fn validate_all<I, S>(langs: I) -> Result<Vec<LocaleTag>, RegistryError>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut staged = Vec::new();
	for (index, raw) in langs.into_iter().enumerate() {
		let raw = raw.as_ref();
		let tag = LocaleTag::parse(raw).map_err(|source| {
			debug!(index, tag = raw, error = %source, "rejected preferred language list");
			RegistryError::InvalidEntry {
				index,
				tag: raw.to_string(),
				source,
			}
		})?;
		staged.push(tag);
	}

	if staged.is_empty() {
		debug!("rejected empty preferred language list");
		return Err(RegistryError::EmptyList);
	}

	Ok(staged)
}

/// A [`PreferenceRegistry`] behind a reader/writer lock.
///
/// Cloning yields another handle to the same registry. Updates take the
/// write lock and resolution takes the read lock, so a reader always sees
/// one complete generation.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
	inner: Arc<RwLock<PreferenceRegistry>>,
}

impl SharedRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_registry(registry: PreferenceRegistry) -> Self {
		Self {
			inner: Arc::new(RwLock::new(registry)),
		}
	}

	/// See [`PreferenceRegistry::set`].
	pub fn set<I, S>(&self, langs: I) -> Result<(), RegistryError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		// Validate before taking the lock so readers are not held up by parsing.
		let staged = validate_all(langs)?;
		self.inner.write().install(staged);
		Ok(())
	}

	pub fn clear(&self) {
		self.inner.write().clear();
	}

	/// Run `f` against the current generation while holding the read lock.
	pub fn read<R>(&self, f: impl FnOnce(&PreferenceRegistry) -> R) -> R {
		f(&self.inner.read())
	}

	/// A copy of the current generation.
	pub fn snapshot(&self) -> PreferenceRegistry {
		self.inner.read().clone()
	}

	pub fn generation(&self) -> u64 {
		self.inner.read().generation()
	}
}
