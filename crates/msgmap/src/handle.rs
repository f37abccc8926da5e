// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The application-owned msgmap handle.

use msgmap_config::{LocaleSourceKind, MsgmapConfig};
use msgmap_core::{resolve, CandidateTable, PreferenceRegistry};
use msgmap_source::{
	install, EnvSource, Environment, LocaleSource, ProcessEnvironment, SystemSource,
};
use tracing::{debug, info, warn};

use crate::error::MsgmapResult;

/// Preferred locales plus the configuration they were derived from.
///
/// Create one at startup, call [`refresh`](Self::refresh) or one of the
/// `set_preferred_langs*` methods when the user's locale changes, and pass
/// it wherever translations are looked up. A `Msgmap` does no locking; wrap
/// it in a lock (or use [`msgmap_core::SharedRegistry`]) to share it between
/// threads that update it.
#[derive(Debug, Clone, Default)]
pub struct Msgmap {
	config: MsgmapConfig,
	registry: PreferenceRegistry,
}

impl Msgmap {
	/// A handle with default configuration and no preferences, so every
	/// lookup returns the table's default entry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a handle and populate its preferences from `config`.
	///
	/// If the configured source has nothing to offer the preferences stay
	/// empty and lookups fall back to default entries.
	pub fn from_config(config: MsgmapConfig) -> Self {
		Self::from_config_with_environment(config, ProcessEnvironment)
	}

	/// [`from_config`](Self::from_config) reading the locale variables from
	/// `environment` instead of the process environment.
	pub fn from_config_with_environment<E: Environment>(
		config: MsgmapConfig,
		environment: E,
	) -> Self {
		let mut msgmap = Self {
			config,
			registry: PreferenceRegistry::new(),
		};
		if let Err(e) = msgmap.refresh_with_environment(environment) {
			warn!(
				source = %msgmap.config.source,
				error = %e,
				"could not determine preferred languages, using table defaults"
			);
		}
		msgmap
	}

	/// Load configuration from all sources and build a handle from it.
	pub fn load() -> MsgmapResult<Self> {
		let config = msgmap_config::load_config()?;
		Ok(Self::from_config(config))
	}

	pub fn config(&self) -> &MsgmapConfig {
		&self.config
	}

	pub fn registry(&self) -> &PreferenceRegistry {
		&self.registry
	}

	/// Replace the preferred locales. On error nothing changes.
	pub fn set_preferred_langs<I, S>(&mut self, langs: I) -> MsgmapResult<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.registry.set(langs)?;
		Ok(())
	}

	/// Forget all preferred locales.
	pub fn clear_preferred_langs(&mut self) {
		self.registry.clear();
	}

	/// Replace the preferred locales with the operating system's.
	pub fn set_preferred_langs_from_system(&mut self) -> MsgmapResult<usize> {
		self.set_preferred_langs_from(&SystemSource::new())
	}

	/// Replace the preferred locales with whatever `source` reports.
	pub fn set_preferred_langs_from(&mut self, source: &dyn LocaleSource) -> MsgmapResult<usize> {
		Ok(install(&mut self.registry, source)?)
	}

	/// Re-read preferences from the configured source.
	///
	/// When the source fails the error is returned and the current
	/// preferences are kept.
	pub fn refresh(&mut self) -> MsgmapResult<usize> {
		self.refresh_with_environment(ProcessEnvironment)
	}

	/// [`refresh`](Self::refresh) reading the locale variables from
	/// `environment` instead of the process environment.
	pub fn refresh_with_environment<E: Environment>(
		&mut self,
		environment: E,
	) -> MsgmapResult<usize> {
		match self.config.source {
			LocaleSourceKind::Explicit => {
				self.registry.set_tags(self.config.preferred_langs.clone())?;
				info!(count = self.registry.len(), "installed configured preferred languages");
				Ok(self.registry.len())
			}
			LocaleSourceKind::Environment => {
				self.set_preferred_langs_from(&EnvSource::with_environment(environment))
			}
			LocaleSourceKind::System => self.set_preferred_langs_from_system(),
		}
	}

	/// The best entry of a prepared table.
	pub fn translations<'t, T>(&self, table: &'t CandidateTable<T>) -> &'t T {
		table.resolve(&self.registry)
	}

	/// The best entry of a raw `(locale, resource)` slice.
	pub fn translations_in<'t, S, T>(
		&self,
		entries: &'t [(S, T)],
		default_index: usize,
	) -> MsgmapResult<&'t T>
	where
		S: AsRef<str>,
	{
		Ok(resolve(&self.registry, entries, default_index)?)
	}

	/// Prepare a table whose default entry is the configured `default_lang`,
	/// or the first entry when that is unset or absent from the table.
	pub fn table<I, S, T>(&self, entries: I) -> MsgmapResult<CandidateTable<T>>
	where
		I: IntoIterator<Item = (S, T)>,
		S: AsRef<str>,
	{
		let mut table = CandidateTable::with_default_first(entries)?;
		if let Some(default_lang) = &self.config.default_lang {
			match table.position(default_lang) {
				Some(index) => table.set_default_index(index)?,
				None => debug!(
					default_lang = %default_lang,
					"table has no entry for the default language, using its first entry"
				),
			}
		}
		Ok(table)
	}
}
