// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale sources for msgmap.
//!
//! A [`LocaleSource`] produces the user's preferred locales, most preferred
//! first, already in the `language[_REGION]` grammar the registry accepts.
//! The registry only ever sees that output; how it was obtained stays here.
//!
//! - [`StaticSource`]: a fixed list supplied by the application
//! - [`EnvSource`]: `LANGUAGE` / `LC_ALL` / `LC_MESSAGES` / `LANG`, as gettext reads them
//! - [`SystemSource`]: the operating system's preferred UI languages
//! - [`ChainSource`]: the first of several sources that has an answer

mod env;
mod error;
mod normalize;
mod system;

pub use env::{EnvSource, Environment, ProcessEnvironment, LANGUAGE_VAR, LOCALE_VARS};
pub use error::SourceError;
pub use normalize::{normalize_all, normalize_bcp47, normalize_posix};
pub use system::SystemSource;

use msgmap_core::{PreferenceRegistry, SharedRegistry};
use tracing::{debug, info};

/// Something that can report the user's preferred locales.
pub trait LocaleSource: Send + Sync {
	/// Short name used in logs and errors.
	fn name(&self) -> &'static str;

	/// Preferred locales, most preferred first.
	fn retrieve(&self) -> Result<Vec<String>, SourceError>;
}

impl<S: LocaleSource + ?Sized> LocaleSource for Box<S> {
	fn name(&self) -> &'static str {
		(**self).name()
	}

	fn retrieve(&self) -> Result<Vec<String>, SourceError> {
		(**self).retrieve()
	}
}

/// Retrieve from `source` and install the result into `registry`.
///
/// On any failure the registry keeps its previous contents. Returns the
/// number of locales installed.
pub fn install(
	registry: &mut PreferenceRegistry,
	source: &dyn LocaleSource,
) -> Result<usize, SourceError> {
	let locales = retrieve_non_empty(source)?;
	registry.set(&locales)?;
	info!(source = source.name(), locales = ?locales, "installed preferred languages");
	Ok(locales.len())
}

/// [`install`] for a [`SharedRegistry`].
pub fn install_shared(
	registry: &SharedRegistry,
	source: &dyn LocaleSource,
) -> Result<usize, SourceError> {
	let locales = retrieve_non_empty(source)?;
	registry.set(&locales)?;
	info!(source = source.name(), locales = ?locales, "installed preferred languages");
	Ok(locales.len())
}

fn retrieve_non_empty(source: &dyn LocaleSource) -> Result<Vec<String>, SourceError> {
	debug!(source = source.name(), "retrieving preferred languages");
	let locales = source.retrieve()?;
	if locales.is_empty() {
		return Err(SourceError::NoLocales(source.name()));
	}
	Ok(locales)
}

/// A fixed list of locales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
	locales: Vec<String>,
}

impl StaticSource {
	pub fn new<I, S>(locales: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			locales: locales.into_iter().map(Into::into).collect(),
		}
	}
}

impl LocaleSource for StaticSource {
	fn name(&self) -> &'static str {
		"static"
	}

	fn retrieve(&self) -> Result<Vec<String>, SourceError> {
		if self.locales.is_empty() {
			return Err(SourceError::NoLocales(self.name()));
		}
		Ok(self.locales.clone())
	}
}

/// Tries each source in turn and returns the first non-empty answer.
#[derive(Default)]
pub struct ChainSource {
	sources: Vec<Box<dyn LocaleSource>>,
}

impl ChainSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// The operating system first, then the environment.
	pub fn platform_default() -> Self {
		Self::new()
			.with(SystemSource::new())
			.with(EnvSource::new())
	}

	pub fn with(mut self, source: impl LocaleSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn push(&mut self, source: Box<dyn LocaleSource>) {
		self.sources.push(source);
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}

impl std::fmt::Debug for ChainSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChainSource")
			.field(
				"sources",
				&self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
			)
			.finish()
	}
}

impl LocaleSource for ChainSource {
	fn name(&self) -> &'static str {
		"chain"
	}

	fn retrieve(&self) -> Result<Vec<String>, SourceError> {
		let mut last_error = SourceError::NoLocales(self.name());
		for source in &self.sources {
			match source.retrieve() {
				Ok(locales) if !locales.is_empty() => {
					debug!(source = source.name(), "locale source answered");
					return Ok(locales);
				}
				Ok(_) => {
					debug!(source = source.name(), "locale source returned nothing");
					last_error = SourceError::NoLocales(source.name());
				}
				Err(e) => {
					debug!(source = source.name(), error = %e, "locale source failed");
					last_error = e;
				}
			}
		}
		Err(last_error)
	}
}
