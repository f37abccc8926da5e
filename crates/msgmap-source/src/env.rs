// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! gettext-style locale retrieval from environment variables.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SourceError;
use crate::normalize::{normalize_all, normalize_posix};
use crate::LocaleSource;

/// Variables consulted, in order, for the message locale.
pub const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// Colon separated priority list honoured by GNU gettext.
pub const LANGUAGE_VAR: &str = "LANGUAGE";

/// Read-only access to environment variables.
pub trait Environment: Send + Sync {
	fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
	fn var(&self, key: &str) -> Option<String> {
		std::env::var(key).ok()
	}
}

impl Environment for HashMap<String, String> {
	fn var(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Retrieves preferred locales the way GNU gettext chooses message catalogs.
///
/// The first non-empty of `LC_ALL`, `LC_MESSAGES` and `LANG` names the
/// message locale. When it is `C` or `POSIX` there is no preference at all.
/// Otherwise the entries of `LANGUAGE` come first, followed by the message
/// locale itself.
#[derive(Debug, Default, Clone)]
pub struct EnvSource<E = ProcessEnvironment> {
	env: E,
}

impl EnvSource<ProcessEnvironment> {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<E: Environment> EnvSource<E> {
	pub fn with_environment(env: E) -> Self {
		Self { env }
	}

	fn non_empty(&self, key: &str) -> Option<String> {
		self.env.var(key).filter(|v| !v.trim().is_empty())
	}
}

impl<E: Environment> LocaleSource for EnvSource<E> {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn retrieve(&self) -> Result<Vec<String>, SourceError> {
		let Some((var, locale)) = LOCALE_VARS
			.iter()
			.find_map(|var| self.non_empty(var).map(|value| (*var, value)))
		else {
			debug!("no locale environment variables set");
			return Err(SourceError::Unavailable(self.name()));
		};

		let Some(primary) = normalize_posix(&locale) else {
			debug!(var, locale = %locale, "message locale is neutral or unparseable");
			return Err(SourceError::NoLocales(self.name()));
		};

		let mut raw: Vec<String> = self
			.non_empty(LANGUAGE_VAR)
			.map(|list| list.split(':').map(str::to_string).collect())
			.unwrap_or_default();
		raw.push(primary);

		let locales = normalize_all(&raw, normalize_posix);
		debug!(var, count = locales.len(), "retrieved locales from environment");
		Ok(locales)
	}
}
