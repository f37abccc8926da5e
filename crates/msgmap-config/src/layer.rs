// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer and its resolved form.

use std::fmt;
use std::str::FromStr;

use msgmap_core::LocaleTag;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Where preferred locales come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleSourceKind {
	/// The `preferred_langs` list from configuration.
	Explicit,
	/// `LANGUAGE` / `LC_ALL` / `LC_MESSAGES` / `LANG`.
	Environment,
	/// The operating system's preferred UI languages.
	#[default]
	System,
}

impl fmt::Display for LocaleSourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LocaleSourceKind::Explicit => write!(f, "explicit"),
			LocaleSourceKind::Environment => write!(f, "environment"),
			LocaleSourceKind::System => write!(f, "system"),
		}
	}
}

impl FromStr for LocaleSourceKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"explicit" => Ok(LocaleSourceKind::Explicit),
			"environment" | "env" => Ok(LocaleSourceKind::Environment),
			"system" => Ok(LocaleSourceKind::System),
			_ => Err(ConfigError::invalid_value(
				"source",
				format!("unknown locale source '{s}', expected explicit, environment or system"),
			)),
		}
	}
}

/// One layer of configuration. Every field is optional so layers can be
/// merged, later layers overriding earlier ones field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MsgmapConfigLayer {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preferred_langs: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_lang: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<LocaleSourceKind>,
}

impl MsgmapConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.preferred_langs.is_some() {
			self.preferred_langs = other.preferred_langs;
		}
		if other.default_lang.is_some() {
			self.default_lang = other.default_lang;
		}
		if other.source.is_some() {
			self.source = other.source;
		}
	}

	/// Validate every value and produce the resolved configuration.
	pub fn finalize(self) -> Result<MsgmapConfig, ConfigError> {
		let default_lang = self
			.default_lang
			.as_deref()
			.map(LocaleTag::parse)
			.transpose()
			.map_err(|e| ConfigError::locale("default_lang", e))?;

		let preferred_langs = match self.preferred_langs {
			Some(langs) if langs.is_empty() => {
				return Err(ConfigError::invalid_value(
					"preferred_langs",
					"list must not be empty",
				));
			}
			Some(langs) => langs
				.iter()
				.map(|l| LocaleTag::parse(l).map_err(|e| ConfigError::locale("preferred_langs", e)))
				.collect::<Result<Vec<_>, _>>()?,
			None => Vec::new(),
		};

		let source = match self.source {
			Some(source) => source,
			None if !preferred_langs.is_empty() => LocaleSourceKind::Explicit,
			None => LocaleSourceKind::default(),
		};

		if source == LocaleSourceKind::Explicit && preferred_langs.is_empty() {
			return Err(ConfigError::invalid_value(
				"source",
				"explicit source requires preferred_langs",
			));
		}
		if source != LocaleSourceKind::Explicit && !preferred_langs.is_empty() {
			warn!(
				source = %source,
				preferred_langs = preferred_langs.len(),
				"preferred_langs is ignored unless source is explicit"
			);
		}

		Ok(MsgmapConfig {
			preferred_langs,
			default_lang,
			source,
		})
	}
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgmapConfig {
	/// Explicit preferences; empty unless configured.
	pub preferred_langs: Vec<LocaleTag>,
	/// Locale whose table entry serves as the default. When unset, or when a
	/// table has no entry for it, the table's first entry is the default.
	pub default_lang: Option<LocaleTag>,
	pub source: LocaleSourceKind,
}
