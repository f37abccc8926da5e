// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::{LocaleSourceKind, MsgmapConfigLayer};

/// Comma separated list of preferred locales.
pub const ENV_PREFERRED_LANGS: &str = "MSGMAP_PREFERRED_LANGS";
/// Locale of the default table entry.
pub const ENV_DEFAULT_LANG: &str = "MSGMAP_DEFAULT_LANG";
/// One of `explicit`, `environment`, `system`.
pub const ENV_LOCALE_SOURCE: &str = "MSGMAP_LOCALE_SOURCE";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<MsgmapConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<MsgmapConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(MsgmapConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `$XDG_CONFIG_HOME/msgmap/config.toml` or the platform equivalent.
	pub fn user() -> Result<Self, ConfigError> {
		let dir = dirs::config_dir().ok_or(ConfigError::HomeDirNotFound)?;
		Ok(Self::new(dir.join("msgmap").join("config.toml")))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<MsgmapConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(MsgmapConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: MsgmapConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: MSGMAP_<FIELD>
#[derive(Debug, Default)]
pub struct EnvSource {
	overrides: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Read from the process environment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read from a fixed map instead of the process environment.
	pub fn from_vars(vars: HashMap<String, String>) -> Self {
		Self {
			overrides: Some(vars),
		}
	}

	fn var(&self, key: &str) -> Option<String> {
		let value = match &self.overrides {
			Some(vars) => vars.get(key).cloned(),
			None => std::env::var(key).ok(),
		};
		value.filter(|v| !v.trim().is_empty())
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<MsgmapConfigLayer, ConfigError> {
		debug!("loading environment variables");

		let preferred_langs = self
			.var(ENV_PREFERRED_LANGS)
			.map(|v| {
				v.split(',')
					.map(str::trim)
					.filter(|s| !s.is_empty())
					.map(str::to_string)
					.collect::<Vec<_>>()
			})
			.filter(|langs| !langs.is_empty());

		let source = self
			.var(ENV_LOCALE_SOURCE)
			.map(|v| v.parse::<LocaleSourceKind>())
			.transpose()?;

		Ok(MsgmapConfigLayer {
			preferred_langs,
			default_lang: self.var(ENV_DEFAULT_LANG).map(|v| v.trim().to_string()),
			source,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::io::Write;

	fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	#[test]
	fn test_env_source_reads_all_fields() {
		let source = EnvSource::from_vars(vars(&[
			(ENV_PREFERRED_LANGS, "fr_CA, en_US,,"),
			(ENV_DEFAULT_LANG, " en "),
			(ENV_LOCALE_SOURCE, "explicit"),
		]));
		let layer = source.load().unwrap();
		assert_eq!(
			layer.preferred_langs,
			Some(vec!["fr_CA".to_string(), "en_US".to_string()])
		);
		assert_eq!(layer.default_lang, Some("en".to_string()));
		assert_eq!(layer.source, Some(LocaleSourceKind::Explicit));
	}

	#[test]
	fn test_env_source_ignores_blank_values() {
		let source =
			EnvSource::from_vars(vars(&[(ENV_PREFERRED_LANGS, "  "), (ENV_DEFAULT_LANG, "")]));
		assert_eq!(source.load().unwrap(), MsgmapConfigLayer::default());

		let source = EnvSource::from_vars(vars(&[(ENV_PREFERRED_LANGS, ", ,")]));
		assert_eq!(source.load().unwrap(), MsgmapConfigLayer::default());
	}

	#[test]
	fn test_env_source_rejects_unknown_source() {
		let source = EnvSource::from_vars(vars(&[(ENV_LOCALE_SOURCE, "registry")]));
		assert!(matches!(
			source.load(),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn test_toml_source_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let source = TomlSource::new(dir.path().join("absent.toml"));
		assert_eq!(source.load().unwrap(), MsgmapConfigLayer::default());
	}

	#[test]
	fn test_toml_source_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"preferred_langs = [\"de_AT\", \"de\"]\ndefault_lang = \"en_US\"\nsource = \"explicit\""
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(
			layer.preferred_langs,
			Some(vec!["de_AT".to_string(), "de".to_string()])
		);
		assert_eq!(layer.default_lang, Some("en_US".to_string()));
		assert_eq!(layer.source, Some(LocaleSourceKind::Explicit));
	}

	#[test]
	fn test_toml_source_parse_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "source = \"nowhere\"").unwrap();

		let result = TomlSource::new(file.path()).load();
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	proptest! {
		/// Any list of valid locales set in the environment survives loading
		/// and validation in order.
		#[test]
		fn env_list_loads_in_order(
			langs in prop::collection::vec("[a-z]{1,8}(_[A-Z]{1,8})?", 1..6)
		) {
			let source = EnvSource::from_vars(HashMap::from([(
				ENV_PREFERRED_LANGS.to_string(),
				langs.join(" , "),
			)]));
			let config = source.load().unwrap().finalize().unwrap();
			let loaded: Vec<String> = config.preferred_langs.iter().map(|t| t.to_string()).collect();
			prop_assert_eq!(loaded, langs);
			prop_assert_eq!(config.source, LocaleSourceKind::Explicit);
		}
	}
}
