// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for msgmap.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validation of every configured locale at load time
//! - Consistent environment variable naming (`MSGMAP_*`)
//!
//! # Usage
//!
//! ```ignore
//! use msgmap_config::load_config;
//!
//! let config = load_config()?;
//! println!("locale source: {}", config.source);
//! ```

pub mod error;
pub mod layer;
pub mod sources;

pub use error::ConfigError;
pub use layer::{LocaleSourceKind, MsgmapConfig, MsgmapConfigLayer};
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, ENV_DEFAULT_LANG,
	ENV_LOCALE_SOURCE, ENV_PREFERRED_LANGS,
};

use tracing::{debug, info};

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`MSGMAP_*`)
/// 2. User config file (`$XDG_CONFIG_HOME/msgmap/config.toml`), when a config
///    directory can be determined
/// 3. Built-in defaults
pub fn load_config() -> Result<MsgmapConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];
	match TomlSource::user() {
		Ok(user) => sources.push(Box::new(user)),
		Err(e) => debug!(error = %e, "no user config file location"),
	}
	sources.push(Box::new(EnvSource::new()));

	load_from_sources(sources)
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<MsgmapConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> =
		vec![Box::new(DefaultsSource), Box::new(EnvSource::new())];
	load_from_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<MsgmapConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	];
	load_from_sources(sources)
}

/// Merge the given sources by precedence and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<MsgmapConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = MsgmapConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	let config = merged.finalize()?;
	info!(
		source = %config.source,
		preferred_langs = config.preferred_langs.len(),
		default_lang = ?config.default_lang.as_ref().map(|t| t.to_string()),
		"msgmap configuration loaded"
	);
	Ok(config)
}
