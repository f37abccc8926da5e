// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Top-level error type aggregating every msgmap crate's errors.

use msgmap_config::ConfigError;
use msgmap_core::{RegistryError, ResolveError};
use msgmap_source::SourceError;
use thiserror::Error;

/// Result type alias for msgmap operations.
pub type MsgmapResult<T> = Result<T, MsgmapError>;

/// Top-level error type for msgmap operations.
#[derive(Error, Debug)]
pub enum MsgmapError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("Preference error: {0}")]
	Registry(#[from] RegistryError),

	#[error("Resolution error: {0}")]
	Resolve(#[from] ResolveError),

	#[error("Locale source error: {0}")]
	Source(#[from] SourceError),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_errors_convert_and_name_their_origin() {
		let err: MsgmapError = SourceError::NoLocales("system").into();
		assert!(matches!(err, MsgmapError::Source(_)));
		assert!(err.to_string().starts_with("Locale source error: "));

		let err: MsgmapError = RegistryError::EmptyList.into();
		assert!(err.to_string().starts_with("Preference error: "));

		let err: MsgmapError = ResolveError::EmptyTable.into();
		assert!(err.to_string().starts_with("Resolution error: "));
	}
}
