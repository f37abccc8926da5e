// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale source error types.

use msgmap_core::RegistryError;
use thiserror::Error;

/// Errors raised while retrieving or installing preferred locales.
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum SourceError {
	/// The source could not be queried at all.
	#[error("locale source '{0}' is unavailable")]
	Unavailable(&'static str),

	/// The source answered but nothing usable came back.
	#[error("locale source '{0}' returned no usable locales")]
	NoLocales(&'static str),

	/// The retrieved locales were rejected by the registry.
	#[error("registry rejected retrieved locales: {0}")]
	Registry(#[from] RegistryError),
}
