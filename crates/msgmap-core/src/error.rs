// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for locale parsing, registry updates and table resolution.

use thiserror::Error;

/// Which half of a `language[_REGION]` tag an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
	Language,
	Region,
}

impl std::fmt::Display for Segment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Segment::Language => f.write_str("language"),
			Segment::Region => f.write_str("region"),
		}
	}
}

/// Reasons a string cannot be turned into a [`LocaleTag`](crate::LocaleTag).
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum LocaleError {
	#[error("locale tag is empty")]
	Empty,

	#[error("language segment is empty")]
	EmptyLanguage,

	#[error("region segment is empty")]
	EmptyRegion,

	#[error("invalid language segment: {0:?}")]
	InvalidLanguage(String),

	#[error("invalid region segment: {0:?}")]
	InvalidRegion(String),

	#[error("{segment} segment is {len} bytes, maximum is {max}")]
	TooLong {
		segment: Segment,
		len: usize,
		max: usize,
	},
}

/// Errors returned by [`PreferenceRegistry::set`](crate::PreferenceRegistry::set).
///
/// The registry is left untouched whenever one of these is returned.
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
	#[error("preferred language list is empty")]
	EmptyList,

	#[error("preferred language #{index} ({tag:?}) is invalid: {source}")]
	InvalidEntry {
		index: usize,
		tag: String,
		#[source]
		source: LocaleError,
	},
}

/// Contract violations detected while resolving a candidate table.
///
/// Failing to match any preference is not an error; it yields the default
/// entry.
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
	#[error("candidate table is empty")]
	EmptyTable,

	#[error("default index {index} is out of range for a table of {len} entries")]
	DefaultIndexOutOfRange { index: usize, len: usize },

	#[error("default locale {0} has no entry in the candidate table")]
	DefaultLocaleMissing(String),
}
