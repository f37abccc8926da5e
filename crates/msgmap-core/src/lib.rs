// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale preference matching for msgmap.
//!
//! This crate decides which translation table to use for a resource:
//!
//! - [`LocaleTag`]: a validated `language[_REGION]` pair such as `en_US`
//! - [`PreferenceRegistry`]: the user's preferred locales, most preferred first
//! - [`resolve`] / [`CandidateTable`]: pick the best entry of a
//!   `(locale, resource)` table for the registered preferences
//!
//! # Example
//!
//! ```
//! use msgmap_core::{CandidateTable, PreferenceRegistry};
//!
//! let mut registry = PreferenceRegistry::new();
//! registry.set(["fr_CA", "en_US"]).unwrap();
//!
//! let greetings = CandidateTable::with_default_first([
//! 	("en_US", "Hello"),
//! 	("en_GB", "Hello"),
//! 	("fr", "Bonjour"),
//! ])
//! .unwrap();
//!
//! assert_eq!(*greetings.resolve(&registry), "Bonjour");
//! ```

mod error;
mod locale;
mod registry;
mod resolve;

pub use error::{LocaleError, RegistryError, ResolveError, Segment};
pub use locale::{LocaleTag, MAX_SEGMENT_LEN, REGION_SEPARATOR};
pub use registry::{PreferenceRegistry, SharedRegistry};
pub use resolve::{resolve, resolve_match, CandidateEntry, CandidateTable, MatchKind, Resolution};
