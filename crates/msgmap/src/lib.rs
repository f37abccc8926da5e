// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pick the best translation table for the user's preferred locales.
//!
//! Applications keep a [`Msgmap`] holding the user's preferred locales, most
//! preferred first, and hand it per-resource tables mapping locales such as
//! `en_US` or `fr` to translation data. The table entry returned is:
//!
//! 1. for the most preferred locale that matches anything, an entry with the
//!    same language and region, else the first entry with the same language;
//! 2. otherwise the table's default entry.
//!
//! Preferences come from an explicit list, the POSIX locale environment, or
//! the operating system, as chosen by configuration (see [`msgmap_config`]).
//!
//! # Example
//!
//! ```
//! use msgmap::Msgmap;
//!
//! let mut msgmap = Msgmap::new();
//! msgmap.set_preferred_langs(["fr_CA", "en_US"]).unwrap();
//!
//! let greetings = msgmap
//! 	.table([("en_US", "Hello"), ("fr_FR", "Bonjour"), ("de", "Hallo")])
//! 	.unwrap();
//!
//! // No fr_CA entry, but French beats the exact en_US match further down
//! // the preference list.
//! assert_eq!(*msgmap.translations(&greetings), "Bonjour");
//! ```

mod error;
mod handle;

pub use error::{MsgmapError, MsgmapResult};
pub use handle::Msgmap;

pub use msgmap_config::{LocaleSourceKind, MsgmapConfig};
pub use msgmap_core::{
	resolve, resolve_match, CandidateTable, LocaleError, LocaleTag, MatchKind, PreferenceRegistry,
	RegistryError, Resolution, ResolveError, SharedRegistry,
};
pub use msgmap_source::{
	ChainSource, EnvSource, Environment, LocaleSource, ProcessEnvironment, SourceError, StaticSource,
	SystemSource,
};
