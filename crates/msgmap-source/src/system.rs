// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Preferred UI languages reported by the operating system.

use tracing::debug;

use crate::error::SourceError;
use crate::normalize::{normalize_all, normalize_bcp47};
use crate::LocaleSource;

/// Reads the user's ordered language preferences from the host.
///
/// On Windows this is the thread's preferred UI languages, on Apple platforms
/// the preferred languages list, and elsewhere the POSIX locale environment,
/// all as exposed by `sys-locale`. The BCP-47 tags it reports are normalised
/// to `language[_REGION]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSource;

impl SystemSource {
	pub fn new() -> Self {
		Self
	}
}

impl LocaleSource for SystemSource {
	fn name(&self) -> &'static str {
		"system"
	}

	fn retrieve(&self) -> Result<Vec<String>, SourceError> {
		self.normalize_reported(sys_locale::get_locales().collect())
	}
}

impl SystemSource {
	fn normalize_reported(&self, reported: Vec<String>) -> Result<Vec<String>, SourceError> {
		if reported.is_empty() {
			debug!("operating system reported no preferred languages");
			return Err(SourceError::Unavailable(self.name()));
		}

		let locales = normalize_all(&reported, normalize_bcp47);
		if locales.is_empty() {
			debug!(reported = ?reported, "operating system locales are neutral or unparseable");
			return Err(SourceError::NoLocales(self.name()));
		}

		debug!(
			reported = ?reported,
			count = locales.len(),
			"retrieved preferred languages from operating system"
		);
		Ok(locales)
	}
}
