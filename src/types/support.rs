// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sound mode support state.

use std::fmt;

/// Whether the receiver exposes its sound mode.
///
/// Starts as [`Unknown`](Self::Unknown) until setup or the first update
/// decides it.
///
/// # Examples
///
/// ```
/// use avr_soundmode::types::SoundModeSupport;
///
/// assert_eq!(SoundModeSupport::default().as_option(), None);
/// assert_eq!(SoundModeSupport::from(true), SoundModeSupport::Supported);
/// assert_eq!(SoundModeSupport::Unsupported.as_option(), Some(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoundModeSupport {
    /// Not determined yet.
    #[default]
    Unknown,
    /// The receiver reports a sound mode.
    Supported,
    /// The receiver reports no sound mode on any known status schema.
    Unsupported,
}

impl SoundModeSupport {
    /// Returns the state as an optional boolean, `None` while unknown.
    #[must_use]
    pub const fn as_option(&self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Supported => Some(true),
            Self::Unsupported => Some(false),
        }
    }

    /// Returns `true` if sound mode is known to be supported.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }
}

impl From<bool> for SoundModeSupport {
    fn from(supported: bool) -> Self {
        if supported {
            Self::Supported
        } else {
            Self::Unsupported
        }
    }
}

impl fmt::Display for SoundModeSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}
