// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Receiver family and endpoint types.
//!
//! The receiver family decides two things for the sound mode handler: whether
//! sound mode can be assumed to be available without asking the device, and
//! which status interface is used by default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeviceError;

/// Family of a Denon/Marantz AV receiver.
///
/// # Examples
///
/// ```
/// use avr_soundmode::types::ReceiverType;
///
/// let receiver: ReceiverType = "avr-x-2016".parse().unwrap();
///
/// assert_eq!(receiver, ReceiverType::AvrX2016);
/// assert!(receiver.always_supports_sound_mode());
/// assert!(receiver.default_update_method());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReceiverType {
    /// Older AVR receivers. Sound mode support is detected on first update.
    #[default]
    #[serde(rename = "avr")]
    Avr,
    /// AVR-X receivers built before 2016.
    #[serde(rename = "avr-x")]
    AvrX,
    /// AVR-X receivers from 2016 on, using the `AppCommand.xml` interface.
    #[serde(rename = "avr-x-2016")]
    AvrX2016,
}

impl ReceiverType {
    /// Returns the configuration string for this receiver family.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Avr => "avr",
            Self::AvrX => "avr-x",
            Self::AvrX2016 => "avr-x-2016",
        }
    }

    /// Returns `true` if every receiver of this family exposes sound mode.
    #[must_use]
    pub const fn always_supports_sound_mode(&self) -> bool {
        matches!(self, Self::AvrX | Self::AvrX2016)
    }

    /// Returns the update method used unless overridden.
    ///
    /// `true` selects the `AppCommand.xml` interface, `false` the legacy
    /// XML status pages.
    #[must_use]
    pub const fn default_update_method(&self) -> bool {
        matches!(self, Self::AvrX2016)
    }
}

impl fmt::Display for ReceiverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceiverType {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avr" => Ok(Self::Avr),
            "avr-x" | "avr_x" => Ok(Self::AvrX),
            "avr-x-2016" | "avr_x_2016" => Ok(Self::AvrX2016),
            _ => Err(DeviceError::InvalidConfiguration(format!(
                "unknown receiver type: {s}"
            ))),
        }
    }
}

/// HTTP endpoints used by the sound mode handler.
///
/// Command prefixes are completed by appending the payload, for example
/// `command_sel_sound_mode + "STEREO"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverUrls {
    /// Main zone XML status page.
    pub status: String,
    /// Alternative main zone XML page.
    pub mainzone: String,
    /// Prefix of the sound mode selection command.
    pub command_sel_sound_mode: String,
    /// Prefix of the all zone stereo command.
    pub command_set_all_zone_stereo: String,
}

impl ReceiverUrls {
    /// Main zone XML status page path.
    pub const STATUS: &'static str = "/goform/formMainZone_MainZoneXmlStatus.xml";
    /// Alternative main zone XML page path.
    pub const MAINZONE: &'static str = "/goform/formMainZone_MainZoneXml.xml";
    /// Direct command endpoint used for sound mode selection.
    pub const COMMAND_SEL_SOUND_MODE: &'static str = "/goform/formiPhoneAppDirect.xml?MS";
    /// Direct command endpoint used for all zone stereo.
    pub const COMMAND_SET_ALL_ZONE_STEREO: &'static str = "/goform/formiPhoneAppDirect.xml?MN";
}

impl Default for ReceiverUrls {
    fn default() -> Self {
        Self {
            status: Self::STATUS.to_string(),
            mainzone: Self::MAINZONE.to_string(),
            command_sel_sound_mode: Self::COMMAND_SEL_SOUND_MODE.to_string(),
            command_set_all_zone_stereo: Self::COMMAND_SET_ALL_ZONE_STEREO.to_string(),
        }
    }
}
