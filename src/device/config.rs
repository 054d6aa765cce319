// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable receiver configuration.

#[cfg(feature = "http")]
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::DeviceInfo;
use crate::error::{Error, ParseError};
#[cfg(feature = "http")]
use crate::protocol::HttpConfig;
use crate::sound_mode::ModeMap;
use crate::types::ReceiverType;

/// Configuration of a receiver, as stored by an application.
///
/// Only `host` is required. When `use_avr_2016_update` is absent the
/// update method follows the receiver type.
///
/// # Examples
///
/// ```
/// use avr_soundmode::ReceiverConfig;
/// use avr_soundmode::types::ReceiverType;
///
/// let config = ReceiverConfig::from_json(r#"{
///     "host": "192.168.1.120",
///     "receiver_type": "avr-x",
///     "timeout_ms": 5000
/// }"#).unwrap();
///
/// assert_eq!(config.port, 80);
/// assert_eq!(config.receiver_type, ReceiverType::AvrX);
/// assert_eq!(config.update_method(), Some(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Hostname or IP address.
    pub host: String,
    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Receiver family.
    #[serde(default)]
    pub receiver_type: ReceiverType,
    /// Update method override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_avr_2016_update: Option<bool>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Replacement for the built-in sound mode table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_mode_map: Option<ModeMap>,
}

fn default_port() -> u16 {
    80
}

fn default_timeout_ms() -> u64 {
    2000
}

impl ReceiverConfig {
    /// Creates a configuration with default settings for a host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            receiver_type: ReceiverType::default(),
            use_avr_2016_update: None,
            timeout_ms: default_timeout_ms(),
            sound_mode_map: None,
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the document is malformed, or
    /// `DeviceError::InvalidConfiguration` (wrapped in the JSON error) if the
    /// sound mode table is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(ParseError::Json)
            .map_err(Error::Parse)
    }

    /// Returns the effective update method.
    #[must_use]
    pub fn update_method(&self) -> Option<bool> {
        self.use_avr_2016_update
            .or(Some(self.receiver_type.default_update_method()))
    }

    /// Returns the device info described by this configuration.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(self.receiver_type).with_update_method(self.update_method())
    }

    /// Returns the HTTP transport configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.host.clone())
            .with_port(self.port)
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ReceiverConfig::from_json(r#"{"host": "avr.local"}"#).unwrap();
        assert_eq!(config, ReceiverConfig::new("avr.local"));
        assert_eq!(config.receiver_type, ReceiverType::Avr);
        assert_eq!(config.update_method(), Some(false));
        assert!(config.sound_mode_map.is_none());
    }

    #[test]
    fn explicit_update_method_wins() {
        let config = ReceiverConfig::from_json(
            r#"{"host": "avr.local", "receiver_type": "avr-x", "use_avr_2016_update": true}"#,
        )
        .unwrap();
        assert_eq!(config.update_method(), Some(true));
        assert_eq!(config.device_info().use_avr_2016_update(), Some(true));
        assert_eq!(config.device_info().receiver_type(), ReceiverType::AvrX);
    }

    #[test]
    fn missing_host_is_rejected() {
        let result = ReceiverConfig::from_json(r#"{"port": 8080}"#);
        assert!(matches!(result, Err(Error::Parse(ParseError::Json(_)))));
    }

    #[test]
    fn unknown_receiver_type_is_rejected() {
        let result = ReceiverConfig::from_json(r#"{"host": "avr.local", "receiver_type": "tv"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn inconsistent_sound_mode_map_is_rejected() {
        let result = ReceiverConfig::from_json(
            r#"{"host": "avr.local", "sound_mode_map": [["A", ["X"]], ["B", ["X"]]]}"#,
        );
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_config_carries_port_and_timeout() {
        let config = ReceiverConfig::from_json(
            r#"{"host": "192.168.1.120", "port": 8080, "timeout_ms": 500}"#,
        )
        .unwrap();
        let http = config.http_config();
        assert_eq!(http.base_url(), "http://192.168.1.120:8080");
        assert_eq!(http.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn serializes_without_empty_options() {
        let json = serde_json::to_string(&ReceiverConfig::new("avr.local")).unwrap();
        assert!(!json.contains("sound_mode_map"));
        assert!(!json.contains("use_avr_2016_update"));
        assert!(json.contains(r#""receiver_type":"avr""#));
    }
}
