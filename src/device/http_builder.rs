// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP device builder.

use std::time::Duration;

use crate::device::{Device, DeviceInfo};
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::sound_mode::ModeMap;
use crate::types::ReceiverType;

/// Builder for creating HTTP-based receivers.
///
/// This builder can be created in two ways:
/// - `Device::http("host")` - Simple host string
/// - `Device::http_config(HttpConfig::new("host").with_port(8080))` - Advanced configuration
///
/// # Examples
///
/// ```
/// use avr_soundmode::Device;
/// use avr_soundmode::types::ReceiverType;
///
/// # fn example() -> avr_soundmode::Result<()> {
/// // Legacy receiver, default sound mode table
/// let device = Device::http("192.168.1.120").build()?;
///
/// // Older AVR-X that already speaks AppCommand.xml
/// let device = Device::http("192.168.1.121")
///     .with_receiver_type(ReceiverType::AvrX)
///     .with_update_method(Some(true))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpDeviceBuilder {
    config: HttpConfig,
    receiver_type: ReceiverType,
    update_method: Option<Option<bool>>,
    sound_mode_map: Option<ModeMap>,
}

impl HttpDeviceBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            receiver_type: ReceiverType::default(),
            update_method: None,
            sound_mode_map: None,
        }
    }

    /// Sets the receiver family. Defaults to [`ReceiverType::Avr`].
    #[must_use]
    pub fn with_receiver_type(mut self, receiver_type: ReceiverType) -> Self {
        self.receiver_type = receiver_type;
        self
    }

    /// Overrides the update method chosen by the receiver family.
    ///
    /// See [`DeviceInfo::with_update_method`].
    #[must_use]
    pub fn with_update_method(mut self, use_avr_2016_update: Option<bool>) -> Self {
        self.update_method = Some(use_avr_2016_update);
        self
    }

    /// Replaces the built-in sound mode table.
    #[must_use]
    pub fn with_sound_mode_map(mut self, map: ModeMap) -> Self {
        self.sound_mode_map = Some(map);
        self
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Returns the configured receiver family.
    #[must_use]
    pub fn receiver_type(&self) -> ReceiverType {
        self.receiver_type
    }

    /// Builds the device.
    ///
    /// No request is sent; the receiver is first contacted on the first
    /// update.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Device<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;

        let mut info = DeviceInfo::new(self.receiver_type);
        if let Some(update_method) = self.update_method {
            info = info.with_update_method(update_method);
        }

        let map = self.sound_mode_map.unwrap_or_default();
        Ok(Device::new(client, info, map))
    }
}
