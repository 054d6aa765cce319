// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for AV receivers.
//!
//! A [`Device`] owns the transport, the static [`DeviceInfo`] and the
//! [`SoundMode`] handler, which lives as long as the device.
//!
//! ```no_run
//! use avr_soundmode::Device;
//! use avr_soundmode::types::ReceiverType;
//!
//! # async fn example() -> avr_soundmode::Result<()> {
//! let device = Device::http("192.168.1.120")
//!     .with_receiver_type(ReceiverType::AvrX2016)
//!     .with_port(8080)
//!     .build()?;
//!
//! device.update().await?;
//! println!("{:?}", device.sound_mode().sound_mode());
//! # Ok(())
//! # }
//! ```

mod config;
#[cfg(feature = "http")]
mod http_builder;
mod info;

pub use config::ReceiverConfig;
#[cfg(feature = "http")]
pub use http_builder::HttpDeviceBuilder;
pub use info::DeviceInfo;

use std::sync::Arc;

use crate::error::Error;
use crate::protocol::Protocol;
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::sound_mode::{ModeMap, SoundMode};
use crate::types::CacheId;

/// An AV receiver reachable through a protocol `P`.
///
/// # Type Parameter
///
/// `P` is the transport, [`HttpClient`] for real receivers.
#[derive(Debug)]
pub struct Device<P: Protocol> {
    protocol: Arc<P>,
    info: Arc<DeviceInfo>,
    sound_mode: SoundMode<P>,
}

impl<P: Protocol> Device<P> {
    /// Creates a device from a transport, its info and a sound mode map.
    pub fn new(protocol: P, info: DeviceInfo, sound_mode_map: ModeMap) -> Self {
        let protocol = Arc::new(protocol);
        let info = Arc::new(info);
        let sound_mode = SoundMode::new(Arc::clone(&protocol), Arc::clone(&info), sound_mode_map);
        Self {
            protocol,
            info,
            sound_mode,
        }
    }

    /// Returns the receiver info.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns the transport.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the sound mode handler.
    #[must_use]
    pub fn sound_mode(&self) -> &SoundMode<P> {
        &self.sound_mode
    }

    /// Refreshes all state of the receiver.
    ///
    /// Runs as one refresh cycle: aggregated queries are combined and
    /// identical reads share a response.
    ///
    /// # Errors
    ///
    /// Returns error if any update fails.
    pub async fn update(&self) -> Result<(), Error> {
        let cache_id = CacheId::new();
        tracing::debug!(cache_id = %cache_id, "Refreshing receiver state");
        self.sound_mode.update(true, Some(&cache_id)).await
    }
}

// ========== HTTP Device Entry Point ==========

#[cfg(feature = "http")]
impl Device<HttpClient> {
    /// Creates a builder for an HTTP receiver from a host string.
    ///
    /// This is a convenience method equivalent to `Device::http_config(HttpConfig::new(host))`.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the receiver
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(HttpConfig::new(host))
    }

    /// Creates a builder for an HTTP receiver from an `HttpConfig`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use avr_soundmode::Device;
    /// use avr_soundmode::protocol::HttpConfig;
    ///
    /// # fn example() -> avr_soundmode::Result<()> {
    /// let config = HttpConfig::new("192.168.1.120").with_port(8080);
    /// let device = Device::http_config(config).build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn http_config(config: HttpConfig) -> HttpDeviceBuilder {
        HttpDeviceBuilder::new(config)
    }

    /// Creates an HTTP receiver from a [`ReceiverConfig`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ReceiverConfig) -> Result<Self, Error> {
        let mut builder = HttpDeviceBuilder::new(config.http_config())
            .with_receiver_type(config.receiver_type)
            .with_update_method(config.update_method());
        if let Some(map) = &config.sound_mode_map {
            builder = builder.with_sound_mode_map(map.clone());
        }
        builder.build()
    }
}
