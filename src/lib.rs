// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `avr_soundmode` - Sound mode control for Denon and Marantz AV receivers.
//!
//! This library provides an async API to read and select the sound mode
//! (surround mode) of network-enabled AV receivers over HTTP.
//!
//! # Supported Features
//!
//! - **Sound mode status**: Raw mode as reported by the receiver, resolved to
//!   a small set of normalized modes
//! - **Sound mode selection**: Including the all zone stereo pseudo-mode
//! - **Receiver families**: Legacy AVR status pages and the `AppCommand.xml`
//!   interface of AVR-X 2016 and newer
//! - **Custom mode tables**: Built-in table replaceable from JSON
//!
//! # Quick Start
//!
//! ```no_run
//! use avr_soundmode::Device;
//! use avr_soundmode::types::ReceiverType;
//!
//! #[tokio::main]
//! async fn main() -> avr_soundmode::Result<()> {
//!     let device = Device::http("192.168.1.120")
//!         .with_receiver_type(ReceiverType::AvrX2016)
//!         .build()?;
//!
//!     device.update().await?;
//!
//!     let sound_mode = device.sound_mode();
//!     println!("Current: {:?}", sound_mode.sound_mode());
//!     println!("Available: {:?}", sound_mode.sound_mode_list());
//!
//!     sound_mode.set_sound_mode("MOVIE").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration from JSON
//!
//! ```no_run
//! use avr_soundmode::{Device, ReceiverConfig};
//!
//! # fn example() -> avr_soundmode::Result<()> {
//! let config = ReceiverConfig::from_json(r#"{"host": "192.168.1.120", "receiver_type": "avr-x"}"#)?;
//! let device = Device::from_config(&config)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events; install a subscriber in the
//! application to see them.

mod device;
pub mod error;
pub mod protocol;
pub mod response;
mod sound_mode;
pub mod types;

#[cfg(feature = "http")]
pub use device::HttpDeviceBuilder;
pub use device::{Device, DeviceInfo, ReceiverConfig};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result};
#[cfg(feature = "http")]
pub use protocol::HttpConfig;
pub use sound_mode::{ALL_ZONE_STEREO, ModeMap, ReverseIndex, SoundMode};
pub use types::{CacheId, ReceiverType, SoundModeSupport};
