// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sound mode handling.
//!
//! [`SoundMode`] reads the raw sound mode reported by the receiver, resolves
//! it to a normalized mode name through a [`ModeMap`], and selects sound
//! modes.
//!
//! # Update methods
//!
//! Receivers from 2016 on report the sound mode through the aggregated
//! `AppCommand.xml` interface. Older receivers publish it on XML status
//! pages, using either `./selectSurround/value` or `./SurrMode/value`.
//! If neither is present the receiver is marked as not supporting sound
//! mode and is never asked again.
//!
//! # Unknown modes
//!
//! A raw mode missing from the map becomes a mode of its own, named after
//! the uppercased raw value. It is then listed by
//! [`sound_mode_list`](SoundMode::sound_mode_list) like any other mode.

mod mapping;

pub use mapping::{ALL_ZONE_STEREO, ModeMap, ReverseIndex};

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::device::DeviceInfo;
use crate::error::{DeviceError, Error, ParseError};
use crate::protocol::Protocol;
use crate::types::{AppCommand, CacheId, SoundModeSupport};

const SOUND_MODE_RAW: &str = "sound_mode_raw";

const APPCOMMAND_ATTRS: &[AppCommand] = &[AppCommand::GetSurroundModeStatus];

const STATUS_XML_ATTRS_01: &[(&str, &str)] = &[(SOUND_MODE_RAW, "./selectSurround/value")];

const STATUS_XML_ATTRS_02: &[(&str, &str)] = &[(SOUND_MODE_RAW, "./SurrMode/value")];

#[derive(Debug)]
struct ModeTable {
    map: ModeMap,
    reverse: ReverseIndex,
}

impl ModeTable {
    fn new(map: ModeMap) -> Self {
        let reverse = map.reverse_index();
        Self { map, reverse }
    }
}

/// Sound mode handler of a receiver.
///
/// All methods take `&self`; state is kept behind locks that are never held
/// across an `.await`.
///
/// # Examples
///
/// ```no_run
/// use avr_soundmode::Device;
/// use avr_soundmode::types::ReceiverType;
///
/// # async fn example() -> avr_soundmode::Result<()> {
/// let device = Device::http("192.168.1.120")
///     .with_receiver_type(ReceiverType::AvrX)
///     .build()?;
///
/// let sound_mode = device.sound_mode();
/// sound_mode.update(false, None).await?;
/// println!("{:?}", sound_mode.sound_mode());
///
/// sound_mode.set_sound_mode("MOVIE").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SoundMode<P: Protocol> {
    protocol: Arc<P>,
    info: Arc<DeviceInfo>,
    table: RwLock<ModeTable>,
    raw: RwLock<Option<String>>,
    support: RwLock<SoundModeSupport>,
    is_setup: AtomicBool,
}

impl<P: Protocol> SoundMode<P> {
    /// Creates a sound mode handler using the given mode map.
    pub fn new(protocol: Arc<P>, info: Arc<DeviceInfo>, map: ModeMap) -> Self {
        Self {
            protocol,
            info,
            table: RwLock::new(ModeTable::new(map)),
            raw: RwLock::new(None),
            support: RwLock::new(SoundModeSupport::Unknown),
            is_setup: AtomicBool::new(false),
        }
    }

    /// Prepares the handler for updates.
    ///
    /// Registers the `AppCommand` tags needed for sound mode. AVR-X receivers
    /// always support sound mode; for other receivers one update is run to
    /// find out.
    ///
    /// # Errors
    ///
    /// Returns error if the initial update fails.
    pub async fn setup(&self) -> Result<(), Error> {
        for tag in APPCOMMAND_ATTRS {
            self.protocol.add_appcommand_update_tag(*tag);
        }

        if self.info.receiver_type().always_supports_sound_mode() {
            *self.support.write() = SoundModeSupport::Supported;
        } else {
            self.update_sound_mode(false, None).await?;
        }

        self.is_setup.store(true, Ordering::Release);
        Ok(())
    }

    /// Updates the sound mode, running [`setup`](Self::setup) first if
    /// needed.
    ///
    /// # Arguments
    ///
    /// * `global_update` - Whether this update is part of a full refresh
    /// * `cache_id` - Refresh cycle identifier passed on to the transport
    ///
    /// # Errors
    ///
    /// Returns error if setup or the update fails.
    pub async fn update(
        &self,
        global_update: bool,
        cache_id: Option<&CacheId>,
    ) -> Result<(), Error> {
        if !self.is_setup() {
            self.setup().await?;
        }

        self.update_sound_mode(global_update, cache_id).await
    }

    /// Reads the raw sound mode from the receiver.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UpdateMethodNotSet` if the update method is
    /// undetermined, or any transport error. On legacy receivers a missing
    /// sound mode tag is not an error: support is set to
    /// [`SoundModeSupport::Unsupported`] instead.
    pub async fn update_sound_mode(
        &self,
        global_update: bool,
        cache_id: Option<&CacheId>,
    ) -> Result<(), Error> {
        match self.info.use_avr_2016_update() {
            Some(true) => {
                let mut values = self
                    .protocol
                    .query_appcommand(APPCOMMAND_ATTRS, global_update, cache_id)
                    .await?;
                let raw = values
                    .remove(&AppCommand::GetSurroundModeStatus)
                    .ok_or_else(|| {
                        ParseError::MissingField(
                            AppCommand::GetSurroundModeStatus.response_tag().to_string(),
                        )
                    })?;
                self.store_raw(&raw);
                Ok(())
            }
            Some(false) => {
                if *self.support.read() == SoundModeSupport::Unsupported {
                    return Ok(());
                }

                let Some(raw) = self.query_status_xml(cache_id).await? else {
                    tracing::info!(
                        receiver = %self.info.receiver_type(),
                        "Sound mode not supported"
                    );
                    *self.support.write() = SoundModeSupport::Unsupported;
                    return Ok(());
                };

                *self.support.write() = SoundModeSupport::Supported;
                self.store_raw(&raw);
                Ok(())
            }
            None => Err(DeviceError::UpdateMethodNotSet.into()),
        }
    }

    /// Tries both status page schemas. `Ok(None)` if neither has the tag.
    async fn query_status_xml(
        &self,
        cache_id: Option<&CacheId>,
    ) -> Result<Option<String>, Error> {
        let urls = self.info.urls();
        let pages = [urls.status.as_str(), urls.mainzone.as_str()];

        for attrs in [STATUS_XML_ATTRS_01, STATUS_XML_ATTRS_02] {
            match self.protocol.query_status_xml(attrs, &pages, cache_id).await {
                Ok(mut values) => return Ok(values.remove(SOUND_MODE_RAW)),
                Err(err) if err.is_processing() => {
                    tracing::debug!(error = %err, "Sound mode tag not found on status page");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(None)
    }

    /// A blank value means the receiver reports no sound mode.
    fn store_raw(&self, raw: &str) {
        let raw = raw.trim_end();
        *self.raw.write() = (!raw.is_empty()).then(|| raw.to_string());
    }

    /// Resolves a raw sound mode to its normalized name.
    ///
    /// Returns `None` as long as no sound mode was received from the
    /// receiver, and for a blank raw mode. An unknown raw mode is added to
    /// the map as a mode of its own and returned uppercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use avr_soundmode::{DeviceInfo, ModeMap, SoundMode};
    /// use avr_soundmode::protocol::HttpClient;
    ///
    /// let client = Arc::new(HttpClient::new("192.168.1.120").unwrap());
    /// let sound_mode = SoundMode::new(client, Arc::new(DeviceInfo::default()), ModeMap::default());
    ///
    /// // Nothing received yet
    /// assert_eq!(sound_mode.match_sound_mode(Some("DOLBY PL2 C")), None);
    /// ```
    pub fn match_sound_mode(&self, sound_mode_raw: Option<&str>) -> Option<String> {
        if self.raw.read().is_none() {
            return None;
        }

        let raw = sound_mode_raw?.trim_end().to_uppercase();
        if raw.is_empty() {
            return None;
        }
        let matched = self.table.read().reverse.get(&raw).map(str::to_owned);
        if matched.is_some() {
            return matched;
        }

        let mut table = self.table.write();
        // Another task may have registered it meanwhile
        if let Some(mode) = table.reverse.get(&raw) {
            return Some(mode.to_string());
        }
        table.map.insert_raw(&raw);
        table.reverse = table.map.reverse_index();
        drop(table);

        tracing::warn!(
            sound_mode = %raw,
            "Not able to match sound mode, returning raw sound mode"
        );
        Some(raw)
    }

    /// Sets the sound mode of the receiver.
    ///
    /// Valid values depend on the receiver and should be taken from
    /// [`sound_mode_list`](Self::sound_mode_list). Selecting
    /// [`ALL_ZONE_STEREO`] enables all zone stereo; selecting any other mode
    /// while all zone stereo is active disables it first.
    ///
    /// # Errors
    ///
    /// Returns error if a command fails.
    pub async fn set_sound_mode(&self, sound_mode: &str) -> Result<(), Error> {
        if sound_mode == ALL_ZONE_STEREO {
            return self.set_all_zone_stereo(true).await;
        }

        if self.sound_mode().as_deref() == Some(ALL_ZONE_STEREO) {
            self.set_all_zone_stereo(false).await?;
        }

        let command = format!("{}{sound_mode}", self.info.urls().command_sel_sound_mode);
        tracing::debug!(sound_mode, "Selecting sound mode");
        self.protocol.send_command(&command).await
    }

    async fn set_all_zone_stereo(&self, zst_on: bool) -> Result<(), Error> {
        let mut command = self.info.urls().command_set_all_zone_stereo.clone();
        command.push_str(if zst_on { "ZST ON" } else { "ZST OFF" });
        self.protocol.send_command(&command).await
    }

    // ========== Accessors ==========

    /// Returns whether the receiver supports sound mode.
    #[must_use]
    pub fn support_sound_mode(&self) -> SoundModeSupport {
        *self.support.read()
    }

    /// Returns the current normalized sound mode.
    #[must_use]
    pub fn sound_mode(&self) -> Option<String> {
        let raw = self.raw.read().clone();
        self.match_sound_mode(raw.as_deref())
    }

    /// Returns the names of all known sound modes in order.
    #[must_use]
    pub fn sound_mode_list(&self) -> Vec<String> {
        self.table.read().map.names().map(str::to_owned).collect()
    }

    /// Returns a copy of the mode map.
    #[must_use]
    pub fn sound_mode_map(&self) -> ModeMap {
        self.table.read().map.clone()
    }

    /// Returns a copy of the map from uppercased raw modes to mode names.
    #[must_use]
    pub fn sound_mode_map_rev(&self) -> HashMap<String, String> {
        self.table.read().reverse.to_map()
    }

    /// Returns the sound mode as received from the receiver.
    #[must_use]
    pub fn sound_mode_raw(&self) -> Option<String> {
        self.raw.read().clone()
    }

    /// Returns whether [`setup`](Self::setup) completed.
    #[must_use]
    pub fn is_setup(&self) -> bool {
        self.is_setup.load(Ordering::Acquire)
    }
}
