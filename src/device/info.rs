// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static facts about a receiver.

use crate::types::{ReceiverType, ReceiverUrls};

/// Receiver identity and endpoints shared by the feature handlers.
///
/// # Examples
///
/// ```
/// use avr_soundmode::DeviceInfo;
/// use avr_soundmode::types::ReceiverType;
///
/// let info = DeviceInfo::new(ReceiverType::AvrX2016);
/// assert_eq!(info.use_avr_2016_update(), Some(true));
///
/// let info = DeviceInfo::new(ReceiverType::Avr).with_update_method(None);
/// assert_eq!(info.use_avr_2016_update(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    receiver_type: ReceiverType,
    use_avr_2016_update: Option<bool>,
    urls: ReceiverUrls,
}

impl DeviceInfo {
    /// Creates device info with the default update method of the family.
    #[must_use]
    pub fn new(receiver_type: ReceiverType) -> Self {
        Self {
            receiver_type,
            use_avr_2016_update: Some(receiver_type.default_update_method()),
            urls: ReceiverUrls::default(),
        }
    }

    /// Overrides the update method.
    ///
    /// `Some(true)` selects the `AppCommand.xml` interface, `Some(false)`
    /// the legacy status pages. `None` leaves it undetermined, which makes
    /// every update fail.
    #[must_use]
    pub fn with_update_method(mut self, use_avr_2016_update: Option<bool>) -> Self {
        self.use_avr_2016_update = use_avr_2016_update;
        self
    }

    /// Replaces the endpoint paths.
    #[must_use]
    pub fn with_urls(mut self, urls: ReceiverUrls) -> Self {
        self.urls = urls;
        self
    }

    /// Returns the receiver family.
    #[must_use]
    pub fn receiver_type(&self) -> ReceiverType {
        self.receiver_type
    }

    /// Returns the update method, `None` if undetermined.
    #[must_use]
    pub fn use_avr_2016_update(&self) -> Option<bool> {
        self.use_avr_2016_update
    }

    /// Returns the endpoint paths.
    #[must_use]
    pub fn urls(&self) -> &ReceiverUrls {
        &self.urls
    }
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::new(ReceiverType::default())
    }
}
