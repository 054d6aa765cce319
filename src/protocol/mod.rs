// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementations for communicating with AV receivers.
//!
//! The sound mode handler talks to the receiver through the [`Protocol`]
//! trait, which bundles the three transports a receiver offers:
//!
//! - the aggregated `AppCommand.xml` status API (AVR-X 2016 and newer),
//! - the legacy XML status pages,
//! - plain HTTP GET commands.
//!
//! [`HttpClient`] implements the trait over HTTP.

mod cache;
#[cfg(feature = "http")]
mod http;

pub use cache::ResponseCache;
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::collections::HashMap;

use crate::error::Error;
use crate::types::{AppCommand, CacheId};

/// Trait for transports that can query and control a receiver.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Registers a tag to be included in aggregated `AppCommand` updates.
    ///
    /// Registering the same tag twice has no effect.
    fn add_appcommand_update_tag(&self, tag: AppCommand);

    /// Queries the `AppCommand.xml` interface.
    ///
    /// # Arguments
    ///
    /// * `tags` - The commands whose values are needed
    /// * `global_update` - Whether this query is part of a full refresh, in
    ///   which case all registered tags are fetched in one request
    /// * `cache_id` - Refresh cycle identifier used to reuse responses
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse(ParseError::MissingField)` if a requested tag is
    /// absent from the answer, or a protocol error if the request fails.
    async fn query_appcommand(
        &self,
        tags: &[AppCommand],
        global_update: bool,
        cache_id: Option<&CacheId>,
    ) -> Result<HashMap<AppCommand, String>, Error>;

    /// Reads fields from the legacy XML status pages.
    ///
    /// # Arguments
    ///
    /// * `attrs` - Pairs of field name and element path, e.g.
    ///   `("sound_mode_raw", "./selectSurround/value")`
    /// * `urls` - Candidate page paths, tried in order
    /// * `cache_id` - Refresh cycle identifier used to reuse responses
    ///
    /// Returns the values keyed by field name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse(ParseError::MissingField)` if a requested path
    /// resolves on none of the pages, or a protocol error if a request fails.
    async fn query_status_xml(
        &self,
        attrs: &[(&str, &str)],
        urls: &[&str],
        cache_id: Option<&CacheId>,
    ) -> Result<HashMap<String, String>, Error>;

    /// Sends a command to the receiver.
    ///
    /// # Arguments
    ///
    /// * `command` - Command path including its payload, e.g.
    ///   `/goform/formiPhoneAppDirect.xml?MSSTEREO`
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the command fails.
    async fn send_command(&self, command: &str) -> Result<(), Error>;
}
