// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per refresh cycle response cache.

use std::collections::HashMap;

use crate::types::CacheId;

/// Remembers response bodies fetched during one refresh cycle.
///
/// Only the most recent cycle is kept: storing a body for a new
/// [`CacheId`] drops everything cached for the previous one.
///
/// # Examples
///
/// ```
/// use avr_soundmode::protocol::ResponseCache;
/// use avr_soundmode::types::CacheId;
///
/// let mut cache = ResponseCache::new();
/// let cycle = CacheId::new();
///
/// cache.insert("GET /status", cycle, "<item/>".to_string());
/// assert_eq!(cache.get("GET /status", &cycle), Some("<item/>"));
/// assert_eq!(cache.get("GET /status", &CacheId::new()), None);
/// ```
#[derive(Debug, Default)]
pub struct ResponseCache {
    cycle: Option<CacheId>,
    bodies: HashMap<String, String>,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the body cached for `key` in cycle `cache_id`.
    #[must_use]
    pub fn get(&self, key: &str, cache_id: &CacheId) -> Option<&str> {
        if self.cycle.as_ref() != Some(cache_id) {
            return None;
        }
        self.bodies.get(key).map(String::as_str)
    }

    /// Stores a body for `key` in cycle `cache_id`.
    pub fn insert(&mut self, key: impl Into<String>, cache_id: CacheId, body: String) {
        if self.cycle != Some(cache_id) {
            self.bodies.clear();
            self.cycle = Some(cache_id);
        }
        self.bodies.insert(key.into(), body);
    }

    /// Returns the number of cached bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
