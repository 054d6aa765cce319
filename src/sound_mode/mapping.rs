// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping between raw receiver sound modes and normalized mode names.
//!
//! Receivers report many vendor specific variants of the same mode, e.g.
//! `DOLBY PL2 M` and `DTS NEO:6 MUSIC` are both presented as `MUSIC`.
//! A [`ModeMap`] lists the raw aliases of every normalized mode, and the
//! derived [`ReverseIndex`] resolves a raw mode in one lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, Error, ParseError};

/// Pseudo sound mode that enables stereo playback in all zones.
///
/// It is toggled with a dedicated command instead of the sound mode
/// selection command.
pub const ALL_ZONE_STEREO: &str = "ALL ZONE STEREO";

const DEFAULT_SOUND_MODES: &[(&str, &[&str])] = &[
    (
        "MUSIC",
        &[
            "PLII MUSIC",
            "DTS NEO:6 MUSIC",
            "DOLBY D +NEO:X M",
            "DOLBY PL2 M",
            "DOLBY PL2 MUSIC",
            "DOLBY PL2 X MUSIC",
            "PLIIX MUSIC",
            "NEO:X MUSIC",
            "DTS NEO:X MUSIC",
        ],
    ),
    (
        "MOVIE",
        &[
            "PLII MOVIE",
            "PLII CINEMA",
            "DTS NEO:X CINEMA",
            "DTS NEO:6 CINEMA",
            "DOLBY D +NEO:X C",
            "PLIIX CINEMA",
            "DOLBY PLII MOVIE",
            "NEO:X CINEMA",
            "DOLBY PL2 C",
            "DOLBY PL2 CINEMA",
            "DOLBY PL2 MOVIE",
            "DOLBY PL2 X MOVIE",
        ],
    ),
    (
        "GAME",
        &[
            "PLII GAME",
            "DOLBY D +NEO:X G",
            "DOLBY PL2 G",
            "DOLBY PL2 GAME",
            "DOLBY PL2 X GAME",
            "NEO:X GAME",
            "DTS NEO:X GAME",
        ],
    ),
    ("AUTO", &["AUTO"]),
    ("STANDARD", &["STANDARD"]),
    ("VIRTUAL", &["VIRTUAL"]),
    ("MATRIX", &["MATRIX"]),
    ("ROCK ARENA", &["ROCK ARENA"]),
    ("JAZZ CLUB", &["JAZZ CLUB"]),
    ("VIDEO GAME", &["VIDEO GAME"]),
    ("MONO MOVIE", &["MONO MOVIE"]),
    ("DIRECT", &["DIRECT"]),
    ("PURE DIRECT", &["PURE_DIRECT", "PURE DIRECT"]),
    (
        "DOLBY DIGITAL",
        &[
            "DOLBY DIGITAL",
            "DOLBY D + DOLBY SURROUND",
            "DOLBY DIGITAL +",
            "STANDARD(DOLBY)",
            "DOLBY SURROUND",
            "DOLBY D + +DOLBY SURROUND",
            "NEURAL",
            "DOLBY HD",
            "DOLBY HD + NEURAL:X",
            "MULTI IN + DSUR",
            "MULTI IN + NEURAL:X",
            "DOLBY ATMOS",
            "DOLBY TRUEHD",
            "DOLBY AUDIO - DOLBY SURROUND",
            "DOLBY AUDIO - DOLBY DIGITAL PLUS",
            "DOLBY AUDIO - DOLBY TRUEHD",
            "DOLBY AUDIO - DD + DSUR",
            "DOLBY AUDIO - DD+ + DSUR",
            "DOLBY AUDIO - TRUEHD + DSUR",
        ],
    ),
    (
        "DTS SURROUND",
        &[
            "DTS SURROUND",
            "DTS NEURAL:X",
            "STANDARD(DTS)",
            "DTS + NEURAL:X",
            "MULTI CH IN",
            "DTS-HD MSTR",
            "DTS + DOLBY SURROUND",
            "DTS-HD + NEURAL:X",
            "DTS HD",
            "DTS:X",
            "DTS:X MSTR",
            "DTS-HD + DSUR",
            "NEO:6 C DSX",
            "NEO:6 M DSX",
        ],
    ),
    ("AURO3D", &["AURO-3D"]),
    ("AURO2DSURR", &["AURO-2D SURROUND"]),
    (
        "MCH STEREO",
        &["MULTI CH STEREO", "MULTI_CH_STEREO", "MCH STEREO"],
    ),
    ("STEREO", &["STEREO"]),
    (ALL_ZONE_STEREO, &["ALL ZONE STEREO"]),
];

/// Ordered mapping from normalized sound mode names to raw aliases.
///
/// Every raw alias belongs to exactly one mode, compared case-insensitively.
/// The order of the modes is kept and used by
/// [`SoundMode::sound_mode_list`](crate::SoundMode::sound_mode_list).
///
/// # Examples
///
/// ```
/// use avr_soundmode::ModeMap;
///
/// let map = ModeMap::new([
///     ("MOVIE", vec!["PLII MOVIE", "DOLBY PL2 C"]),
///     ("STEREO", vec!["STEREO"]),
/// ])
/// .unwrap();
///
/// assert_eq!(map.names().collect::<Vec<_>>(), ["MOVIE", "STEREO"]);
/// assert_eq!(map.reverse_index().get("dolby pl2 c"), Some("MOVIE"));
///
/// // An alias may not belong to two modes
/// assert!(ModeMap::new([("A", vec!["X"]), ("B", vec!["x"])]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(String, Vec<String>)>",
    into = "Vec<(String, Vec<String>)>"
)]
pub struct ModeMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ModeMap {
    /// Creates a mode map from ordered `(name, aliases)` entries.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::InvalidConfiguration` if a name is empty or
    /// listed twice, or if a raw alias is listed under two different modes.
    pub fn new<N, A, I>(entries: I) -> Result<Self, DeviceError>
    where
        N: Into<String>,
        A: Into<String>,
        I: IntoIterator<Item = (N, Vec<A>)>,
    {
        let mut map = Self {
            entries: Vec::new(),
        };
        let mut owners: HashMap<String, String> = HashMap::new();

        for (name, aliases) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(DeviceError::InvalidConfiguration(
                    "sound mode name must not be empty".to_string(),
                ));
            }
            if map.contains(&name) {
                return Err(DeviceError::InvalidConfiguration(format!(
                    "sound mode {name} is listed twice"
                )));
            }

            let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
            for alias in &aliases {
                let previous = owners.insert(alias.to_uppercase(), name.clone());
                if let Some(owner) = previous.filter(|owner| *owner != name) {
                    return Err(DeviceError::InvalidConfiguration(format!(
                        "raw sound mode {alias} belongs to both {owner} and {name}"
                    )));
                }
            }

            map.entries.push((name, aliases));
        }

        Ok(map)
    }

    /// Loads a mode map from a JSON array of `[name, [aliases...]]` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the document is not valid, or
    /// `DeviceError::InvalidConfiguration` if the mapping is inconsistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avr_soundmode::ModeMap;
    ///
    /// let map = ModeMap::from_json(r#"[["MUSIC", ["PLII MUSIC"]], ["STEREO", ["STEREO"]]]"#)
    ///     .unwrap();
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<(String, Vec<String>)> =
            serde_json::from_str(json).map_err(ParseError::Json)?;
        Ok(Self::new(entries)?)
    }

    /// Returns the normalized mode names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the raw aliases of a mode.
    #[must_use]
    pub fn aliases(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, aliases)| aliases.as_slice())
    }

    /// Returns `true` if a mode with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    /// Iterates over `(name, aliases)` entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, aliases)| (name.as_str(), aliases.as_slice()))
    }

    /// Returns the number of modes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no modes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the reverse index of this map.
    #[must_use]
    pub fn reverse_index(&self) -> ReverseIndex {
        ReverseIndex::from(self)
    }

    /// Registers an unknown raw mode as a mode of its own.
    ///
    /// `raw` must already be uppercased. If a mode with that name exists,
    /// `raw` is appended to its aliases instead.
    pub(crate) fn insert_raw(&mut self, raw: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == raw) {
            Some((_, aliases)) => {
                if !aliases.iter().any(|alias| alias == raw) {
                    aliases.push(raw.to_string());
                }
            }
            None => self.entries.push((raw.to_string(), vec![raw.to_string()])),
        }
    }
}

impl Default for ModeMap {
    /// Returns the built-in mapping for Denon and Marantz receivers.
    fn default() -> Self {
        Self {
            entries: DEFAULT_SOUND_MODES
                .iter()
                .map(|(name, aliases)| {
                    (
                        (*name).to_string(),
                        aliases.iter().map(|alias| (*alias).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<(String, Vec<String>)>> for ModeMap {
    type Error = DeviceError;

    fn try_from(entries: Vec<(String, Vec<String>)>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ModeMap> for Vec<(String, Vec<String>)> {
    fn from(map: ModeMap) -> Self {
        map.entries
    }
}

/// Index from uppercased raw sound modes to normalized mode names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    modes: HashMap<String, String>,
}

impl ReverseIndex {
    /// Returns the normalized mode for a raw mode, ignoring case.
    #[must_use]
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.modes.get(&raw.to_uppercase()).map(String::as_str)
    }

    /// Returns the number of raw modes in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Returns `true` if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Returns a copy of the index as a plain map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.modes.clone()
    }
}

impl From<&ModeMap> for ReverseIndex {
    fn from(map: &ModeMap) -> Self {
        let modes = map
            .iter()
            .flat_map(|(name, aliases)| {
                aliases
                    .iter()
                    .map(move |alias| (alias.to_uppercase(), name.to_string()))
            })
            .collect();
        Self { modes }
    }
}
