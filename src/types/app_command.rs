// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands of the `AppCommand.xml` interface.
//!
//! AVR-X receivers from 2016 on answer status queries through a single
//! `AppCommand.xml` endpoint. Several commands can be aggregated into one
//! request:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <tx><cmd id="1">GetSurroundModeStatus</cmd></tx>
//! ```
//!
//! Each command is answered by a `<cmd>` element holding a command specific
//! tag, e.g. `<rx><cmd><surround>STEREO</surround></cmd></rx>`.

use std::fmt;

/// A status query understood by the `AppCommand.xml` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AppCommand {
    /// Queries the current surround (sound) mode.
    GetSurroundModeStatus,
}

impl AppCommand {
    /// Returns the command name sent inside the `<cmd>` element.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetSurroundModeStatus => "GetSurroundModeStatus",
        }
    }

    /// Returns the tag holding the answer in the response `<cmd>` element.
    #[must_use]
    pub const fn response_tag(&self) -> &'static str {
        match self {
            Self::GetSurroundModeStatus => "surround",
        }
    }
}

impl fmt::Display for AppCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
