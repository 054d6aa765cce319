// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for receiver XML responses.
//!
//! Receivers report their state through two XML interfaces:
//!
//! - [`StatusXml`]: legacy main zone status pages, read by element path
//! - [`AppCommandResponse`]: answers of the aggregated `AppCommand.xml` API

mod appcommand;
mod status_xml;

pub use appcommand::{AppCommandResponse, appcommand_request};
pub use status_xml::StatusXml;
