// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for receiver sound mode control.
//!
//! # Types
//!
//! - [`ReceiverType`] - Receiver family (AVR, AVR-X, AVR-X 2016)
//! - [`ReceiverUrls`] - HTTP endpoints used for status and commands
//! - [`SoundModeSupport`] - Tri-state sound mode support flag
//! - [`AppCommand`] - Status queries of the `AppCommand.xml` interface
//! - [`CacheId`] - Identifier of one refresh cycle

mod app_command;
mod cache_id;
mod receiver;
mod support;

pub use app_command::AppCommand;
pub use cache_id::CacheId;
pub use receiver::{ReceiverType, ReceiverUrls};
pub use support::SoundModeSupport;
