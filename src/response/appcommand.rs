// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `AppCommand.xml` request building and response parsing.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::error::ParseError;
use crate::types::AppCommand;

/// Builds the request body for a batch of `AppCommand` queries.
///
/// # Examples
///
/// ```
/// use avr_soundmode::response::appcommand_request;
/// use avr_soundmode::types::AppCommand;
///
/// let body = appcommand_request(&[AppCommand::GetSurroundModeStatus]);
/// assert!(body.ends_with(r#"<tx><cmd id="1">GetSurroundModeStatus</cmd></tx>"#));
/// ```
#[must_use]
pub fn appcommand_request(commands: &[AppCommand]) -> String {
    let cmds: String = commands
        .iter()
        .map(|command| format!(r#"<cmd id="1">{}</cmd>"#, command.name()))
        .collect();
    format!(r#"<?xml version="1.0" encoding="utf-8"?><tx>{cmds}</tx>"#)
}

/// Parsed answer of the `AppCommand.xml` interface.
///
/// Maps every command found in the answer to its trimmed-right value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppCommandResponse {
    values: HashMap<AppCommand, String>,
}

impl AppCommandResponse {
    /// Parses a response body for the given commands.
    ///
    /// Commands without a value in the body are simply absent from the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Xml` for malformed XML and
    /// `ParseError::UnexpectedFormat` if the root element is not `<rx>`.
    pub fn parse(body: &str, commands: &[AppCommand]) -> Result<Self, ParseError> {
        let document = Document::parse(body)?;
        let root = document.root_element();
        if root.tag_name().name() != "rx" {
            return Err(ParseError::UnexpectedFormat(format!(
                "expected <rx> root element, got <{}>",
                root.tag_name().name()
            )));
        }

        let values = commands
            .iter()
            .filter_map(|command| {
                find_value(root, command.response_tag())
                    .map(|value| (*command, value.trim_end().to_string()))
            })
            .collect();

        Ok(Self { values })
    }

    /// Returns the value reported for a command.
    #[must_use]
    pub fn get(&self, command: AppCommand) -> Option<&str> {
        self.values.get(&command).map(String::as_str)
    }

    /// Consumes the response and returns the value map.
    #[must_use]
    pub fn into_values(self) -> HashMap<AppCommand, String> {
        self.values
    }
}

fn find_value<'a, 'input>(root: Node<'a, 'input>, tag: &str) -> Option<&'a str> {
    root.children()
        .filter(|node| node.is_element() && node.tag_name().name() == "cmd")
        .flat_map(|cmd| cmd.children())
        .find(|node| node.is_element() && node.tag_name().name() == tag)
        .and_then(|node| node.text())
}
