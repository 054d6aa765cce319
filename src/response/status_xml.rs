// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Legacy XML status page parsing.
//!
//! Older receivers publish their main zone state as a flat XML page:
//!
//! ```xml
//! <item>
//!   <Power><value>ON</value></Power>
//!   <selectSurround><value>STEREO   </value></selectSurround>
//! </item>
//! ```
//!
//! Fields are addressed by simple element paths relative to the root
//! element, such as `./selectSurround/value`.

use roxmltree::{Document, Node};

use crate::error::ParseError;

/// A parsed status page.
#[derive(Debug)]
pub struct StatusXml<'input> {
    document: Document<'input>,
}

impl<'input> StatusXml<'input> {
    /// Parses a status page body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Xml` if the body is not well-formed XML.
    pub fn parse(body: &'input str) -> Result<Self, ParseError> {
        let document = Document::parse(body)?;
        Ok(Self { document })
    }

    /// Returns the text of the element at `path`, if present and non-empty.
    ///
    /// The path is a `/`-separated list of element names relative to the
    /// root element. A leading `./` is optional. Element names are matched
    /// exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use avr_soundmode::response::StatusXml;
    ///
    /// let body = "<item><SurrMode><value>DOLBY DIGITAL</value></SurrMode></item>";
    /// let page = StatusXml::parse(body).unwrap();
    ///
    /// assert_eq!(page.find("./SurrMode/value"), Some("DOLBY DIGITAL"));
    /// assert_eq!(page.find("./selectSurround/value"), None);
    /// ```
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&str> {
        let node = find_path(self.document.root_element(), path)?;
        node.text().filter(|text| !text.is_empty())
    }
}

fn find_path<'a, 'input>(root: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let path = path.strip_prefix("./").unwrap_or(path);

    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .try_fold(root, |node, segment| {
            node.children()
                .filter(Node::is_element)
                .find(|child| child.tag_name().name() == segment)
        })
}
