// Dweve GEDKIT - Genealogical Data Ingestion Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The parsed document.

use crate::charset::Charset;
use crate::diagnostic::Diagnostic;
use crate::node::{Node, RecordId};
use crate::password::Password;
use crate::reference::XrefIndex;
use crate::tags::{CHAR, LANG, SUBM};

/// Address of a node: a record plus a path of child indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    /// The level-0 record.
    pub record: RecordId,
    /// Child indices from the record down to the node.
    pub path: Vec<usize>,
}

/// A parsed GEDCOM document.
///
/// Holds the level-0 records in file order (the header first, the trailer is
/// not kept), the id index, the charset the bytes were decoded with, the
/// password state the read ended in and the diagnostics it produced.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    records: Vec<Node>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: XrefIndex,
    charset: Charset,
    #[cfg_attr(feature = "serde", serde(skip))]
    password: Password,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Create a document from its header record.
    pub fn new(header: Node, charset: Charset) -> Self {
        Self {
            records: vec![header],
            index: XrefIndex::new(),
            charset,
            password: Password::Unknown,
            diagnostics: Vec::new(),
        }
    }

    /// Append a level-0 record, indexing its id.
    ///
    /// Returns the new record's id, and the line of an earlier record with
    /// the same xref when the id was already taken (the earlier one stays
    /// indexed).
    pub fn push_record(&mut self, record: Node) -> (RecordId, Option<usize>) {
        let id = RecordId(self.records.len());
        let duplicate = match &record.xref {
            Some(xref) => self
                .index
                .register(xref, &record.tag, id, record.line)
                .err(),
            None => None,
        };
        self.records.push(record);
        (id, duplicate)
    }

    /// The header record.
    pub fn header(&self) -> &Node {
        &self.records[0]
    }

    /// All level-0 records, header first.
    pub fn records(&self) -> &[Node] {
        &self.records
    }

    /// A record by id.
    pub fn record(&self, id: RecordId) -> Option<&Node> {
        self.records.get(id.0)
    }

    /// A record by its cross-reference id.
    pub fn record_by_xref(&self, xref: &str) -> Option<&Node> {
        self.index.get(xref).and_then(|e| self.record(e.record))
    }

    /// Records with the given tag.
    pub fn records_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.records.iter().filter(move |r| r.tag == tag)
    }

    /// The record a pointer node was linked to.
    pub fn resolve(&self, node: &Node) -> Option<&Node> {
        node.target().and_then(|id| self.record(id))
    }

    /// Split borrow of a node by path and the id index, for linking.
    pub fn node_for_link(&mut self, path: &NodePath) -> (Option<&mut Node>, &XrefIndex) {
        let node = self
            .records
            .get_mut(path.record.0)
            .and_then(|r| r.descend_mut(&path.path));
        (node, &self.index)
    }

    /// The id index.
    pub fn index(&self) -> &XrefIndex {
        &self.index
    }

    /// The charset the document was decoded with.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// The `CHAR` value declared in the header.
    pub fn declared_charset(&self) -> Option<&str> {
        self.header().child(CHAR).map(|n| n.value.as_str())
    }

    /// The submitter named by the header, once linked.
    pub fn submitter(&self) -> Option<&Node> {
        self.header().child(SUBM).and_then(|n| self.resolve(n))
    }

    /// The raw submitter id named by the header.
    pub fn submitter_id(&self) -> Option<&str> {
        self.header()
            .child(SUBM)
            .and_then(|n| n.pointer())
            .map(|p| p.id.as_str())
    }

    /// The `LANG` value declared in the header.
    pub fn language(&self) -> Option<&str> {
        self.header().child(LANG).map(|n| n.value.as_str())
    }

    /// Password state the read ended in.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Set the password state the read ended in.
    pub fn set_password(&mut self, password: Password) {
        self.password = password;
    }

    /// Diagnostics collected while reading.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Attach the diagnostics collected while reading.
    pub fn set_diagnostics(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics = diagnostics;
    }
}
