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

//! Record nodes.

use crate::error::LinkError;
use crate::reference::XrefIndex;
use crate::tags::{xref_id, TagInfo};

/// Index of a level-0 record within its [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecordId(pub usize);

/// A cross-reference held by a pointer node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pointer {
    /// The raw id, without `@` delimiters.
    pub id: String,
    /// The record this pointer was bound to by the linker.
    pub target: Option<RecordId>,
}

/// What a node's tag makes it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    /// A standard single-line field or record.
    Field,
    /// A standard field whose value may span `CONT`/`CONC` lines.
    Text,
    /// A field that points at another record.
    Pointer(Pointer),
    /// A tag outside the standard vocabulary, kept verbatim.
    Opaque,
}

/// Encryption state of a node's value.
///
/// Transitions only forward: `Plain` never changes, `Sealed` may become
/// `Opened` once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Secrecy {
    /// The value was never encrypted.
    #[default]
    Plain,
    /// The value is encrypted and still holds cipher text.
    Sealed,
    /// The value was encrypted and has been decrypted.
    Opened,
}

/// A node in the record tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// Level as written in the file.
    pub level: usize,
    /// The tag.
    pub tag: String,
    /// Cross-reference id of a record (`0 @I1@ INDI`), without delimiters.
    pub xref: Option<String>,
    /// Scalar value, after continuation assembly and decryption.
    pub value: String,
    /// Physical line the node started on.
    pub line: usize,
    /// Node type derived from the tag and value.
    pub kind: NodeKind,
    /// Encryption state of `value`.
    pub secrecy: Secrecy,
    /// Children in file order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node, deriving its kind from the tag registry.
    pub fn new(
        level: usize,
        tag: impl Into<String>,
        xref: Option<String>,
        value: impl Into<String>,
        line: usize,
    ) -> Self {
        let tag = tag.into();
        let value = value.into();
        let kind = classify(&tag, &value);
        Self {
            level,
            tag,
            xref,
            value,
            line,
            kind,
            secrecy: Secrecy::Plain,
            children: Vec::new(),
        }
    }

    /// Whether continuation lines may be folded into this node's value.
    pub fn collects_lines(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }

    /// The pointer this node carries, if any.
    pub fn pointer(&self) -> Option<&Pointer> {
        match &self.kind {
            NodeKind::Pointer(p) => Some(p),
            _ => None,
        }
    }

    /// The record this node was linked to.
    pub fn target(&self) -> Option<RecordId> {
        self.pointer().and_then(|p| p.target)
    }

    /// Whether the value was marked private by encryption.
    pub fn is_private(&self) -> bool {
        self.secrecy != Secrecy::Plain
    }

    /// Mark a plain value as holding cipher text.
    pub fn seal(&mut self) {
        if self.secrecy == Secrecy::Plain {
            self.secrecy = Secrecy::Sealed;
        }
    }

    /// Replace sealed cipher text with the decrypted value.
    ///
    /// The kind is derived again, so a decrypted `@ID@` becomes a pointer.
    pub fn open(&mut self, plain: String) {
        debug_assert_eq!(self.secrecy, Secrecy::Sealed);
        self.kind = classify(&self.tag, &plain);
        self.value = plain;
        self.secrecy = Secrecy::Opened;
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Child at a path of child indices.
    pub fn descend(&self, path: &[usize]) -> Option<&Node> {
        path.iter().try_fold(self, |node, &i| node.children.get(i))
    }

    /// Mutable child at a path of child indices.
    pub fn descend_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get_mut(i))
    }

    /// Depth-first iterator over this node and all its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Bind this pointer node to the record its id names.
    ///
    /// Fails when the node holds no pointer, the id is unknown, or the
    /// record found has a different tag than the pointer's field expects.
    pub fn link(&mut self, index: &XrefIndex) -> Result<RecordId, LinkError> {
        let tag = &self.tag;
        let NodeKind::Pointer(pointer) = &mut self.kind else {
            return Err(LinkError::NotAPointer { tag: tag.clone() });
        };
        let entry = index.get(&pointer.id).ok_or_else(|| LinkError::Unresolved {
            id: pointer.id.clone(),
        })?;
        if let Some(expected) = TagInfo::of(tag).pointer_target {
            if entry.tag != expected {
                return Err(LinkError::WrongTarget {
                    id: pointer.id.clone(),
                    expected,
                    found: entry.tag.clone(),
                });
            }
        }
        pointer.target = Some(entry.record);
        Ok(entry.record)
    }
}

// Drops the subtree iteratively so deep nesting cannot exhaust the stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

fn classify(tag: &str, value: &str) -> NodeKind {
    let info = TagInfo::of(tag);
    if info.pointer_target.is_some() {
        if let Some(id) = xref_id(value) {
            return NodeKind::Pointer(Pointer {
                id: id.to_string(),
                target: None,
            });
        }
    }
    match info {
        TagInfo { multiline: true, .. } => NodeKind::Text,
        TagInfo { known: true, .. } => NodeKind::Field,
        _ => NodeKind::Opaque,
    }
}

/// Depth-first, pre-order node iterator.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
