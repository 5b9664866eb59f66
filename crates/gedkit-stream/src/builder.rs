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

//! Hierarchical builder.
//!
//! Turns the token stream into level-0 records. The document is read as
//! `HEADER (RECORD)* TRAILER`:
//!
//! - The first token must be `0 HEAD`; any defect in the header is fatal.
//! - Each following level-0 token starts a record, built recursively from the
//!   tokens below it. A record that cannot be built is discarded: the builder
//!   skips ahead to the next level-0 line and records one diagnostic naming
//!   the skipped lines.
//! - `0 TRLR` ends the read; nothing after it is consumed. End of input before
//!   the trailer is fatal.
//!
//! Children may sit more than one level below their parent. The node is kept
//! at the level it was written with and a diagnostic is recorded.
//!
//! Diagnostics raised while a record is built are staged and only committed
//! once the record is accepted, so a discarded record leaves nothing behind
//! but its skip summary.
//!
//! While building, every pointer node is queued on the worklist for the
//! linker, in file order.

use crate::error::{LineError, RecordError};
use crate::gate::DecryptionGate;
use crate::linker::PendingRef;
use crate::multiline::LineCollector;
use crate::reader::LineSource;
use crate::tokenizer::{Token, Tokenizer};
use gedkit_core::tags::{HEAD, TRLR};
use gedkit_core::{
    Charset, DiagnosticKind, Diagnostics, Document, GedcomError, GedcomResult, Limits, Node,
    NodePath, RecordId,
};
use tracing::{debug, trace};

/// A pointer found while building a record: its line and its child path.
type LocalRef = (usize, Vec<usize>);

/// A record built in isolation, before it joins the document.
struct Built {
    node: Node,
    refs: Vec<LocalRef>,
}

impl Built {
    fn into_pending(self, record: RecordId) -> (Node, impl Iterator<Item = PendingRef>) {
        let refs = self.refs.into_iter().map(move |(line, path)| PendingRef {
            line,
            node: NodePath { record, path },
        });
        (self.node, refs)
    }
}

/// Builds records from tokens, owning the decryption state of one read.
pub(crate) struct Builder<'d, S> {
    tokens: Tokenizer<S>,
    gate: DecryptionGate,
    limits: Limits,
    diagnostics: &'d mut Diagnostics,
    /// Diagnostics of the record being built.
    staged: Diagnostics,
}

impl<'d, S: LineSource> Builder<'d, S> {
    pub(crate) fn new(
        tokens: Tokenizer<S>,
        gate: DecryptionGate,
        limits: Limits,
        diagnostics: &'d mut Diagnostics,
    ) -> Self {
        Self {
            tokens,
            gate,
            limits,
            diagnostics,
            staged: Diagnostics::new(),
        }
    }

    /// Release the token stream and return the decryption state.
    pub(crate) fn finish(self) -> DecryptionGate {
        self.gate
    }

    /// Read a whole document, returning it with its reference worklist.
    pub(crate) fn build_document(
        &mut self,
        charset: Charset,
    ) -> GedcomResult<(Document, Vec<PendingRef>)> {
        let header = self.read_header()?;
        let (header, header_refs) = header.into_pending(RecordId(0));
        let mut worklist: Vec<PendingRef> = header_refs.collect();
        let mut document = Document::new(header, charset);
        debug!(
            submitter = ?document.submitter_id(),
            language = ?document.language(),
            "header read"
        );

        self.read_records(&mut document, &mut worklist)?;
        debug!(
            records = document.records().len(),
            references = worklist.len(),
            "records read"
        );
        Ok((document, worklist))
    }

    /// Read a fragment in which every token is a top-level node or below one.
    pub(crate) fn build_fragment(&mut self) -> GedcomResult<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            let token = match self.tokens.next_token() {
                Ok(Some(token)) => token,
                Ok(None) => return Ok(nodes),
                Err(e) => return Err(e.into_fatal()),
            };
            let built = self.build_record(token);
            self.commit();
            nodes.push(built.map_err(RecordError::into_fatal)?.node);
        }
    }

    fn read_header(&mut self) -> GedcomResult<Built> {
        let first = match self.tokens.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(GedcomError::header(0, "document is empty")),
            Err(RecordError::Malformed(e)) => return Err(GedcomError::header(e.line, e.message)),
            Err(RecordError::Fatal(e)) => return Err(e),
        };
        if first.level != 0 || first.tag != HEAD {
            return Err(GedcomError::header(
                first.line,
                format!("expected '0 {}', found '{} {}'", HEAD, first.level, first.tag),
            ));
        }
        let built = self.build_record(first);
        self.commit();
        built.map_err(|e| match e {
            RecordError::Malformed(e) => GedcomError::header(e.line, e.message),
            RecordError::Fatal(e) => e,
        })
    }

    fn read_records(
        &mut self,
        document: &mut Document,
        worklist: &mut Vec<PendingRef>,
    ) -> GedcomResult<()> {
        loop {
            let mark = self.tokens.consumed();
            let mut token = match self.tokens.next_token() {
                Ok(Some(token)) => token,
                Ok(None) => {
                    return Err(GedcomError::trailer(
                        self.tokens.line_number(),
                        format!("end of input before '0 {}'", TRLR),
                    ))
                }
                Err(RecordError::Malformed(e)) => {
                    self.recover(e.line, mark, e)?;
                    continue;
                }
                Err(RecordError::Fatal(e)) => return Err(e),
            };

            if token.level != 0 {
                let start = token.line;
                let err = LineError::new(
                    start,
                    format!("expected a level-0 record, found level {}", token.level),
                );
                self.recover(start, mark, err)?;
                continue;
            }
            if token.tag == TRLR {
                trace!(line = token.line, "trailer");
                return Ok(());
            }
            if document.records().len() > self.limits.max_records {
                return Err(GedcomError::limit(
                    token.line,
                    format!("more than {} records", self.limits.max_records),
                ));
            }

            if token.xref.as_deref() == Some("") {
                self.staged.push(
                    token.line,
                    DiagnosticKind::MissingXref,
                    format!("{} record has an empty cross-reference id", token.tag),
                );
                token.xref = None;
            } else if token.xref.is_none() {
                self.staged.push(
                    token.line,
                    DiagnosticKind::MissingXref,
                    format!("{} record has no cross-reference id", token.tag),
                );
            }

            let start = token.line;
            match self.build_record(token) {
                Ok(built) => {
                    self.commit();
                    let xref = built.node.xref.clone();
                    let line = built.node.line;
                    let (record, refs) = built.into_pending(RecordId(document.records().len()));
                    trace!(line, tag = %record.tag, "record built");
                    let (_, duplicate) = document.push_record(record);
                    if let (Some(first), Some(id)) = (duplicate, xref) {
                        self.diagnostics.push(
                            line,
                            DiagnosticKind::DuplicateXref,
                            format!(
                                "duplicate id @{}@, first defined at line {}; references resolve to the first",
                                id, first
                            ),
                        );
                    }
                    worklist.extend(refs);
                }
                Err(RecordError::Malformed(e)) => {
                    trace!(line = start, dropped = self.staged.len(), "record discarded");
                    self.staged.clear();
                    self.recover(start, mark, e)?;
                }
                Err(RecordError::Fatal(e)) => {
                    self.commit();
                    return Err(e);
                }
            }
        }
    }

    /// Move the staged diagnostics of an accepted record to the sink.
    fn commit(&mut self) {
        self.diagnostics.append(&mut self.staged);
    }

    /// Skip to the next level-0 line after a malformed record.
    fn recover(&mut self, start: usize, mark: usize, err: LineError) -> GedcomResult<()> {
        let last = self.tokens.skip_to_level_zero()?.unwrap_or(err.line);
        let skipped = self.tokens.consumed() - mark;
        self.diagnostics.push(
            start,
            DiagnosticKind::SkippedRecord,
            format!(
                "skipped {} line(s) {}-{}: line {}: {}",
                skipped, start, last, err.line, err.message
            ),
        );
        Ok(())
    }

    /// Build a record and its subtree.
    ///
    /// `open` holds the chain of nodes below `root` that may still take
    /// children, deepest last; `path` holds their child indices. A node joins
    /// its parent once a token at its level or above closes it.
    fn build_record(&mut self, first: Token) -> Result<Built, RecordError> {
        let mut refs = Vec::new();
        let mut root = self.create_node(first)?;
        if root.pointer().is_some() {
            refs.push((root.line, Vec::new()));
        }
        let mut open: Vec<Node> = Vec::new();
        let mut path: Vec<usize> = Vec::new();

        while let Some(token) = self.tokens.next_token()? {
            if token.level <= root.level {
                self.tokens.push_back(token);
                break;
            }
            while open.last().is_some_and(|node| token.level <= node.level) {
                close_innermost(&mut root, &mut open, &mut path);
            }

            if open.len() >= self.limits.max_depth {
                return Err(LineError::new(
                    token.line,
                    format!("nesting deeper than {} levels", self.limits.max_depth),
                )
                .into());
            }
            let parent = open.last().unwrap_or(&root);
            if token.level > parent.level + 1 {
                self.staged.push(
                    token.line,
                    DiagnosticKind::Indentation,
                    format!(
                        "{} at level {} is nested {} levels below its parent {}",
                        token.tag,
                        token.level,
                        token.level - parent.level,
                        parent.tag
                    ),
                );
            }
            let index = parent.children.len();

            let child = self.create_node(token)?;
            path.push(index);
            if child.pointer().is_some() {
                refs.push((child.line, path.clone()));
            }
            open.push(child);
        }

        while !open.is_empty() {
            close_innermost(&mut root, &mut open, &mut path);
        }
        Ok(Built { node: root, refs })
    }

    /// Make a node from a token, assembling and decrypting its value.
    fn create_node(&mut self, token: Token) -> Result<Node, RecordError> {
        let mut node = Node::new(token.level, token.tag, token.xref, token.value, token.line);
        if node.collects_lines() {
            self.collect_lines(&mut node)?;
        }
        self.gate.apply(&mut node, &mut self.staged)?;
        Ok(node)
    }

    fn collect_lines(&mut self, node: &mut Node) -> Result<(), RecordError> {
        let mut collector = LineCollector::new(node.level, std::mem::take(&mut node.value));
        while let Some(token) = self.tokens.next_token()? {
            if !collector.absorb(&token) {
                self.tokens.push_back(token);
                break;
            }
        }
        if collector.absorbed() > 0 {
            trace!(line = node.line, lines = collector.absorbed(), "continuation lines");
        }
        node.value = collector.finish();
        Ok(())
    }
}

/// Attach the deepest open node to its parent.
fn close_innermost(root: &mut Node, open: &mut Vec<Node>, path: &mut Vec<usize>) {
    if let Some(node) = open.pop() {
        path.pop();
        open.last_mut().unwrap_or(root).children.push(node);
    }
}
