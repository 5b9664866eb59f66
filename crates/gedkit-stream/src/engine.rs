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

//! The read engine.
//!
//! [`GedcomReader`] runs one read: it detects the charset, builds the
//! document, then links references. The input stream is owned by the read
//! and dropped before `read` returns, whatever the outcome.

use crate::builder::Builder;
use crate::control::{Monitored, ReadControl, ReadHandle};
use crate::error::ReadFailure;
use crate::gate::DecryptionGate;
use crate::linker::link_all;
use crate::options::ReadOptions;
use crate::reader::LineReader;
use crate::sniff::{sniff, SNIFF_LEN};
use crate::tokenizer::{LevelMode, Tokenizer};
use gedkit_core::{Diagnostics, Document, GedcomError, GedcomResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A single-use document reader.
///
/// `read` consumes the reader, so one instance builds at most one document.
/// Obtain a [`ReadHandle`] first to watch progress or cancel from another
/// thread.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::{GedcomReader, ReadOptions};
/// use std::io::Cursor;
///
/// let input = "0 HEAD\n1 CHAR UTF-8\n0 @I1@ INDI\n1 NAME Ann /Lee/\n1 FAMS @F1@\n0 @F1@ FAM\n1 WIFE @I1@\n0 TRLR\n";
/// let doc = GedcomReader::new(ReadOptions::default())
///     .read(Cursor::new(input))
///     .unwrap();
///
/// let wife = &doc.record_by_xref("F1").unwrap().children[0];
/// assert_eq!(doc.resolve(wife).unwrap().xref.as_deref(), Some("I1"));
/// assert!(doc.diagnostics().is_empty());
/// ```
#[derive(Debug)]
pub struct GedcomReader {
    options: ReadOptions,
    control: Arc<ReadControl>,
}

impl GedcomReader {
    /// Create a reader.
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            control: Arc::new(ReadControl::default()),
        }
    }

    /// A handle to this reader's progress and cancellation flag.
    pub fn handle(&self) -> ReadHandle {
        ReadHandle::new(self.control.clone())
    }

    /// Read a document from a byte stream.
    ///
    /// On failure the diagnostics gathered before the fatal error are
    /// returned with it.
    pub fn read<R: Read>(self, input: R) -> Result<Document, ReadFailure> {
        let mut diagnostics = Diagnostics::new();
        match self.run(input, &mut diagnostics) {
            Ok(mut document) => {
                document.set_diagnostics(diagnostics.into_vec());
                self.control.finish();
                info!(
                    records = document.records().len(),
                    diagnostics = document.diagnostics().len(),
                    charset = %document.charset(),
                    "document read"
                );
                Ok(document)
            }
            Err(error) => {
                if error.is_cancelled() {
                    info!(%error, "read cancelled");
                } else {
                    warn!(%error, diagnostics = diagnostics.len(), "read failed");
                }
                Err(ReadFailure {
                    error,
                    diagnostics: diagnostics.into_vec(),
                })
            }
        }
    }

    fn run<R: Read>(&self, input: R, diagnostics: &mut Diagnostics) -> GedcomResult<Document> {
        let mut input = Monitored::new(input, self.control.clone(), self.options.size_hint);

        let mut prefix = Vec::with_capacity(SNIFF_LEN);
        (&mut input)
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut prefix)
            .map_err(|e| self.io_error(e, 0))?;
        let sniffed = sniff(&prefix);
        debug!(
            charset = %sniffed.charset,
            bom = sniffed.bom_len > 0,
            declared = ?sniffed.declared,
            "charset detected"
        );

        let lines = LineReader::with_capacity(input, sniffed.charset, self.options.buffer_size)
            .with_prefix(&prefix[sniffed.bom_len..])
            .with_control(self.control.clone());
        let tokens = Tokenizer::new(lines, LevelMode::Numbered, self.options.limits.max_line_length);
        let mut builder = Builder::new(
            tokens,
            DecryptionGate::new(self.options.password.clone()),
            self.options.limits.clone(),
            diagnostics,
        );
        let built = builder.build_document(sniffed.charset);
        // Dropping the builder closes the input.
        let gate = builder.finish();
        let (mut document, worklist) = built?;
        document.set_password(gate.into_password());

        debug!(references = worklist.len(), "linking");
        link_all(worklist, &mut document, diagnostics, &self.control)?;
        Ok(document)
    }

    fn io_error(&self, error: std::io::Error, line: usize) -> GedcomError {
        if self.control.is_cancelled() {
            GedcomError::Cancelled { line }
        } else {
            GedcomError::Io(error)
        }
    }
}

/// Read a document from a byte stream with the given options.
pub fn read_document<R: Read>(input: R, options: ReadOptions) -> Result<Document, ReadFailure> {
    GedcomReader::new(options).read(input)
}

/// Read a document from a file.
///
/// The file size is used as the progress size hint unless one is set.
pub fn read_file(path: impl AsRef<Path>, mut options: ReadOptions) -> Result<Document, ReadFailure> {
    let path = path.as_ref();
    let file = File::open(path).map_err(GedcomError::Io)?;
    if options.size_hint.is_none() {
        options.size_hint = file.metadata().ok().map(|m| m.len());
    }
    debug!(path = %path.display(), "opening");
    read_document(file, options)
}
