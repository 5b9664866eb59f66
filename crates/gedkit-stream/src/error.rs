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

//! Error types for the reader.
//!
//! The reader distinguishes two failure scopes:
//!
//! - **Record-local** ([`LineError`]): a line that cannot be tokenized, or a
//!   record that breaks a per-record limit. The builder recovers by skipping
//!   to the next level-0 line and records a diagnostic.
//! - **Stream-fatal** ([`GedcomError`]): I/O failure, a broken header or
//!   trailer, decryption failures and cancellation. The read is abandoned.
//!
//! [`ReadFailure`] is what a failed read returns: the fatal error together
//! with every diagnostic collected before it.
//!
//! ```rust
//! use gedkit_stream::{read_document, ReadOptions};
//! use std::io::Cursor;
//!
//! let failure = read_document(Cursor::new("0 HEAD\n0 @I1@ INDI\n"), ReadOptions::default())
//!     .unwrap_err();
//! assert_eq!(failure.error.line(), Some(2));
//! assert!(failure.diagnostics.is_empty());
//! ```

use gedkit_core::{Diagnostic, GedcomError};
use thiserror::Error;

/// A record-local defect, tagged with the physical line it was found on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct LineError {
    /// Physical line number (1-based).
    pub line: usize,
    /// What was wrong with it.
    pub message: String,
}

impl LineError {
    /// Create a line error.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Outcome of building one record: recoverable or not.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The record is malformed and may be skipped.
    #[error(transparent)]
    Malformed(#[from] LineError),
    /// The read cannot continue.
    #[error(transparent)]
    Fatal(#[from] GedcomError),
}

impl RecordError {
    /// Promote a record-local defect to a fatal syntax error.
    pub fn into_fatal(self) -> GedcomError {
        match self {
            Self::Malformed(e) => GedcomError::syntax(e.line, e.message),
            Self::Fatal(e) => e,
        }
    }
}

/// A failed read: the fatal error and the diagnostics gathered before it.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct ReadFailure {
    /// Why the read stopped.
    #[source]
    pub error: GedcomError,
    /// Diagnostics collected up to the failure, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadFailure {
    /// Wrap a fatal error with no diagnostics.
    pub fn new(error: GedcomError) -> Self {
        Self {
            error,
            diagnostics: Vec::new(),
        }
    }

    /// Whether the read was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.error.is_cancelled()
    }
}

impl From<GedcomError> for ReadFailure {
    fn from(error: GedcomError) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gedkit_core::DiagnosticKind;
    use std::error::Error as _;

    #[test]
    fn test_line_error_display() {
        let err = LineError::new(7, "missing tag");
        assert_eq!(err.to_string(), "line 7: missing tag");
    }

    #[test]
    fn test_record_error_from_line_error() {
        let err: RecordError = LineError::new(3, "bad level").into();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn test_record_error_into_fatal() {
        let fatal = RecordError::from(LineError::new(3, "bad level")).into_fatal();
        assert!(matches!(fatal, GedcomError::Syntax { line: 3, .. }));

        let fatal = RecordError::from(GedcomError::Cancelled { line: 9 }).into_fatal();
        assert!(fatal.is_cancelled());
    }

    #[test]
    fn test_read_failure_keeps_diagnostics_and_source() {
        let failure = ReadFailure {
            error: GedcomError::trailer(12, "missing 0 TRLR"),
            diagnostics: vec![Diagnostic {
                line: 4,
                kind: DiagnosticKind::MissingXref,
                message: "INDI record has no cross-reference id".into(),
            }],
        };
        assert!(failure.to_string().contains("line 12"));
        assert!(failure.source().is_some());
        assert_eq!(failure.diagnostics.len(), 1);
        assert!(!failure.is_cancelled());
    }
}
