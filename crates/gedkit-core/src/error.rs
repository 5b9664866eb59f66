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

//! Error types for GEDCOM ingestion.
//!
//! [`GedcomError`] is the stream-fatal error: when one is raised the read is
//! abandoned and no document is produced. Record-local defects never surface
//! as a `GedcomError`; they are downgraded to [`Diagnostic`](crate::Diagnostic)s
//! by the builder.
//!
//! [`LinkError`] is raised by the reference resolution primitive
//! ([`Node::link`](crate::Node::link)) and is always recoverable.

use thiserror::Error;

/// Errors that abort a document read.
///
/// Most variants carry the physical line number at which the failure was
/// detected; use [`line()`](Self::line) to extract it uniformly.
///
/// # Examples
///
/// ```rust
/// use gedkit_core::GedcomError;
///
/// let err = GedcomError::syntax(42, "level is not a number");
/// assert_eq!(err.line(), Some(42));
/// assert!(format!("{}", err).contains("line 42"));
/// ```
#[derive(Error, Debug)]
pub enum GedcomError {
    /// The underlying byte stream could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be tokenized outside any recoverable region.
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// The document does not start with a well-formed header record.
    #[error("Invalid header at line {line}: {message}")]
    Header { line: usize, message: String },

    /// The document does not end with a well-formed trailer record.
    #[error("Invalid trailer at line {line}: {message}")]
    Trailer { line: usize, message: String },

    /// An encrypted field was found while the password is flagged as wrong.
    #[error("Password required at line {line}: the supplied password is known to be wrong")]
    PasswordRequired { line: usize },

    /// An encrypted field could not be decrypted with an accepted password.
    #[error("Decryption failed at line {line}: {message}")]
    Decryption { line: usize, message: String },

    /// The read was cancelled through its handle.
    #[error("Read cancelled at line {line}")]
    Cancelled { line: usize },

    /// A document-wide resource limit was exceeded.
    #[error("Limit exceeded at line {line}: {message}")]
    Limit { line: usize, message: String },
}

impl GedcomError {
    /// Create a syntax error.
    #[inline]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Create a header error.
    #[inline]
    pub fn header(line: usize, message: impl Into<String>) -> Self {
        Self::Header {
            line,
            message: message.into(),
        }
    }

    /// Create a trailer error.
    #[inline]
    pub fn trailer(line: usize, message: impl Into<String>) -> Self {
        Self::Trailer {
            line,
            message: message.into(),
        }
    }

    /// Create a decryption error.
    #[inline]
    pub fn decryption(line: usize, message: impl Into<String>) -> Self {
        Self::Decryption {
            line,
            message: message.into(),
        }
    }

    /// Create a limit error.
    #[inline]
    pub fn limit(line: usize, message: impl Into<String>) -> Self {
        Self::Limit {
            line,
            message: message.into(),
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::Syntax { line, .. }
            | Self::Header { line, .. }
            | Self::Trailer { line, .. }
            | Self::PasswordRequired { line }
            | Self::Decryption { line, .. }
            | Self::Cancelled { line }
            | Self::Limit { line, .. } => Some(*line),
        }
    }

    /// Whether this error reports a cancellation rather than a defect.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type for fatal read errors.
pub type GedcomResult<T> = Result<T, GedcomError>;

/// Errors raised while binding a pointer to its target record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// No record carries the referenced id.
    #[error("unresolved reference @{id}@")]
    Unresolved { id: String },

    /// The referenced record exists but has the wrong type for this pointer.
    #[error("reference @{id}@ points to a {found} record, expected {expected}")]
    WrongTarget {
        id: String,
        expected: &'static str,
        found: String,
    },

    /// The node does not hold a pointer.
    #[error("{tag} does not carry a reference")]
    NotAPointer { tag: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Line extraction ====================

    #[test]
    fn test_line_for_line_tagged_variants() {
        assert_eq!(GedcomError::syntax(3, "x").line(), Some(3));
        assert_eq!(GedcomError::header(1, "x").line(), Some(1));
        assert_eq!(GedcomError::trailer(9, "x").line(), Some(9));
        assert_eq!(GedcomError::decryption(7, "x").line(), Some(7));
        assert_eq!(GedcomError::limit(5, "x").line(), Some(5));
        assert_eq!(GedcomError::PasswordRequired { line: 4 }.line(), Some(4));
        assert_eq!(GedcomError::Cancelled { line: 2 }.line(), Some(2));
    }

    #[test]
    fn test_io_has_no_line() {
        let err = GedcomError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.line(), None);
        assert!(!err.is_cancelled());
    }

    // ==================== Display ====================

    #[test]
    fn test_display_includes_line_and_message() {
        let msg = GedcomError::header(1, "expected 0 HEAD").to_string();
        assert!(msg.contains("line 1"));
        assert!(msg.contains("expected 0 HEAD"));
    }

    #[test]
    fn test_cancelled_flag() {
        assert!(GedcomError::Cancelled { line: 10 }.is_cancelled());
    }

    #[test]
    fn test_link_error_display() {
        let err = LinkError::WrongTarget {
            id: "I1".into(),
            expected: "FAM",
            found: "INDI".into(),
        };
        assert_eq!(
            err.to_string(),
            "reference @I1@ points to a INDI record, expected FAM"
        );
    }
}
