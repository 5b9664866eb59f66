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

//! Line-tagged warnings for recovered defects.

use std::fmt;
use tracing::warn;

/// The category of a recovered defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiagnosticKind {
    /// A line is nested more than one level deeper than its parent.
    Indentation,
    /// A level-0 record has no cross-reference id.
    MissingXref,
    /// A level-0 record reuses an id already defined earlier.
    DuplicateXref,
    /// A malformed record was discarded up to the next level-0 line.
    SkippedRecord,
    /// An encrypted field was left sealed because no password is known.
    PasswordUnknown,
    /// The supplied password does not open this file's encrypted fields.
    PasswordMismatch,
    /// A pointer names an id no record carries.
    UnresolvedReference,
    /// A pointer names a record of the wrong type.
    InconsistentReference,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Indentation => "indentation",
            Self::MissingXref => "missing-xref",
            Self::DuplicateXref => "duplicate-xref",
            Self::SkippedRecord => "skipped-record",
            Self::PasswordUnknown => "password-unknown",
            Self::PasswordMismatch => "password-mismatch",
            Self::UnresolvedReference => "unresolved-reference",
            Self::InconsistentReference => "inconsistent-reference",
        };
        f.write_str(name)
    }
}

/// A non-fatal, line-tagged warning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Physical line (1-based) the defect was detected at.
    pub line: usize,
    /// Category of the defect.
    pub kind: DiagnosticKind,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Append-only diagnostics sink.
///
/// Entries are kept in emission order. That order is monotonic in line number
/// during the build pass, but the linking pass appends entries for lines seen
/// earlier.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, line: usize, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        warn!(line, %kind, "{}", message);
        self.entries.push(Diagnostic {
            line,
            kind,
            message,
        });
    }

    /// Move every entry of `other` to the end of this sink, leaving it empty.
    ///
    /// Entries were logged when first pushed and are not logged again.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.entries.append(&mut other.entries);
    }

    /// Drop every recorded entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of diagnostics recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View the recorded diagnostics.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Take ownership of the recorded diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut diags = Diagnostics::new();
        diags.push(10, DiagnosticKind::MissingXref, "first");
        diags.push(4, DiagnosticKind::UnresolvedReference, "second");

        let all = diags.as_slice();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].line, 10);
        assert_eq!(all[1].line, 4);
        assert_eq!(all[1].kind, DiagnosticKind::UnresolvedReference);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic {
            line: 12,
            kind: DiagnosticKind::Indentation,
            message: "level jumps from 1 to 3".into(),
        };
        assert_eq!(d.to_string(), "line 12: level jumps from 1 to 3");
        assert_eq!(d.kind.to_string(), "indentation");
    }

    #[test]
    fn test_append_and_clear() {
        let mut committed = Diagnostics::new();
        committed.push(1, DiagnosticKind::MissingXref, "kept");
        let mut staged = Diagnostics::new();
        staged.push(2, DiagnosticKind::Indentation, "moved");

        committed.append(&mut staged);
        assert!(staged.is_empty());
        assert_eq!(committed.len(), 2);
        assert_eq!(committed.as_slice()[1].line, 2);

        committed.clear();
        assert!(committed.is_empty());
    }

    #[test]
    fn test_empty() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert_eq!(diags.len(), 0);
        assert!(diags.into_vec().is_empty());
    }
}
