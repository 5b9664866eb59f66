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

//! Resource limits for GEDCOM ingestion.

/// Configurable limits for reader safety.
///
/// These bound the resources a single read may consume. Limits that apply to
/// one record (`max_line_length`, `max_depth`) are record-level defects and
/// are recovered like any malformed record; `max_records` aborts the read.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum decoded line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum node nesting depth within one record (default: 100).
    ///
    /// This bounds how many nodes may be open at once, it does not bound
    /// level jumps: a child may sit any number of levels below its parent.
    pub max_depth: usize,
    /// Maximum number of level-0 records (default: 10M).
    pub max_records: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_length: 1024 * 1024, // 1MB
            max_depth: 100,
            max_records: 10_000_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_line_length: usize::MAX,
            max_depth: usize::MAX,
            max_records: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Default limits tests ====================

    #[test]
    fn test_default_max_line_length() {
        assert_eq!(Limits::default().max_line_length, 1024 * 1024);
    }

    #[test]
    fn test_default_max_depth() {
        assert_eq!(Limits::default().max_depth, 100);
    }

    #[test]
    fn test_default_max_records() {
        assert_eq!(Limits::default().max_records, 10_000_000);
    }

    // ==================== Unlimited limits tests ====================

    #[test]
    fn test_unlimited() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_line_length, usize::MAX);
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(limits.max_records, usize::MAX);
    }
}
