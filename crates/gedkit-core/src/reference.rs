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

//! Record-by-id index used to resolve pointers.

use crate::node::RecordId;
use std::collections::HashMap;

/// Where an indexed id lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefEntry {
    /// The record carrying the id.
    pub record: RecordId,
    /// The record's tag, checked against a pointer's expected target.
    pub tag: String,
    /// Line the record was defined at.
    pub line: usize,
}

/// Index from cross-reference id to level-0 record.
#[derive(Debug, Clone, Default)]
pub struct XrefIndex {
    by_id: HashMap<String, XrefEntry>,
}

impl XrefIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id, keeping the first definition.
    ///
    /// Returns `Err(previous_line)` if the id is already taken.
    pub fn register(
        &mut self,
        id: &str,
        tag: &str,
        record: RecordId,
        line: usize,
    ) -> Result<(), usize> {
        if let Some(prev) = self.by_id.get(id) {
            return Err(prev.line);
        }
        self.by_id.insert(
            id.to_string(),
            XrefEntry {
                record,
                tag: tag.to_string(),
                line,
            },
        );
        Ok(())
    }

    /// Look up an id.
    pub fn get(&self, id: &str) -> Option<&XrefEntry> {
        self.by_id.get(id)
    }

    /// Number of indexed ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no id is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut index = XrefIndex::new();
        index.register("I1", "INDI", RecordId(1), 3).unwrap();

        let entry = index.get("I1").unwrap();
        assert_eq!(entry.record, RecordId(1));
        assert_eq!(entry.tag, "INDI");
        assert_eq!(entry.line, 3);
        assert!(index.get("I2").is_none());
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut index = XrefIndex::new();
        index.register("I1", "INDI", RecordId(1), 3).unwrap();
        assert_eq!(index.register("I1", "FAM", RecordId(2), 9), Err(3));

        assert_eq!(index.get("I1").unwrap().record, RecordId(1));
        assert_eq!(index.len(), 1);
    }
}
