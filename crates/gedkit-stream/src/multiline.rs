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

//! Continuation-line assembly.
//!
//! A multi-line field's value continues on `CONT` lines (joined with a line
//! break) and `CONC` lines (joined directly). Only continuation lines exactly
//! one level below the field are absorbed. Anything else ends collection.

use crate::tokenizer::Token;
use gedkit_core::tags::continuation_joiner;

/// Accumulates one field's value across continuation lines.
#[derive(Debug)]
pub(crate) struct LineCollector {
    level: usize,
    value: String,
    absorbed: usize,
}

impl LineCollector {
    /// Start collecting for a field at `level` with its first-line value.
    pub(crate) fn new(level: usize, value: String) -> Self {
        Self {
            level,
            value,
            absorbed: 0,
        }
    }

    /// Fold a continuation token into the value.
    ///
    /// Returns `false` and leaves the value untouched when the token does not
    /// continue this field.
    pub(crate) fn absorb(&mut self, token: &Token) -> bool {
        if token.level != self.level + 1 || token.xref.is_some() {
            return false;
        }
        let Some(joiner) = continuation_joiner(&token.tag) else {
            return false;
        };
        self.value.push_str(joiner);
        self.value.push_str(&token.value);
        self.absorbed += 1;
        true
    }

    /// Number of continuation lines absorbed.
    pub(crate) fn absorbed(&self) -> usize {
        self.absorbed
    }

    /// The assembled value.
    pub(crate) fn finish(self) -> String {
        self.value
    }
}
