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

//! Indented property fragments.
//!
//! A fragment is a loose piece of record tree written with indentation
//! instead of level numbers, as pasted from a clipboard:
//!
//! ```text
//! NAME Ann /Lee/
//!  GIVN Ann
//! NOTE first line
//!  CONT second line
//! ```
//!
//! Fragments go through the same builder as documents, but have no header,
//! trailer or ids, their pointers are not linked, and a malformed line is
//! fatal since there is no record boundary to recover at.

use crate::builder::Builder;
use crate::gate::DecryptionGate;
use crate::options::ReadOptions;
use crate::reader::TextLines;
use crate::tokenizer::{LevelMode, Tokenizer};
use gedkit_core::{Diagnostic, Diagnostics, GedcomResult, Node};

/// Top-level nodes of a fragment and what was noticed while reading it.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    /// Top-level nodes in order.
    pub nodes: Vec<Node>,
    /// Diagnostics raised while building.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse an indented fragment.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::{read_fragment, ReadOptions};
///
/// let fragment = read_fragment("BIRT\n DATE 1 JAN 1900\n PLAC Leiden\n", &ReadOptions::default()).unwrap();
/// assert_eq!(fragment.nodes.len(), 1);
/// assert_eq!(fragment.nodes[0].child("PLAC").unwrap().value, "Leiden");
/// ```
pub fn read_fragment(text: &str, options: &ReadOptions) -> GedcomResult<Fragment> {
    let mut diagnostics = Diagnostics::new();
    let tokens = Tokenizer::new(
        TextLines::new(text),
        LevelMode::Indented,
        options.limits.max_line_length,
    );
    let nodes = Builder::new(
        tokens,
        DecryptionGate::new(options.password.clone()),
        options.limits.clone(),
        &mut diagnostics,
    )
    .build_fragment()?;
    Ok(Fragment {
        nodes,
        diagnostics: diagnostics.into_vec(),
    })
}
