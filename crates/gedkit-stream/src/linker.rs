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

//! Cross-reference linking.
//!
//! Runs once the whole document is built. Each queued pointer is bound to its
//! record in discovery order; a pointer that does not resolve is left unbound
//! with a diagnostic and linking carries on.

use crate::control::ReadControl;
use gedkit_core::{
    DiagnosticKind, Diagnostics, Document, GedcomError, GedcomResult, LinkError, NodePath,
};
use tracing::debug;

/// A pointer waiting to be linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRef {
    /// Line the pointer was written on.
    pub line: usize,
    /// Where the pointer node sits in the document.
    pub node: NodePath,
}

/// Link every pending reference, returning how many resolved.
pub(crate) fn link_all(
    worklist: Vec<PendingRef>,
    document: &mut Document,
    diagnostics: &mut Diagnostics,
    control: &ReadControl,
) -> GedcomResult<usize> {
    let total = worklist.len();
    let mut linked = 0;

    for (done, pending) in worklist.into_iter().enumerate() {
        if control.is_cancelled() {
            return Err(GedcomError::Cancelled { line: pending.line });
        }
        let (node, index) = document.node_for_link(&pending.node);
        let Some(node) = node else {
            continue;
        };
        match node.link(index) {
            Ok(_) => linked += 1,
            Err(e @ LinkError::Unresolved { .. }) => diagnostics.push(
                pending.line,
                DiagnosticKind::UnresolvedReference,
                format!("{}: {}", node.tag, e),
            ),
            Err(e) => diagnostics.push(
                pending.line,
                DiagnosticKind::InconsistentReference,
                format!("{}: {}", node.tag, e),
            ),
        }
        control.report_links(done + 1, total);
    }

    debug!(linked, unresolved = total - linked, "references linked");
    Ok(linked)
}
