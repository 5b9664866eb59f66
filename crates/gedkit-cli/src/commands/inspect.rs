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

//! Inspect command - GEDCOM record tree visualization

use super::{load, read_failure};
use crate::error::CliError;
use colored::Colorize;
use gedkit_core::{Document, Node, NodeKind, Secrecy};

/// Print the record tree of a GEDCOM file.
///
/// Every level-0 record is shown with its fields indented below it. `depth`
/// limits how many levels below each record are printed; `Some(0)` prints the
/// records alone. Pointers are shown with the type of the record they
/// resolved to, encrypted fields that stayed sealed are masked.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or the read fails.
///
/// # Examples
///
/// ```no_run
/// use gedkit_cli::commands::inspect;
///
/// # fn main() -> Result<(), gedkit_cli::error::CliError> {
/// inspect("family.ged", None, Some(1))?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &str, password: Option<&str>, depth: Option<usize>) -> Result<(), CliError> {
    let doc = load(file, password).map_err(|failure| read_failure(file, failure))?;

    println!("{}", "GEDCOM Document".bold().underline());
    println!();
    println!("{}  {}", "Encoding:".cyan(), doc.charset());
    if let Some(id) = doc.submitter_id() {
        println!("{} @{}@", "Submitter:".cyan(), id);
    }
    if let Some(language) = doc.language() {
        println!("{}  {}", "Language:".cyan(), language);
    }

    println!();
    println!("{}", "Records:".cyan());
    for record in doc.records() {
        print_node(&doc, record, 0, depth);
    }

    if !doc.diagnostics().is_empty() {
        println!();
        println!("{}", "Diagnostics:".cyan());
        for diagnostic in doc.diagnostics() {
            println!("  {}", diagnostic.to_string().yellow());
        }
    }

    Ok(())
}

fn print_node(doc: &Document, node: &Node, depth: usize, max_depth: Option<usize>) {
    let prefix = "  ".repeat(depth + 1);
    let xref = node
        .xref
        .as_ref()
        .map(|x| format!("{} ", format!("@{}@", x).green()))
        .unwrap_or_default();
    let value = format_value(doc, node);
    if value.is_empty() {
        println!("{}{}{}", prefix, xref, node.tag.yellow());
    } else {
        println!("{}{}{} {}", prefix, xref, node.tag.yellow(), value);
    }

    if node.children.is_empty() {
        return;
    }
    if max_depth.is_some_and(|max| depth >= max) {
        let hidden = node.descendants().count() - 1;
        println!("{}  {}", prefix, format!("... {} nested field(s)", hidden).dimmed());
        return;
    }
    for child in &node.children {
        print_node(doc, child, depth + 1, max_depth);
    }
}

fn format_value(doc: &Document, node: &Node) -> String {
    if node.secrecy == Secrecy::Sealed {
        return "[private]".dimmed().to_string();
    }
    match &node.kind {
        NodeKind::Pointer(pointer) => match doc.resolve(node) {
            Some(target) => format!("{} -> {}", format!("@{}@", pointer.id).green(), target.tag),
            None => format!("{} {}", format!("@{}@", pointer.id).red(), "(unresolved)".dimmed()),
        },
        _ => node.value.replace('\n', "\\n"),
    }
}
