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

//! Validate command - read a GEDCOM file and report what was found

use super::{load, read_failure};
use crate::error::CliError;
use colored::Colorize;
use gedkit_core::{Charset, Diagnostic, Document};
use serde_json::json;
use std::collections::BTreeMap;

/// Validate a GEDCOM file.
///
/// Reads the file with full recovery and prints a summary: the encoding the
/// bytes were decoded with, the record counts per tag and every diagnostic.
/// With `json`, the same report is printed as a JSON object instead.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or the read stops with a fatal
/// error. Diagnostics gathered before the failure are still printed.
///
/// # Examples
///
/// ```no_run
/// use gedkit_cli::commands::validate;
///
/// # fn main() -> Result<(), gedkit_cli::error::CliError> {
/// validate("family.ged", None, false)?;
/// # Ok(())
/// # }
/// ```
pub fn validate(file: &str, password: Option<&str>, json: bool) -> Result<(), CliError> {
    match load(file, password) {
        Ok(doc) => {
            if json {
                print_json_report(file, &doc)?;
            } else {
                print_report(file, &doc);
            }
            Ok(())
        }
        Err(failure) => {
            if json {
                let report = json!({
                    "file": file,
                    "valid": false,
                    "error": failure.error.to_string(),
                    "line": failure.error.line(),
                    "diagnostics": &failure.diagnostics,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} {}", "✗".red().bold(), file);
                print_diagnostics(&failure.diagnostics);
            }
            Err(read_failure(file, failure))
        }
    }
}

/// Level-0 record counts per tag, the header excluded.
fn record_counts(doc: &Document) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for record in doc.records().iter().skip(1) {
        *counts.entry(record.tag.as_str()).or_insert(0) += 1;
    }
    counts
}

fn print_report(file: &str, doc: &Document) {
    let counts = record_counts(doc);
    let total: usize = counts.values().sum();

    println!("{} {}", "✓".green().bold(), file);
    match doc.declared_charset() {
        Some(declared) if Charset::from_declared(declared) != Some(doc.charset()) => {
            println!("  Encoding: {} (declared {})", doc.charset(), declared);
        }
        _ => println!("  Encoding: {}", doc.charset()),
    }
    println!("  Records: {}", total);
    for (tag, count) in &counts {
        println!("    {}: {}", tag, count);
    }
    if let Some(id) = doc.submitter_id() {
        println!("  Submitter: @{}@", id);
    }
    if let Some(language) = doc.language() {
        println!("  Language: {}", language);
    }
    print_diagnostics(doc.diagnostics());
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  Diagnostics: {}", diagnostics.len());
    for diagnostic in diagnostics {
        println!(
            "    {} {}",
            format!("[{}]", diagnostic.kind).yellow(),
            diagnostic
        );
    }
}

fn print_json_report(file: &str, doc: &Document) -> Result<(), CliError> {
    let counts = record_counts(doc);
    let report = json!({
        "file": file,
        "valid": true,
        "encoding": doc.charset().label(),
        "declared_charset": doc.declared_charset(),
        "records": counts.values().sum::<usize>(),
        "record_counts": counts,
        "submitter": doc.submitter_id(),
        "language": doc.language(),
        "diagnostics": doc.diagnostics(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
