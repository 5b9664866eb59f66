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

//! GEDKIT command line interface

use clap::Parser;
use gedkit_cli::cli::Commands;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// GEDKIT - Genealogical data ingestion toolkit
///
/// Reads GEDCOM files with encoding detection, error recovery, field
/// decryption and reference checking.
///
/// # Examples
///
/// ```bash
/// # Validate a GEDCOM file
/// gedkit validate family.ged
///
/// # Validate a file with encrypted fields, report as JSON
/// gedkit validate family.ged --password secret --json
///
/// # Show the first two levels of every record
/// gedkit inspect family.ged --depth 2
/// ```
#[derive(Parser)]
#[command(name = "gedkit")]
#[command(author, version, about = "GEDKIT - Genealogical data ingestion toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gedkit=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
