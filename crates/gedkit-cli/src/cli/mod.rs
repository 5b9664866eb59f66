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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use gedkit_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a GEDCOM file
    ///
    /// Reads the whole file and prints the detected encoding, the record
    /// counts and every diagnostic. Exits non-zero when the read fails.
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Password for encrypted fields
        #[arg(short, long)]
        password: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the record tree of a GEDCOM file
    Inspect {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Password for encrypted fields
        #[arg(short, long)]
        password: Option<String>,

        /// Deepest level shown below each record (0 shows records only)
        #[arg(short, long, value_name = "N")]
        depth: Option<usize>,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read or the read hits a fatal error.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Validate {
                file,
                password,
                json,
            } => commands::validate(&file, password.as_deref(), json),
            Commands::Inspect {
                file,
                password,
                depth,
            } => commands::inspect(&file, password.as_deref(), depth),
        }
    }
}
