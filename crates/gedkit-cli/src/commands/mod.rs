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

//! CLI command implementations

mod inspect;
mod validate;

pub use inspect::inspect;
pub use validate::validate;

use crate::error::CliError;
use gedkit_core::{Document, GedcomError, Password};
use gedkit_stream::{read_file, ReadFailure, ReadOptions};
use tracing::debug;

/// Read a GEDCOM file, opening encrypted fields with `password` if given.
fn load(file: &str, password: Option<&str>) -> Result<Document, ReadFailure> {
    let password = password.map(Password::secret).unwrap_or_default();
    debug!(file, "reading");
    read_file(file, ReadOptions::builder().password(password).build())
}

/// Turn a failed read into the CLI error reported to the user.
fn read_failure(file: &str, failure: ReadFailure) -> CliError {
    let diagnostics = failure.diagnostics.len();
    match failure.error {
        GedcomError::Io(e) => CliError::io_error(file, e),
        error => CliError::read_error(file, error.to_string(), diagnostics),
    }
}
