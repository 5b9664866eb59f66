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

//! GEDKIT CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **validate**: Read a GEDCOM file and report its encoding, record counts
//!   and every diagnostic. Fails when the read hits a fatal error.
//! - **inspect**: Print the record tree, optionally cut at a depth.
//!
//! # Examples
//!
//! ```no_run
//! use gedkit_cli::commands::validate;
//!
//! # fn main() -> Result<(), gedkit_cli::error::CliError> {
//! validate("family.ged", None, false)?;
//!
//! // Encrypted fields are opened with the password
//! validate("private.ged", Some("tulip"), true)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
