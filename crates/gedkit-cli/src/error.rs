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

//! Structured error types for the GEDKIT CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by CLI commands.
///
/// Fatal read errors are carried as text so the type stays `Clone`.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// A file could not be opened or read.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The GEDCOM reader stopped with a fatal error.
    #[error("Failed to read '{path}': {message} ({diagnostics} diagnostic(s) before the failure)")]
    Read {
        /// The file being read
        path: PathBuf,
        /// The fatal error as reported by the reader
        message: String,
        /// Diagnostics gathered before the failure
        diagnostics: usize,
    },

    /// JSON output could not be produced.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an I/O error for a path.
    pub fn io_error(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a read error for a path.
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>, diagnostics: usize) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
            diagnostics,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
