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

//! Password state threaded through the decryption gate.

use std::fmt;

/// The password available to a read session.
///
/// These three values are the only legal password states. `Unknown` is also
/// the state a session falls back to after a password turned out not to
/// match the file.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Password {
    /// No password is known. Encrypted fields stay sealed and each one
    /// produces a diagnostic.
    #[default]
    Unknown,
    /// A concrete secret to try.
    Secret(String),
    /// The caller flags the password as known to be wrong. The first
    /// encrypted field aborts the read so the caller can ask for another one.
    Rejected,
}

impl Password {
    /// Wrap a secret.
    pub fn secret(value: impl Into<String>) -> Self {
        Self::Secret(value.into())
    }

    /// The secret, if one is set.
    pub fn as_secret(&self) -> Option<&str> {
        match self {
            Self::Secret(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            Self::Secret(_) => f.write_str("Secret(***)"),
            Self::Rejected => f.write_str("Rejected"),
        }
    }
}
