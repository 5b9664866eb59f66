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

//! Character sets a GEDCOM document may be written in.

use std::fmt;

/// A character set the reader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Charset {
    /// UTF-8, with or without byte-order mark.
    Utf8,
    /// UTF-16, big-endian.
    Utf16Be,
    /// UTF-16, little-endian.
    Utf16Le,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1 (decoded as its windows-1252 superset).
    Latin1,
    /// ANSEL (ANSI Z39.47), the format's historical default.
    Ansel,
}

impl Charset {
    /// Map a `CHAR` declaration to a charset.
    ///
    /// Names are matched case-sensitively. `ANSI` is the legacy alias some
    /// Windows programs write for Latin-1.
    pub fn from_declared(name: &str) -> Option<Self> {
        match name {
            "UNICODE" | "UTF-8" => Some(Self::Utf8),
            "ASCII" => Some(Self::Ascii),
            "LATIN1" | "ANSI" => Some(Self::Latin1),
            "ANSEL" => Some(Self::Ansel),
            _ => None,
        }
    }

    /// A human-readable encoding label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Ansel => "ANSEL",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
