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

//! Charset detection from the first bytes of a document.
//!
//! Detection runs in priority order:
//!
//! 1. A byte-order mark decides the charset and is skipped. A `CHAR` line
//!    that disagrees is ignored.
//! 2. Otherwise the header is scanned for a `1 CHAR <NAME>` line. The first
//!    recognized name wins.
//! 3. Otherwise the document is read as ANSEL.

use gedkit_core::Charset;
use tracing::debug;

/// Number of leading bytes inspected for a charset declaration.
pub const SNIFF_LEN: usize = 4096;

/// Result of charset detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sniffed {
    /// The charset to decode with.
    pub charset: Charset,
    /// Length of the byte-order mark to skip.
    pub bom_len: usize,
    /// The `CHAR` name found in the header, if any, even when not recognized.
    pub declared: Option<String>,
}

/// Detect the charset of a document from its leading bytes.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::sniff;
/// use gedkit_core::Charset;
///
/// let found = sniff(b"0 HEAD\n1 CHAR ASCII\n0 TRLR\n");
/// assert_eq!(found.charset, Charset::Ascii);
///
/// let found = sniff(b"\xEF\xBB\xBF0 HEAD\n1 CHAR ANSEL\n");
/// assert_eq!(found.charset, Charset::Utf8);
/// assert_eq!(found.bom_len, 3);
/// ```
pub fn sniff(prefix: &[u8]) -> Sniffed {
    let declared = scan_declaration(prefix);

    if let Some((charset, bom_len)) = byte_order_mark(prefix) {
        debug!(charset = %charset, "charset from byte-order mark");
        return Sniffed {
            charset,
            bom_len,
            declared,
        };
    }

    let charset = declared
        .as_deref()
        .and_then(Charset::from_declared)
        .unwrap_or(Charset::Ansel);
    debug!(charset = %charset, declared = ?declared, "charset from header");
    Sniffed {
        charset,
        bom_len: 0,
        declared,
    }
}

fn byte_order_mark(prefix: &[u8]) -> Option<(Charset, usize)> {
    match prefix {
        [0xEF, 0xBB, 0xBF, ..] => Some((Charset::Utf8, 3)),
        [0xFE, 0xFF, ..] => Some((Charset::Utf16Be, 2)),
        [0xFF, 0xFE, ..] => Some((Charset::Utf16Le, 2)),
        _ => None,
    }
}

/// Find the `CHAR` name in the header region of raw 8-bit text.
///
/// The header region ends at the first level-0 line after `0 HEAD`. The first
/// recognized name is returned; failing that, the first unrecognized one.
fn scan_declaration(prefix: &[u8]) -> Option<String> {
    let mut unknown = None;
    let mut in_header = false;

    for raw in prefix.split(|&b| b == b'\n' || b == b'\r') {
        let line: String = raw.iter().map(|&b| b as char).collect();
        let mut fields = line.split_ascii_whitespace();
        let (Some(level), Some(tag)) = (fields.next(), fields.next()) else {
            continue;
        };
        if level == "0" {
            if in_header {
                break;
            }
            in_header = tag == "HEAD";
            continue;
        }
        if level != "1" || tag != "CHAR" {
            continue;
        }
        let (Some(name), None) = (fields.next(), fields.next()) else {
            continue;
        };
        if Charset::from_declared(name).is_some() {
            return Some(name.to_string());
        }
        unknown.get_or_insert_with(|| name.to_string());
    }
    unknown
}
