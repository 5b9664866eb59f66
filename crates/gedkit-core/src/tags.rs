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

//! Static tag registry.
//!
//! Maps a tag string to the facts the builder needs about it: whether the
//! field may span several physical lines, and which record type it points at
//! when it carries a cross-reference. The registry is a `match`, resolved at
//! compile time; tags it does not know are opaque.

/// Header record tag.
pub const HEAD: &str = "HEAD";
/// Trailer record tag.
pub const TRLR: &str = "TRLR";
/// Submitter record tag.
pub const SUBM: &str = "SUBM";
/// Language tag in the header.
pub const LANG: &str = "LANG";
/// Character set declaration in the header.
pub const CHAR: &str = "CHAR";
/// Continuation joined with a line break.
pub const CONT: &str = "CONT";
/// Continuation joined without separator.
pub const CONC: &str = "CONC";

/// Static facts about a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    /// The tag is part of the standard vocabulary.
    pub known: bool,
    /// The value may continue on `CONT`/`CONC` lines.
    pub multiline: bool,
    /// Record tag this field points at when its value is `@ID@`.
    pub pointer_target: Option<&'static str>,
}

impl TagInfo {
    const OPAQUE: Self = Self {
        known: false,
        multiline: false,
        pointer_target: None,
    };

    const FIELD: Self = Self {
        known: true,
        multiline: false,
        pointer_target: None,
    };

    const TEXT: Self = Self {
        known: true,
        multiline: true,
        pointer_target: None,
    };

    const fn pointer(target: &'static str) -> Self {
        Self {
            known: true,
            multiline: false,
            pointer_target: Some(target),
        }
    }

    /// Look up a tag.
    pub fn of(tag: &str) -> Self {
        match tag {
            "FAMC" | "FAMS" => Self::pointer("FAM"),
            "HUSB" | "WIFE" | "CHIL" | "ASSO" | "ALIA" => Self::pointer("INDI"),
            "SUBM" | "ANCI" | "DESI" => Self::pointer("SUBM"),
            "SUBN" => Self::pointer("SUBN"),
            "SOUR" => Self::pointer("SOUR"),
            "REPO" => Self::pointer("REPO"),
            "OBJE" => Self::pointer("OBJE"),
            // NOTE is both: a pointer to a NOTE record or inline text.
            "NOTE" => Self {
                known: true,
                multiline: true,
                pointer_target: Some("NOTE"),
            },
            "TEXT" | "ADDR" | "PUBL" | "AUTH" | "TITL" => Self::TEXT,
            "HEAD" | "TRLR" | "INDI" | "FAM" | "NAME" | "SEX" | "BIRT" | "CHR" | "DEAT"
            | "BURI" | "CREM" | "ADOP" | "BAPM" | "BARM" | "BASM" | "BLES" | "CHRA"
            | "CONF" | "FCOM" | "ORDN" | "NATU" | "EMIG" | "IMMI" | "CENS" | "PROB"
            | "WILL" | "GRAD" | "RETI" | "EVEN" | "MARR" | "MARB" | "MARC" | "MARL"
            | "MARS" | "DIV" | "DIVF" | "ENGA" | "ANUL" | "DATE" | "PLAC" | "AGE"
            | "TYPE" | "CAUS" | "AGNC" | "GIVN" | "SURN" | "NPFX" | "NSFX" | "SPFX"
            | "NICK" | "OCCU" | "EDUC" | "RELI" | "RESI" | "NATI" | "CAST" | "DSCR"
            | "IDNO" | "NCHI" | "NMR" | "PROP" | "SSN" | "FACT" | "PEDI" | "STAT"
            | "RELA" | "QUAY" | "PAGE" | "DATA" | "ROLE" | "FORM" | "FILE" | "CALN"
            | "MEDI" | "ABBR" | "RFN" | "AFN" | "REFN" | "RIN" | "CHAN" | "TIME"
            | "GEDC" | "VERS" | "CHAR" | "LANG" | "DEST" | "COPR" | "CORP" | "PHON"
            | "EMAIL" | "FAX" | "WWW" | "ADR1" | "ADR2" | "ADR3" | "CITY" | "STAE"
            | "POST" | "CTRY" | "MAP" | "LATI" | "LONG" | "RESN" | "CONT"
            | "CONC" => Self::FIELD,
            _ => Self::OPAQUE,
        }
    }
}

/// The separator a continuation tag inserts before its fragment.
///
/// Returns `None` for tags that are not continuations.
pub fn continuation_joiner(tag: &str) -> Option<&'static str> {
    match tag {
        CONT => Some("\n"),
        CONC => Some(""),
        _ => None,
    }
}

/// Extract the id from an `@ID@` field.
///
/// The field must start and end with `@` and be longer than two characters.
/// Escapes such as `@#DJULIAN@` and values with embedded whitespace or `@`
/// are not ids.
pub fn xref_id(field: &str) -> Option<&str> {
    if field.len() <= 2 || !field.starts_with('@') || !field.ends_with('@') {
        return None;
    }
    let inner = &field[1..field.len() - 1];
    if inner.starts_with('#') || inner.contains('@') || inner.contains(char::is_whitespace) {
        return None;
    }
    Some(inner)
}
