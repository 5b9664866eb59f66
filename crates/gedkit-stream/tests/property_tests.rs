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

//! Property-based tests for the reader.

use gedkit_core::DiagnosticKind;
use gedkit_stream::{read_document, tokenize_line, Enigma, LevelMode, ReadOptions};
use proptest::prelude::*;
use std::io::Cursor;

fn document(records: &[String]) -> String {
    let mut text = String::from("0 HEAD\n1 CHAR UTF-8\n");
    for record in records {
        text.push_str(record);
    }
    text.push_str("0 TRLR\n");
    text
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: the tokenizer never panics, whatever the line.
    #[test]
    fn prop_tokenizer_total(line in "\\PC{0,80}") {
        let _ = tokenize_line(&line, 1, LevelMode::Numbered);
        let _ = tokenize_line(&line, 1, LevelMode::Indented);
    }

    /// Property: level, xref, tag and value survive tokenizing.
    #[test]
    fn prop_tokenizer_fields(
        level in 0usize..99,
        id in "[A-Z][0-9]{1,5}",
        tag in "[A-Z_]{3,5}",
        value in "[ -~]{0,40}",
    ) {
        let line = format!("{} @{}@ {} {}", level, id, tag, value);
        let token = tokenize_line(&line, 7, LevelMode::Numbered).unwrap().unwrap();
        prop_assert_eq!(token.level, level);
        prop_assert_eq!(token.xref.as_deref(), Some(id.as_str()));
        prop_assert_eq!(&token.tag, &tag);
        prop_assert_eq!(&token.value, &value);
        prop_assert_eq!(token.line, 7);
    }

    /// Property: any number of well-formed records reads without diagnostics.
    #[test]
    fn prop_well_formed_records(names in prop::collection::vec("[A-Za-z]{1,12}", 1..30)) {
        let records: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("0 @I{}@ INDI\n1 NAME {} /Test/\n2 GIVN {}\n", i, name, name))
            .collect();
        let doc = read_document(Cursor::new(document(&records)), ReadOptions::default()).unwrap();
        prop_assert!(doc.diagnostics().is_empty());
        prop_assert_eq!(doc.records().len(), names.len() + 1);
    }

    /// Property: continuation fragments join in file order.
    #[test]
    fn prop_continuations_join(
        first in "[a-z]{0,10}",
        parts in prop::collection::vec(("[a-z ]{0,10}", any::<bool>()), 0..20),
    ) {
        let mut record = format!("0 @N1@ NOTE {}\n", first);
        let mut expected = first.clone();
        for (text, is_cont) in &parts {
            let tag = if *is_cont { "CONT" } else { "CONC" };
            record.push_str(&format!("1 {} {}\n", tag, text));
            if *is_cont {
                expected.push('\n');
            }
            expected.push_str(text);
        }
        let doc = read_document(Cursor::new(document(&[record])), ReadOptions::default()).unwrap();
        prop_assert_eq!(&doc.record_by_xref("N1").unwrap().value, &expected);
    }

    /// Property: exactly the dangling pointers are reported.
    #[test]
    fn prop_dangling_pointers_reported(targets in prop::collection::vec(0usize..10, 0..20)) {
        let mut records: Vec<String> = (0..5).map(|i| format!("0 @F{}@ FAM\n", i)).collect();
        let mut person = String::from("0 @I1@ INDI\n");
        for target in &targets {
            person.push_str(&format!("1 FAMS @F{}@\n", target));
        }
        records.push(person);

        let doc = read_document(Cursor::new(document(&records)), ReadOptions::default()).unwrap();
        let dangling = targets.iter().filter(|&&t| t >= 5).count();
        let reported = doc
            .diagnostics()
            .iter()
            .filter(|d| d.kind == DiagnosticKind::UnresolvedReference)
            .count();
        prop_assert_eq!(reported, dangling);
        prop_assert_eq!(doc.diagnostics().len(), dangling);
    }

    /// Property: encrypted values decrypt to the original text.
    #[test]
    fn prop_encryption_round_trip(password in "[ -~]{1,16}", plain in "\\PC{0,60}") {
        let enigma = Enigma::new(&password);
        let sealed = enigma.encrypt(&plain);
        prop_assert_eq!(Enigma::open(&password, &sealed).unwrap().decrypt(&sealed).unwrap(), plain);
    }
}
