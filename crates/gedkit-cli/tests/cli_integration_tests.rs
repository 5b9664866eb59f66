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

//! CLI integration tests

use assert_cmd::Command;
use gedkit_stream::Enigma;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

const FAMILY: &str = "0 HEAD
1 SOUR GEDKIT
1 CHAR UTF-8
1 SUBM @U1@
1 LANG English
0 @U1@ SUBM
1 NAME Anna Smith
0 @I1@ INDI
1 NAME John /Smith/
1 FAMS @F1@
0 @I2@ INDI
1 NAME Mary /Jones/
1 FAMS @F1@
1 NOTE Mary kept the family bible,
2 CONT which lists every baptism
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
2 DATE 1875
0 TRLR
";

// Test helper to create a gedkit command
fn gedkit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gedkit").expect("Failed to find gedkit binary");
    cmd.env("NO_COLOR", "1");
    cmd
}

// Test helper to create a temporary file with content
fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".ged")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    gedkit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GEDKIT - Genealogical data ingestion toolkit"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_version_output() {
    gedkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gedkit"));
}

#[test]
fn test_no_subcommand_fails() {
    gedkit_cmd().assert().failure();
}

// ===== Validate Command Tests =====

#[test]
fn test_validate_valid_file() {
    let file = create_temp_file(FAMILY);

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("Encoding: UTF-8"))
        .stdout(predicate::str::contains("Records: 4"))
        .stdout(predicate::str::contains("INDI: 2"))
        .stdout(predicate::str::contains("Submitter: @U1@"))
        .stdout(predicate::str::contains("Diagnostics: 0"));
}

#[test]
fn test_validate_reports_diagnostics() {
    let content = FAMILY.replace("1 WIFE @I2@", "1 WIFE @I9@");
    let file = create_temp_file(&content);

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagnostics: 1"))
        .stdout(predicate::str::contains("[unresolved-reference]"))
        .stdout(predicate::str::contains("line 18"));
}

#[test]
fn test_validate_missing_trailer_fails() {
    let content = FAMILY.replace("0 TRLR\n", "");
    let file = create_temp_file(&content);

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Invalid trailer"))
        .stderr(predicate::str::contains("(0 diagnostic(s) before the failure)"));
}

#[test]
fn test_validate_bad_header_fails() {
    let file = create_temp_file("0 @I1@ INDI\n0 TRLR\n");

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid header"));
}

#[test]
fn test_validate_nonexistent_file() {
    gedkit_cmd()
        .arg("validate")
        .arg("/nonexistent/family.ged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_validate_json_output() {
    let file = create_temp_file(FAMILY);

    let output = gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .arg("--json")
        .output()
        .expect("Failed to run gedkit");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(report["valid"], true);
    assert_eq!(report["encoding"], "UTF-8");
    assert_eq!(report["records"], 4);
    assert_eq!(report["record_counts"]["FAM"], 1);
    assert_eq!(report["submitter"], "U1");
    assert_eq!(report["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_validate_json_output_on_failure() {
    let content = FAMILY
        .replace("1 WIFE @I2@", "1 WIFE @I8@")
        .replace("0 TRLR\n", "");
    let file = create_temp_file(&content);

    let output = gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .arg("--json")
        .output()
        .expect("Failed to run gedkit");
    assert!(!output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is valid JSON");
    assert_eq!(report["valid"], false);
    assert!(report["error"]
        .as_str()
        .is_some_and(|e| e.contains("Invalid trailer")));
}

// ===== Password Tests =====

fn private_family(password: &str) -> String {
    let enigma = Enigma::new(password);
    FAMILY.replace(
        "1 NAME John /Smith/",
        &format!("1 NAME {}", enigma.encrypt("John /Smith/")),
    )
}

#[test]
fn test_validate_with_password() {
    let file = create_temp_file(&private_family("tulip"));

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .arg("--password")
        .arg("tulip")
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagnostics: 0"));
}

#[test]
fn test_validate_without_password_warns() {
    let file = create_temp_file(&private_family("tulip"));

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[password-unknown]"));
}

#[test]
fn test_validate_with_wrong_password_warns() {
    let file = create_temp_file(&private_family("tulip"));

    gedkit_cmd()
        .arg("validate")
        .arg(file.path())
        .arg("-p")
        .arg("rose")
        .assert()
        .success()
        .stdout(predicate::str::contains("[password-mismatch]"));
}

// ===== Inspect Command Tests =====

#[test]
fn test_inspect_prints_tree() {
    let file = create_temp_file(FAMILY);

    gedkit_cmd()
        .arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("GEDCOM Document"))
        .stdout(predicate::str::contains("Language:  English"))
        .stdout(predicate::str::contains("@I1@ INDI"))
        .stdout(predicate::str::contains("HUSB @I1@ -> INDI"))
        .stdout(predicate::str::contains("DATE 1875"))
        .stdout(predicate::str::contains("family bible,\\nwhich lists"));
}

#[test]
fn test_inspect_depth_limit() {
    let file = create_temp_file(FAMILY);

    gedkit_cmd()
        .arg("inspect")
        .arg(file.path())
        .arg("--depth")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("MARR"))
        .stdout(predicate::str::contains("... 1 nested field(s)"))
        .stdout(predicate::str::contains("DATE 1875").not());
}

#[test]
fn test_inspect_records_only() {
    let file = create_temp_file(FAMILY);

    gedkit_cmd()
        .arg("inspect")
        .arg(file.path())
        .arg("-d")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("@F1@ FAM"))
        .stdout(predicate::str::contains("NAME").not());
}

#[test]
fn test_inspect_masks_sealed_fields() {
    let file = create_temp_file(&private_family("tulip"));

    gedkit_cmd()
        .arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME [private]"))
        .stdout(predicate::str::contains("Diagnostics:"));
}

#[test]
fn test_inspect_opens_fields_with_password() {
    let file = create_temp_file(&private_family("tulip"));

    gedkit_cmd()
        .arg("inspect")
        .arg(file.path())
        .arg("--password")
        .arg("tulip")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME John /Smith/"));
}

#[test]
fn test_inspect_unresolved_pointer() {
    let content = FAMILY.replace("1 HUSB @I1@", "1 HUSB @I7@");
    let file = create_temp_file(&content);

    gedkit_cmd()
        .arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("@I7@ (unresolved)"));
}
