//! CLI smoke tests for the folio binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn folio() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    // Isolate from the invoking terminal and user preferences.
    cmd.env_remove("COLORFGBG").env_remove("FOLIO_THEME");
    cmd.arg("--no-store");
    cmd
}

#[test]
fn defaults_to_the_light_fallback() {
    folio()
        .assert()
        .success()
        .stdout(predicate::str::contains("theme system"))
        .stdout(predicate::str::contains("effective light"));
}

#[test]
fn explicit_theme_flag_is_applied() {
    folio()
        .args(["--theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme dark"))
        .stdout(predicate::str::contains("#0f0f0f"));
}

#[test]
fn invalid_theme_name_is_surfaced_and_ignored() {
    folio()
        .args(["--theme", "purple"])
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid theme choice"))
        .stdout(predicate::str::contains("effective light"));
}

#[test]
fn colorfgbg_drives_the_system_choice() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env_remove("FOLIO_THEME");
    cmd.env("COLORFGBG", "15;0");
    cmd.arg("--no-store")
        .assert()
        .success()
        .stdout(predicate::str::contains("effective dark"));
}

#[test]
fn lists_documents_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("book.epub"), b"").unwrap();
    std::fs::write(dir.path().join("image.png"), b"").unwrap();

    folio()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("library: 1 document(s)"))
        .stdout(predicate::str::contains("book.epub"));
}

#[test]
fn opening_a_missing_document_reports_an_error() {
    folio()
        .arg("/nonexistent/book.epub")
        .assert()
        .success()
        .stderr(predicate::str::contains("no such document"));
}
