//! Integration tests for unpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use unpack_core::test_utils;
use unpack_core::test_utils::TarTestBuilder;
use unpack_core::test_utils::ZipTestBuilder;

fn unpack_cmd() -> Command {
    cargo_bin_cmd!("unpack")
}

fn write_sample_tar_gz(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let tar_data = TarTestBuilder::new()
        .add_directory("docs/")
        .add_file("docs/note.md", b"hello from the archive")
        .build();
    let path = dir.path().join(name);
    std::fs::write(&path, test_utils::gzip_compress(&tar_data)).unwrap();
    path
}

#[test]
fn test_version_flag() {
    unpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unpack"));
}

#[test]
fn test_help_flag() {
    unpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_extract_help() {
    unpack_cmd()
        .arg("extract")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract archive contents"));
}

#[test]
fn test_extract_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_sample_tar_gz(&temp, "sample.tar.gz");
    let out = temp.path().join("out");

    unpack_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"));

    assert_eq!(
        std::fs::read(out.join("docs/note.md")).unwrap(),
        b"hello from the archive"
    );
}

#[test]
fn test_extract_zip_json_output() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("bundle.zip");
    std::fs::write(
        &archive,
        ZipTestBuilder::new().add_file("a.txt", b"json me").build(),
    )
    .unwrap();
    let out = temp.path().join("out");

    unpack_cmd()
        .arg("--json")
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"extract\""))
        .stdout(predicate::str::contains("\"entries_extracted\": 1"));
}

#[test]
fn test_extract_quiet_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let archive = write_sample_tar_gz(&temp, "sample.tar.gz");
    let out = temp.path().join("out");

    unpack_cmd()
        .arg("--quiet")
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_extract_debug_logging_to_stderr() {
    let temp = TempDir::new().unwrap();
    let archive = write_sample_tar_gz(&temp, "sample.tar.gz");
    let out = temp.path().join("out");

    unpack_cmd()
        .env("RUST_LOG", "unpack_cli=debug")
        .arg("extract")
        .arg(&archive)
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("starting extraction"))
        .stderr(predicate::str::contains("extraction finished"));
}

#[test]
fn test_extract_unsupported_format_hint() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("payload.rar");
    std::fs::write(&archive, b"Rar!").unwrap();

    unpack_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format 'rar'"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_extract_corrupt_archive_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("broken.tar.gz");
    std::fs::write(&archive, b"\x1f\x8b garbage").unwrap();

    unpack_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupted or incomplete"));
}

#[test]
fn test_resolve_tar_gz() {
    unpack_cmd()
        .arg("resolve")
        .arg("logs.tar.gz")
        .assert()
        .success()
        .stdout(predicate::str::contains("TAR archive (gzip)"));
}

#[test]
fn test_resolve_bare_gz_is_plain_candidate() {
    unpack_cmd()
        .arg("resolve")
        .arg("console.log.gz")
        .assert()
        .success()
        .stdout(predicate::str::contains("gzip file"));
}

#[test]
fn test_resolve_json() {
    unpack_cmd()
        .arg("--json")
        .arg("resolve")
        .arg("data.zip")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"resolve\""))
        .stdout(predicate::str::contains("ZIP archive"));
}

#[test]
fn test_resolve_unknown_extension_fails() {
    unpack_cmd()
        .arg("resolve")
        .arg("movie.mkv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mkv"));
}
