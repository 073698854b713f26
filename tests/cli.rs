//! Command-line behaviour of the `metashift` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use metashift::PipelineConfig;
use predicates::prelude::*;

fn metashift() -> Command {
    let mut cmd = Command::cargo_bin("metashift").unwrap();
    cmd.env_remove("METASHIFT_SHIFT1")
        .env_remove("METASHIFT_SHIFT2")
        .env_remove("RUST_LOG");
    cmd
}

/// Plaintext, ciphertext and metadata paths inside `dir`.
fn artifacts(dir: &Path) -> [PathBuf; 3] {
    [dir.join("raw.txt"), dir.join("enc.txt"), dir.join("enc.meta")]
}

// ---------------------------------------------------------------------------
// verify
// ---------------------------------------------------------------------------

#[test]
fn verify_mismatch_exits_non_zero_with_index() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "abcdX").unwrap();
    fs::write(&b, "abcdY").unwrap();

    metashift()
        .arg("verify")
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[WARNING]"))
        .stdout(predicate::str::contains("index: 4"));
}

#[test]
fn verify_equal_files_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "same text\n").unwrap();
    fs::write(&b, "same text\n").unwrap();

    metashift()
        .arg("verify")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS]"));
}

// ---------------------------------------------------------------------------
// init-config
// ---------------------------------------------------------------------------

#[test]
fn init_config_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metashift.json");
    fs::write(&path, "keep me").unwrap();

    metashift()
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

    metashift()
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .arg("--force")
        .assert()
        .success();
    assert_eq!(
        PipelineConfig::load(&path).unwrap(),
        PipelineConfig::default()
    );
}

// ---------------------------------------------------------------------------
// shift sources: flags, environment, prompt
// ---------------------------------------------------------------------------

#[test]
fn flags_skip_the_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let [raw, enc, meta] = artifacts(dir.path());
    fs::write(&raw, "Abc123").unwrap();

    metashift()
        .args(["encrypt", "--shift1", "3", "--shift2", "5"])
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter shift").not());

    assert_eq!(fs::read_to_string(&enc).unwrap(), "Xqr123");
    assert_eq!(fs::read_to_string(&meta).unwrap(), "311000");
}

#[test]
fn environment_supplies_shifts() {
    let dir = tempfile::tempdir().unwrap();
    let [raw, enc, meta] = artifacts(dir.path());
    fs::write(&raw, "Abc123").unwrap();

    metashift()
        .env("METASHIFT_SHIFT1", "3")
        .env("METASHIFT_SHIFT2", "5")
        .arg("encrypt")
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter shift").not());

    assert_eq!(fs::read_to_string(&enc).unwrap(), "Xqr123");
}

#[test]
fn flag_wins_over_environment() {
    let dir = tempfile::tempdir().unwrap();
    let [raw, enc, meta] = artifacts(dir.path());
    fs::write(&raw, "Abc123").unwrap();

    metashift()
        .env("METASHIFT_SHIFT1", "99")
        .env("METASHIFT_SHIFT2", "5")
        .args(["encrypt", "--shift1", "3"])
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta)
        .write_stdin("")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&enc).unwrap(), "Xqr123");
}

#[test]
fn prompt_retries_until_an_integer_is_entered() {
    let dir = tempfile::tempdir().unwrap();
    let [raw, enc, meta] = artifacts(dir.path());
    fs::write(&raw, "Abc123").unwrap();

    metashift()
        .arg("encrypt")
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta)
        .write_stdin("x\n3\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter shift1 (integer): "))
        .stdout(predicate::str::contains("Please enter an integer."));

    assert_eq!(fs::read_to_string(&enc).unwrap(), "Xqr123");
}

#[test]
fn prompt_on_closed_stdin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let [raw, enc, meta] = artifacts(dir.path());
    fs::write(&raw, "Abc123").unwrap();

    metashift()
        .arg("encrypt")
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta)
        .write_stdin("")
        .assert()
        .failure();
    assert!(!enc.exists());
}

// ---------------------------------------------------------------------------
// run, encrypt and decrypt failures
// ---------------------------------------------------------------------------

#[test]
fn run_with_negative_shift_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    fs::write(config.paths().raw, "Hello, World!\n").unwrap();

    metashift()
        .arg("run")
        .arg("--dir")
        .arg(dir.path())
        .args(["--shift1", "-3", "--shift2", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS]"));

    assert_eq!(
        fs::read_to_string(config.paths().decrypted).unwrap(),
        "Hello, World!\n"
    );
}

#[test]
fn encrypt_into_directory_leaves_no_ciphertext() {
    let dir = tempfile::tempdir().unwrap();
    let [raw, enc, _] = artifacts(dir.path());
    let meta_dir = dir.path().join("meta_dir");
    fs::write(&raw, "Abc123").unwrap();
    fs::create_dir(&meta_dir).unwrap();

    metashift()
        .args(["encrypt", "--shift1", "3", "--shift2", "5"])
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("encryption failed"));

    assert!(!enc.exists());
}

#[test]
fn decrypt_rejects_corrupted_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let enc = dir.path().join("enc.txt");
    let meta = dir.path().join("enc.meta");
    let out = dir.path().join("out.txt");
    fs::write(&enc, "Xqr123").unwrap();
    fs::write(&meta, "311009").unwrap();

    metashift()
        .args(["decrypt", "--shift1", "3", "--shift2", "5"])
        .arg("--input")
        .arg(&enc)
        .arg("--meta")
        .arg(&meta)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid metadata symbol"));

    assert!(!out.exists());
}
