//! Tests for the doctor command.

use crate::support::*;

#[test]
fn test_doctor_fails_on_unconfigured_environment() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("SECRETSCTL_SOPS", t.bin.path().join("no-sops"))
        .arg("doctor")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "sops installed");
    assert_stderr_contains(&output, "KMS key id configured");
    assert_stderr_contains(&output, "environment check(s) failed");
}

#[test]
fn test_doctor_json_reports_every_check() {
    let t = Test::new();

    let output = t.cmd().args(["doctor", "--json"]).output().unwrap();
    assert_failure(&output);

    let checks: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let checks = checks.as_array().unwrap();
    let names: Vec<&str> = checks.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        [
            "sops installed",
            "age-keygen installed",
            "AWS region configured",
            "KMS key id configured",
            "age key",
            "sops policy",
        ]
    );
    let key_id = &checks[3];
    assert_eq!(key_id["status"], "fail");
}

#[test]
fn test_doctor_flags_inconsistent_key_files() {
    let t = Test::new();
    t.write(".age-key.fingerprint", "deadbeef\n");

    let output = t.doctor(true);
    assert_failure(&output);
    let checks: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let key = checks
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "age key")
        .unwrap();
    assert_eq!(key["status"], "fail");
}

#[test]
fn test_doctor_is_read_only() {
    let t = Test::new();
    let before = t.files();

    t.doctor(false);
    t.doctor(true);
    assert_eq!(t.files(), before);
}
