//! Environment checks.
//!
//! Read-only: looks at PATH, settings and the key files, changes nothing.

use std::path::Path;

use serde::Serialize;

use crate::core::config::Settings;
use crate::core::constants::POLICY_FILE;
use crate::core::lifecycle::{KeyPaths, KeyState};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

/// A named check with a short explanation.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: &'static str,
    pub status: Status,
    pub detail: String,
}

impl Check {
    fn new(name: &'static str, status: Status, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }
}

/// Run every check against `root` and `settings`.
pub fn run(root: &Path, settings: &Settings) -> Vec<Check> {
    vec![
        tool_check("sops installed", settings.tools.sops()),
        tool_check("age-keygen installed", settings.tools.age_keygen()),
        region_check(settings),
        key_id_check(settings),
        key_state_check(root),
        policy_check(root),
    ]
}

/// Number of failed checks.
pub fn failures(checks: &[Check]) -> usize {
    checks.iter().filter(|c| c.status == Status::Fail).count()
}

fn tool_check(name: &'static str, program: &str) -> Check {
    match which::which(program) {
        Ok(path) => Check::new(name, Status::Pass, path.display().to_string()),
        Err(_) => Check::new(name, Status::Fail, format!("{} not found on PATH", program)),
    }
}

fn region_check(settings: &Settings) -> Check {
    match &settings.kms.region {
        Some(region) => Check::new("AWS region configured", Status::Pass, region.clone()),
        None => Check::new(
            "AWS region configured",
            Status::Fail,
            "AWS_REGION not set and no [kms] region",
        ),
    }
}

fn key_id_check(settings: &Settings) -> Check {
    match &settings.kms.key_id {
        Some(key_id) => Check::new("KMS key id configured", Status::Pass, key_id.clone()),
        None => Check::new(
            "KMS key id configured",
            Status::Fail,
            "SECRETSCTL_KMS_KEY_ID not set and no [kms] key_id",
        ),
    }
}

fn key_state_check(root: &Path) -> Check {
    let paths = KeyPaths::new(root);
    match KeyState::detect(&paths) {
        KeyState::KeyPresent if paths.fingerprint.exists() => Check::new(
            "age key",
            Status::Pass,
            "encrypted key and fingerprint present",
        ),
        KeyState::KeyPresent => Check::new(
            "age key",
            Status::Warn,
            "encrypted key present but fingerprint missing",
        ),
        KeyState::NoKey => Check::new("age key", Status::Warn, "not bootstrapped"),
        KeyState::Inconsistent => Check::new(
            "age key",
            Status::Fail,
            "fingerprint present but encrypted key missing",
        ),
    }
}

fn policy_check(root: &Path) -> Check {
    if root.join(POLICY_FILE).exists() {
        Check::new("sops policy", Status::Pass, POLICY_FILE)
    } else {
        Check::new("sops policy", Status::Warn, format!("{} missing", POLICY_FILE))
    }
}
