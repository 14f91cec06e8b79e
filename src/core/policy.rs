//! sops creation rules (`.sops.yaml`).
//!
//! Written once, right after a fresh key is generated, and never touched
//! again.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::POLICY_FILE;
use crate::core::files::write_new_private;
use crate::core::key::PublicKey;
use crate::error::{ConfigError, Error, FileError, Result};

/// Render creation rules that encrypt `data`/`stringData` of every YAML file
/// for the given recipient.
pub fn render(recipient: &PublicKey) -> String {
    format!(
        "creation_rules:\n  - path_regex: .*\\.yaml$\n    encrypted_regex: '^(data|stringData)$'\n    age:\n      - {}\n",
        recipient
    )
}

/// Write `.sops.yaml` under `root`.
///
/// # Errors
///
/// `ConfigError::PolicyExists` if the file is already there.
pub fn write(root: &Path, recipient: &PublicKey) -> Result<PathBuf> {
    let path = root.join(POLICY_FILE);
    debug!(path = %path.display(), "writing sops policy");

    match write_new_private(&path, render(recipient).as_bytes()) {
        Ok(()) => Ok(path),
        Err(Error::File(FileError::OverwriteRefused(path))) => {
            Err(ConfigError::PolicyExists(path).into())
        }
        Err(e) => Err(e),
    }
}

/// Refuse early when `.sops.yaml` already exists under `root`.
///
/// Checked before a fresh key is generated so a conflicting policy leaves
/// nothing behind.
pub fn ensure_absent(root: &Path) -> Result<()> {
    let path = root.join(POLICY_FILE);
    if path.exists() {
        return Err(ConfigError::PolicyExists(path).into());
    }
    Ok(())
}

/// Whether the policy under `root` lists `recipient`.
///
/// `None` when there is no policy file.
pub fn lists(root: &Path, recipient: &PublicKey) -> Result<Option<bool>> {
    let path = root.join(POLICY_FILE);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ConfigError::Read { path, source }.into()),
    };
    let listed = contents
        .lines()
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .map(|word| word.trim_matches(|c: char| c == '\'' || c == '"' || c == '-'))
        .any(|word| word == recipient.as_str());
    Ok(Some(listed))
}
