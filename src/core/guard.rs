//! Filename guards.
//!
//! Every secret operation checks its target name here before touching the
//! filesystem or running sops, so all commands accept exactly the same names.

use crate::core::constants::{ENCRYPTED_SUFFIX, PLAINTEXT_SUFFIX};
use crate::error::{GuardError, Result};

/// Accept `<name>.yaml` that is not `<name>.enc.yaml`.
pub fn plain(name: &str) -> Result<()> {
    if !name.ends_with(PLAINTEXT_SUFFIX) {
        return Err(GuardError::InvalidPlaintextName(name.to_string()).into());
    }
    if name.ends_with(ENCRYPTED_SUFFIX) {
        return Err(GuardError::AlreadyEncrypted(name.to_string()).into());
    }
    Ok(())
}

/// Accept `<name>.enc.yaml`.
pub fn encrypted(name: &str) -> Result<()> {
    if !name.ends_with(ENCRYPTED_SUFFIX) {
        return Err(GuardError::NotEncrypted(name.to_string()).into());
    }
    Ok(())
}

/// Ciphertext companion of a plaintext name.
///
/// `secrets/db.yaml` becomes `secrets/db.enc.yaml`. Call [`plain`] first.
pub fn encrypted_name(plain_name: &str) -> String {
    let base = plain_name
        .strip_suffix(PLAINTEXT_SUFFIX)
        .unwrap_or(plain_name);
    format!("{}{}", base, ENCRYPTED_SUFFIX)
}

/// Plaintext companion of a ciphertext name.
///
/// `secrets/db.enc.yaml` becomes `secrets/db.yaml`. Call [`encrypted`] first.
pub fn plain_name(encrypted_name: &str) -> String {
    let base = encrypted_name
        .strip_suffix(ENCRYPTED_SUFFIX)
        .unwrap_or(encrypted_name);
    format!("{}{}", base, PLAINTEXT_SUFFIX)
}
