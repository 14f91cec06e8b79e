//! Secret file operations.
//!
//! Each operation validates the target name, resolves the companion path and
//! checks the filesystem before asking for key material, so a bad invocation
//! fails without a KMS round trip.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants::SOPS_METADATA_LINE;
use crate::core::files::write_new_private;
use crate::core::guard;
use crate::core::key::{sha256_hex, KeyMaterial};
use crate::core::sops::SecretTool;
use crate::error::{FileError, GuardError, Result};

/// Encrypt, decrypt, validate and audit secret files under a project root.
pub struct SecretFiles<'a> {
    root: &'a Path,
    tool: &'a dyn SecretTool,
}

impl<'a> SecretFiles<'a> {
    pub fn new(root: &'a Path, tool: &'a dyn SecretTool) -> Self {
        Self { root, tool }
    }

    /// Encrypt `<base>.yaml` into `<base>.enc.yaml`.
    ///
    /// Returns the ciphertext path. Refuses if it already exists.
    pub fn encrypt<F>(&self, name: &str, key: F) -> Result<PathBuf>
    where
        F: FnOnce() -> Result<KeyMaterial>,
    {
        guard::plain(name)?;
        let plain = self.root.join(name);
        let encrypted = self.root.join(guard::encrypted_name(name));

        refuse_existing(&encrypted)?;
        require_existing(&plain)?;

        let key = key()?;
        self.tool.encrypt(&plain, &encrypted, &key)?;

        debug!(from = %plain.display(), to = %encrypted.display(), "encrypted");
        Ok(encrypted)
    }

    /// Decrypt `<base>.enc.yaml` into `<base>.yaml`.
    ///
    /// Returns the plaintext path. Refuses if it already exists; the file is
    /// created with owner-only permissions.
    pub fn decrypt<F>(&self, name: &str, key: F) -> Result<PathBuf>
    where
        F: FnOnce() -> Result<KeyMaterial>,
    {
        guard::encrypted(name)?;
        let encrypted = self.root.join(name);
        let plain = self.root.join(guard::plain_name(name));

        refuse_existing(&plain)?;
        require_existing(&encrypted)?;
        ensure_sops_metadata(&encrypted)?;

        let key = key()?;
        let plaintext = self.tool.decrypt(&encrypted, &key)?;
        write_new_private(&plain, &plaintext)?;

        debug!(from = %encrypted.display(), to = %plain.display(), "decrypted");
        Ok(plain)
    }

    /// Check that the key can decrypt `<base>.enc.yaml`. Output is discarded.
    pub fn validate<F>(&self, name: &str, key: F) -> Result<()>
    where
        F: FnOnce() -> Result<KeyMaterial>,
    {
        let encrypted = self.decryptable(name)?;
        let key = key()?;
        self.tool.decrypt(&encrypted, &key)?;
        debug!(path = %encrypted.display(), "validated");
        Ok(())
    }

    /// SHA-256 of the decrypted content of `<base>.enc.yaml`.
    ///
    /// The plaintext stays in memory and is zeroized once hashed.
    pub fn audit<F>(&self, name: &str, key: F) -> Result<String>
    where
        F: FnOnce() -> Result<KeyMaterial>,
    {
        let encrypted = self.decryptable(name)?;
        let key = key()?;
        let plaintext = self.tool.decrypt(&encrypted, &key)?;
        Ok(sha256_hex(&plaintext))
    }

    fn decryptable(&self, name: &str) -> Result<PathBuf> {
        guard::encrypted(name)?;
        let encrypted = self.root.join(name);
        require_existing(&encrypted)?;
        ensure_sops_metadata(&encrypted)?;
        Ok(encrypted)
    }
}

fn refuse_existing(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(FileError::OverwriteRefused(path.to_path_buf()).into());
    }
    Ok(())
}

fn require_existing(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(FileError::NotFound(path.to_path_buf()).into());
    }
    Ok(())
}

/// Reject files without a top-level `sops:` block before sops sees them.
pub fn ensure_sops_metadata(path: &Path) -> Result<()> {
    let contents = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&contents);
    if !text.lines().any(|line| line.trim_end() == SOPS_METADATA_LINE) {
        return Err(GuardError::NotEncrypted(path.display().to_string()).into());
    }
    Ok(())
}
