//! Managed key lifecycle.
//!
//! The age key exists on disk only as a KMS-sealed blob next to a fingerprint
//! of its public key. Bootstrap decides from those two files whether to
//! generate a key, verify the existing one, or refuse to act:
//!
//! | blob | fingerprint | state          | bootstrap            |
//! |------|-------------|----------------|----------------------|
//! | no   | no          | `NoKey`        | generate and seal    |
//! | yes  | any         | `KeyPresent`   | verify, no writes    |
//! | no   | yes         | `Inconsistent` | `RefuseRegenerate`   |
//!
//! A fresh key is written blob first and fingerprint last, so a failure part
//! way through never leaves a fingerprint without its blob.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::constants::{ENCRYPTED_KEY_FILE, FINGERPRINT_FILE};
use crate::core::files::write_new_private;
use crate::core::key::{KeyMaterial, PublicKey};
use crate::core::keygen::KeyGenerator;
use crate::core::kms::KeyService;
use crate::error::{KeyError, KmsError, Result};

/// Locations of the managed key files.
#[derive(Debug, Clone)]
pub struct KeyPaths {
    pub blob: PathBuf,
    pub fingerprint: PathBuf,
}

impl KeyPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            blob: root.join(ENCRYPTED_KEY_FILE),
            fingerprint: root.join(FINGERPRINT_FILE),
        }
    }
}

/// State of the managed key files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Neither blob nor fingerprint exists.
    NoKey,
    /// The encrypted blob exists.
    KeyPresent,
    /// A fingerprint exists without its blob.
    Inconsistent,
}

impl KeyState {
    pub fn detect(paths: &KeyPaths) -> Self {
        if paths.blob.exists() {
            Self::KeyPresent
        } else if paths.fingerprint.exists() {
            Self::Inconsistent
        } else {
            Self::NoKey
        }
    }
}

/// Result of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// A new key was generated, sealed and fingerprinted.
    Generated(PublicKey),
    /// The existing key decrypted and matched its fingerprint.
    Verified(PublicKey),
}

impl Bootstrap {
    pub fn public_key(&self) -> &PublicKey {
        match self {
            Self::Generated(key) | Self::Verified(key) => key,
        }
    }
}

/// Bootstrap, verification and loading of the managed age key.
pub struct KeyLifecycle<'a> {
    paths: KeyPaths,
    kms: &'a dyn KeyService,
}

impl<'a> KeyLifecycle<'a> {
    pub fn new(root: &Path, kms: &'a dyn KeyService) -> Self {
        Self {
            paths: KeyPaths::new(root),
            kms,
        }
    }

    pub fn state(&self) -> KeyState {
        KeyState::detect(&self.paths)
    }

    /// Generate the managed key, or verify it if it already exists.
    ///
    /// # Errors
    ///
    /// - `KeyError::RefuseRegenerate` when only the fingerprint exists
    /// - `KeyError::FingerprintMismatch` when the stored key no longer matches
    /// - `KeyError::MalformedKeyMaterial` on unusable generator output
    /// - key service and generator failures, unchanged
    pub fn bootstrap(&self, keygen: &dyn KeyGenerator) -> Result<Bootstrap> {
        let state = self.state();
        debug!(?state, "bootstrap");

        match state {
            KeyState::KeyPresent => self.verify().map(Bootstrap::Verified),
            KeyState::Inconsistent => Err(KeyError::RefuseRegenerate {
                fingerprint: self.paths.fingerprint.clone(),
                blob: self.paths.blob.clone(),
            }
            .into()),
            KeyState::NoKey => self.generate(keygen).map(Bootstrap::Generated),
        }
    }

    /// Decrypt the stored key and check it against the fingerprint.
    pub fn verify(&self) -> Result<PublicKey> {
        if self.paths.blob.exists() && !self.paths.fingerprint.exists() {
            return Err(KeyError::FingerprintMissing(self.paths.fingerprint.clone()).into());
        }
        let (_, public) = self.open(true)?;
        info!(public_key = %public, "age key verified");
        Ok(public)
    }

    /// Key material for secret operations.
    ///
    /// The key is checked against the fingerprint whenever one exists.
    pub fn load(&self) -> Result<KeyMaterial> {
        let (key, _) = self.open(self.paths.fingerprint.exists())?;
        Ok(key)
    }

    fn open(&self, check_fingerprint: bool) -> Result<(KeyMaterial, PublicKey)> {
        let sealed = match std::fs::read(&self.paths.blob) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KmsError::BlobNotFound(self.paths.blob.clone()).into())
            }
            Err(e) => return Err(e.into()),
        };

        debug!(backend = self.kms.name(), "decrypting age key");
        let key = KeyMaterial::from_bytes(self.kms.decrypt(&sealed)?)?;
        let public = key.public_key()?;

        if check_fingerprint {
            let persisted = std::fs::read_to_string(&self.paths.fingerprint)?;
            if !public.fingerprint().matches(&persisted) {
                return Err(KeyError::FingerprintMismatch(self.paths.fingerprint.clone()).into());
            }
        } else {
            warn!(
                path = %self.paths.fingerprint.display(),
                "no fingerprint; age key used unverified"
            );
        }

        Ok((key, public))
    }

    fn generate(&self, keygen: &dyn KeyGenerator) -> Result<PublicKey> {
        let key = keygen.generate()?;
        let public = key.public_key()?;
        let fingerprint = public.fingerprint();

        debug!(backend = self.kms.name(), "sealing age key");
        let sealed = self.kms.encrypt(key.as_bytes())?;

        write_new_private(&self.paths.blob, &sealed)?;
        write_new_private(&self.paths.fingerprint, fingerprint.as_str().as_bytes())?;

        info!(public_key = %public, "age key generated and sealed");
        Ok(public)
    }
}
