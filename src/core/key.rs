//! Age key material, its public key and fingerprint.
//!
//! Key material only ever lives in memory. The buffer is zeroized on drop and
//! never shows up in `Debug` output or logs.

use std::fmt;

use ::age::x25519;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::core::constants::{PUBLIC_KEY_MARKER, SECRET_KEY_PREFIX};
use crate::error::{KeyError, Result};

/// Private age key file contents as produced by age-keygen.
#[derive(Clone)]
pub struct KeyMaterial {
    text: Zeroizing<String>,
}

impl KeyMaterial {
    /// Wrap raw bytes, which must be UTF-8.
    pub fn from_bytes(bytes: Zeroizing<Vec<u8>>) -> Result<Self> {
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| KeyError::MalformedKeyMaterial("key material is not UTF-8".into()))?;
        Ok(Self {
            text: Zeroizing::new(text.to_string()),
        })
    }

    /// Raw key file contents. Handle with care.
    pub fn expose(&self) -> &str {
        &self.text
    }

    /// Raw key file contents as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Public key from the `# public key:` comment.
    ///
    /// The `AGE-SECRET-KEY-` line must be present and derive to the same
    /// recipient, otherwise the material is rejected as malformed.
    pub fn public_key(&self) -> Result<PublicKey> {
        let declared = self
            .text
            .lines()
            .find_map(|line| line.strip_prefix(PUBLIC_KEY_MARKER))
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                KeyError::MalformedKeyMaterial("public key not found in age key material".into())
            })?;

        let secret_line = self
            .text
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with(SECRET_KEY_PREFIX))
            .ok_or_else(|| {
                KeyError::MalformedKeyMaterial("no AGE-SECRET-KEY line in key material".into())
            })?;

        let identity: x25519::Identity = secret_line
            .parse()
            .map_err(|e: &str| KeyError::MalformedKeyMaterial(e.to_string()))?;

        if identity.to_public().to_string() != declared {
            return Err(KeyError::MalformedKeyMaterial(
                "public key comment does not match the secret key".into(),
            )
            .into());
        }

        Ok(PublicKey(declared.to_string()))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

/// An age recipient (`age1...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 of the public key string.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(format!("{:x}", Sha256::digest(self.0.as_bytes())))
    }
}

impl std::str::FromStr for PublicKey {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        s.parse::<x25519::Recipient>()
            .map_err(|e: &str| KeyError::MalformedKeyMaterial(format!("invalid public key: {}", e)))?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase hex SHA-256 digest of a public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against persisted fingerprint contents.
    ///
    /// Surrounding whitespace is ignored on both sides; everything else must
    /// match byte for byte.
    pub fn matches(&self, persisted: &str) -> bool {
        self.0.trim() == persisted.trim()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-256 digest of arbitrary content as lowercase hex.
pub fn sha256_hex(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}
