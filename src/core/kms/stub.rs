//! Stub key service.
//!
//! Hex encoding with a prefix that embeds the key id and purpose context. NOT
//! cryptographically secure; it only exercises the plumbing.

use zeroize::Zeroizing;

use super::KeyService;
use crate::core::config::KmsSettings;
use crate::core::constants::KMS_CONTEXT_VALUE;
use crate::error::{KmsError, Result};

const PREFIX: &str = "stub-kms";

#[derive(Debug)]
pub struct StubKms {
    key_id: Option<String>,
}

impl StubKms {
    pub fn new(settings: KmsSettings) -> Self {
        Self {
            key_id: settings.key_id,
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(hex: &str) -> Result<Vec<u8>> {
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return Err(KmsError::Service("invalid hex".into()).into());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| KmsError::Service(format!("invalid hex: {}", e)).into())
        })
        .collect()
}

impl KeyService for StubKms {
    fn name(&self) -> &'static str {
        "stub-kms"
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key_id = self.key_id.as_deref().ok_or(KmsError::KeyIdNotConfigured)?;
        Ok(format!(
            "{}:{}:{}:{}",
            PREFIX,
            KMS_CONTEXT_VALUE,
            to_hex(key_id.as_bytes()),
            to_hex(plaintext)
        )
        .into_bytes())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let text = std::str::from_utf8(ciphertext)
            .map_err(|_| KmsError::Service("not a stub-kms ciphertext".into()))?;

        let parts: Vec<&str> = text.splitn(4, ':').collect();
        let [prefix, context, key_hex, payload] = parts[..] else {
            return Err(KmsError::Service("not a stub-kms ciphertext".into()).into());
        };
        if prefix != PREFIX {
            return Err(KmsError::Service("not a stub-kms ciphertext".into()).into());
        }
        if context != KMS_CONTEXT_VALUE {
            return Err(KmsError::Service("encryption context mismatch".into()).into());
        }
        let sealed_under = from_hex(key_hex)?;
        if let Some(expected) = &self.key_id {
            if expected.as_bytes() != sealed_under.as_slice() {
                return Err(KmsError::Service("blob sealed under a different key".into()).into());
            }
        }

        Ok(Zeroizing::new(from_hex(payload)?))
    }
}
