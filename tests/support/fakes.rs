//! In-process fakes for the key service, key generator and sops.

use std::cell::Cell;
use std::path::Path;

use secretsctl::core::key::KeyMaterial;
use secretsctl::core::keygen::KeyGenerator;
use secretsctl::core::kms::KeyService;
use secretsctl::core::sops::SecretTool;
use secretsctl::error::{KmsError, Result, ToolError};
use zeroize::Zeroizing;

pub fn key_material(text: &str) -> KeyMaterial {
    KeyMaterial::from_bytes(Zeroizing::new(text.as_bytes().to_vec())).unwrap()
}

/// Reversible key service that counts calls.
#[derive(Debug, Default)]
pub struct FakeKms {
    pub key_id: Option<String>,
    pub encrypts: Cell<usize>,
    pub decrypts: Cell<usize>,
}

impl FakeKms {
    pub fn new() -> Self {
        Self {
            key_id: Some("alias/test".to_string()),
            ..Default::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.encrypts.get() + self.decrypts.get()
    }
}

impl KeyService for FakeKms {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypts.set(self.encrypts.get() + 1);
        if self.key_id.is_none() {
            return Err(KmsError::KeyIdNotConfigured.into());
        }
        let mut sealed = b"fake-kms:".to_vec();
        sealed.extend(plaintext.iter().map(|b| b ^ 0x5a));
        Ok(sealed)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        self.decrypts.set(self.decrypts.get() + 1);
        let body = ciphertext
            .strip_prefix(b"fake-kms:")
            .ok_or_else(|| KmsError::Service("not a fake-kms blob".into()))?;
        Ok(Zeroizing::new(body.iter().map(|b| b ^ 0x5a).collect()))
    }

    fn name(&self) -> &'static str {
        "fake-kms"
    }
}

/// Key generator returning fixed text.
pub struct FakeKeygen {
    pub text: String,
    pub calls: Cell<usize>,
}

impl FakeKeygen {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Cell::new(0),
        }
    }
}

impl KeyGenerator for FakeKeygen {
    fn generate(&self) -> Result<KeyMaterial> {
        self.calls.set(self.calls.get() + 1);
        Ok(key_material(&self.text))
    }
}

/// sops stand-in: hex-encodes the plaintext and records the recipient.
///
/// Decryption only succeeds with the key the file was encrypted for.
#[derive(Default)]
pub struct FakeSops;

impl SecretTool for FakeSops {
    fn encrypt(&self, input: &Path, output: &Path, key: &KeyMaterial) -> Result<()> {
        let plaintext = std::fs::read(input)?;
        let hex: String = plaintext.iter().map(|b| format!("{:02x}", b)).collect();
        let recipient = key.public_key()?;
        std::fs::write(
            output,
            format!("data: {}\nsops:\n    age: {}\n", hex, recipient),
        )?;
        Ok(())
    }

    fn decrypt(&self, input: &Path, key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
        let text = std::fs::read_to_string(input)?;
        let recipient = key.public_key()?;
        let failed = |stderr: &str| ToolError::DecryptionFailed {
            path: input.to_path_buf(),
            stderr: stderr.to_string(),
        };

        if !text.contains(&format!("age: {}", recipient)) {
            return Err(failed("no matching age identity").into());
        }
        let hex = text
            .lines()
            .find_map(|l| l.strip_prefix("data: "))
            .ok_or_else(|| failed("no data"))?;
        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect();
        Ok(Zeroizing::new(bytes))
    }
}
