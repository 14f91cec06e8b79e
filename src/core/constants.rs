//! Constants used throughout secretsctl.
//!
//! Centralizes file names, suffixes and markers shared with the external tools.

/// Encrypted age key blob, relative to the project root.
pub const ENCRYPTED_KEY_FILE: &str = "age-key.encrypted";

/// Fingerprint of the age public key, relative to the project root.
pub const FINGERPRINT_FILE: &str = ".age-key.fingerprint";

/// sops creation rules, relative to the project root.
pub const POLICY_FILE: &str = ".sops.yaml";

/// Optional project settings file.
pub const SETTINGS_FILE: &str = ".secretsctl.toml";

/// Suffix of plaintext secret files.
pub const PLAINTEXT_SUFFIX: &str = ".yaml";

/// Suffix of sops-encrypted secret files.
pub const ENCRYPTED_SUFFIX: &str = ".enc.yaml";

/// Comment marker age-keygen writes in front of the public key.
pub const PUBLIC_KEY_MARKER: &str = "# public key:";

/// Prefix of the private key line in age-keygen output.
pub const SECRET_KEY_PREFIX: &str = "AGE-SECRET-KEY-";

/// Top-level key sops appends to every file it encrypts.
pub const SOPS_METADATA_LINE: &str = "sops:";

/// Environment variable sops reads the age identity from.
pub const SOPS_AGE_KEY_ENV: &str = "SOPS_AGE_KEY";

/// Encryption context bound into every KMS call.
pub const KMS_CONTEXT_KEY: &str = "purpose";
pub const KMS_CONTEXT_VALUE: &str = "age-key";

/// Default external binaries.
pub const SOPS_BIN: &str = "sops";
pub const AGE_KEYGEN_BIN: &str = "age-keygen";

/// Mode for every file secretsctl creates.
#[cfg(unix)]
pub const PRIVATE_FILE_MODE: u32 = 0o600;
