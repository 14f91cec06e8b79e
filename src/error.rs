//! Error types.
//!
//! Every failure is surfaced to the caller as a single line. Messages name the
//! file or path involved and never include key material.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Kms(#[from] KmsError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} environment check(s) failed")]
    Unhealthy(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Managed key lifecycle errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error(
        "fingerprint exists at {} but encrypted age key {} is missing; refusing to regenerate",
        .fingerprint.display(),
        .blob.display()
    )]
    RefuseRegenerate { fingerprint: PathBuf, blob: PathBuf },

    #[error("age key fingerprint mismatch: {} does not match the decrypted key", .0.display())]
    FingerprintMismatch(PathBuf),

    #[error("encrypted age key exists but fingerprint {} is missing", .0.display())]
    FingerprintMissing(PathBuf),

    #[error("malformed age key material: {0}")]
    MalformedKeyMaterial(String),
}

/// Filename contract violations.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("invalid plaintext secret name: {0} (expected <name>.yaml)")]
    InvalidPlaintextName(String),

    #[error("already encrypted: {0}")]
    AlreadyEncrypted(String),

    #[error("not an encrypted secret: {0} (expected <name>.enc.yaml with sops metadata)")]
    NotEncrypted(String),
}

/// Secret file state errors.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("refusing to overwrite existing file: {}", .0.display())]
    OverwriteRefused(PathBuf),

    #[error("secret file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Key service errors.
#[derive(Error, Debug)]
pub enum KmsError {
    #[error("KMS key id is not configured (set SECRETSCTL_KMS_KEY_ID or [kms] key_id)")]
    KeyIdNotConfigured,

    #[error("encrypted age key not found: {}", .0.display())]
    BlobNotFound(PathBuf),

    #[error("key service error: {0}")]
    Service(String),
}

/// External tool failures.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("age-keygen failed: {0}")]
    KeygenFailed(String),

    #[error("sops encryption failed for {}: {stderr}", .path.display())]
    EncryptionFailed { path: PathBuf, stderr: String },

    #[error("sops decryption failed for {}: {stderr}", .path.display())]
    DecryptionFailed { path: PathBuf, stderr: String },
}

/// Settings and policy file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{} already exists; refusing to overwrite", .0.display())]
    PolicyExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
