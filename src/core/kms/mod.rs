//! Key service backends.
//!
//! The age key is sealed with a cloud KMS key (envelope encryption). Every
//! call carries the `purpose = age-key` encryption context, so a blob sealed
//! here cannot be opened under a different context.
//!
//! ## Backends
//!
//! - **AWS KMS**: Feature-gated (`aws`, on by default).
//! - **Stub**: Feature-gated (`test-kms`). Reversible encoding for end-to-end
//!   tests; never use it for real keys.

use zeroize::Zeroizing;

use crate::error::Result;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(any(test, feature = "test-kms"))]
pub mod stub;

/// Encrypt/decrypt against a managed key.
///
/// Calls are single-shot and blocking. Retries, if any, belong to the
/// transport client.
pub trait KeyService: std::fmt::Debug {
    /// Seal key material under the configured key.
    ///
    /// # Errors
    ///
    /// `KmsError::KeyIdNotConfigured` when no key id is set,
    /// `KmsError::Service` on transport or authorization failure.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Open a blob produced by [`KeyService::encrypt`].
    ///
    /// # Errors
    ///
    /// `KmsError::Service` on transport, authorization or context failure.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}
