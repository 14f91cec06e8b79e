//! AWS KMS key service.
//!
//! Credentials come from the default provider chain (environment, profile,
//! instance role). Region and endpoint may be pinned through `KmsSettings`.
//!
//! ```toml
//! [kms]
//! key_id = "arn:aws:kms:us-east-1:123456789012:key/12345678-1234-1234-1234-123456789012"
//! region = "us-east-1"
//! ```

use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use tracing::trace;
use zeroize::Zeroizing;

use super::KeyService;
use crate::core::config::KmsSettings;
use crate::core::constants::{KMS_CONTEXT_KEY, KMS_CONTEXT_VALUE};
use crate::error::{Error, KmsError, Result};

/// AWS KMS backend.
#[derive(Debug)]
pub struct AwsKms {
    settings: KmsSettings,
}

impl AwsKms {
    pub fn new(settings: KmsSettings) -> Self {
        Self { settings }
    }

    fn runtime() -> Result<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| KmsError::Service(format!("failed to create runtime: {}", e)).into())
    }

    async fn client(&self) -> aws_sdk_kms::Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &self.settings.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let config = loader.load().await;
        aws_sdk_kms::Client::new(&config)
    }
}

impl KeyService for AwsKms {
    fn name(&self) -> &'static str {
        "aws-kms"
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key_id = self
            .settings
            .key_id
            .as_deref()
            .ok_or(KmsError::KeyIdNotConfigured)?;

        trace!(key_id = %key_id, plaintext_len = plaintext.len(), "encrypting with AWS KMS");

        Self::runtime()?.block_on(async {
            let result = self
                .client()
                .await
                .encrypt()
                .key_id(key_id)
                .plaintext(Blob::new(plaintext))
                .encryption_context(KMS_CONTEXT_KEY, KMS_CONTEXT_VALUE)
                .send()
                .await
                .map_err(|e| {
                    KmsError::Service(format!("KMS encrypt failed: {}", DisplayErrorContext(&e)))
                })?;

            let blob = result
                .ciphertext_blob()
                .ok_or_else(|| KmsError::Service("KMS returned no ciphertext".into()))?;

            trace!(ciphertext_len = blob.as_ref().len(), "encrypted with AWS KMS");
            Ok::<_, Error>(blob.as_ref().to_vec())
        })
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting with AWS KMS");

        Self::runtime()?.block_on(async {
            // The key id is embedded in the blob; pinning it rejects blobs
            // sealed under any other key.
            let result = self
                .client()
                .await
                .decrypt()
                .ciphertext_blob(Blob::new(ciphertext))
                .set_key_id(self.settings.key_id.clone())
                .encryption_context(KMS_CONTEXT_KEY, KMS_CONTEXT_VALUE)
                .send()
                .await
                .map_err(|e| {
                    KmsError::Service(format!("KMS decrypt failed: {}", DisplayErrorContext(&e)))
                })?;

            let plaintext = result
                .plaintext()
                .ok_or_else(|| KmsError::Service("KMS returned no plaintext".into()))?;

            Ok::<_, Error>(Zeroizing::new(plaintext.as_ref().to_vec()))
        })
    }
}
