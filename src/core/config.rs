//! Settings management.
//!
//! Settings come from an optional `.secretsctl.toml` in the project root,
//! overridden by environment variables. They are resolved once at the CLI
//! boundary and passed explicitly to the key service and tool wrappers.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

pub const ENV_KMS_KEY_ID: &str = "SECRETSCTL_KMS_KEY_ID";
pub const ENV_KMS_ENDPOINT: &str = "SECRETSCTL_KMS_ENDPOINT";
pub const ENV_SOPS: &str = "SECRETSCTL_SOPS";
pub const ENV_AGE_KEYGEN: &str = "SECRETSCTL_AGE_KEYGEN";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Resolved settings.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub kms: KmsSettings,
    #[serde(default)]
    pub tools: ToolSettings,
}

/// Key service settings.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct KmsSettings {
    /// KMS key id, alias or ARN used to encrypt the age key.
    pub key_id: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint (e.g. LocalStack).
    pub endpoint_url: Option<String>,
}

/// External binary overrides.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    pub sops: Option<String>,
    pub age_keygen: Option<String>,
}

impl ToolSettings {
    pub fn sops(&self) -> &str {
        self.sops.as_deref().unwrap_or(constants::SOPS_BIN)
    }

    pub fn age_keygen(&self) -> &str {
        self.age_keygen
            .as_deref()
            .unwrap_or(constants::AGE_KEYGEN_BIN)
    }
}

impl Settings {
    /// Load settings for a project root using the process environment.
    pub fn load(root: &Path) -> Result<Self> {
        Ok(Self::from_file(root)?.with_env(|name| std::env::var(name).ok()))
    }

    /// Read `.secretsctl.toml` if present; defaults otherwise.
    pub fn from_file(root: &Path) -> Result<Self> {
        let path = root.join(constants::SETTINGS_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings: Self =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;
        debug!("settings file loaded");
        Ok(settings)
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key_id) = get(ENV_KMS_KEY_ID) {
            self.kms.key_id = Some(key_id);
        }
        if let Some(region) = get(ENV_AWS_REGION).or_else(|| get(ENV_AWS_DEFAULT_REGION)) {
            self.kms.region = Some(region);
        }
        if let Some(endpoint) = get(ENV_KMS_ENDPOINT) {
            self.kms.endpoint_url = Some(endpoint);
        }
        if let Some(sops) = get(ENV_SOPS) {
            self.tools.sops = Some(sops);
        }
        if let Some(keygen) = get(ENV_AGE_KEYGEN) {
            self.tools.age_keygen = Some(keygen);
        }

        debug!(
            key_id_configured = self.kms.key_id.is_some(),
            region = ?self.kms.region,
            "settings resolved"
        );
        self
    }
}
