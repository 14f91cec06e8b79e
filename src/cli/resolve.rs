//! Wires settings to concrete backends for a command invocation.

use std::path::PathBuf;

use tracing::debug;

use crate::core::config::Settings;
use crate::core::keygen::AgeKeygen;
use crate::core::kms::KeyService;
use crate::core::sops::Sops;
use crate::error::Result;

/// Project root and resolved settings for one invocation.
pub struct Context {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Context {
    /// Resolve against the current directory and process environment.
    pub fn load() -> Result<Self> {
        let root = std::env::current_dir()?;
        let settings = Settings::load(&root)?;
        debug!(root = %root.display(), "context resolved");
        Ok(Self { root, settings })
    }

    pub fn sops(&self) -> Sops {
        Sops::new(self.settings.tools.sops(), &self.root)
    }

    pub fn keygen(&self) -> AgeKeygen {
        AgeKeygen::new(self.settings.tools.age_keygen())
    }

    /// Key service backend selected at build time.
    #[allow(unreachable_code)]
    pub fn key_service(&self) -> Result<Box<dyn KeyService>> {
        #[cfg(feature = "test-kms")]
        {
            debug!("using stub key service");
            return Ok(Box::new(crate::core::kms::stub::StubKms::new(
                self.settings.kms.clone(),
            )));
        }

        #[cfg(feature = "aws")]
        {
            return Ok(Box::new(crate::core::kms::aws::AwsKms::new(
                self.settings.kms.clone(),
            )));
        }

        Err(crate::error::KmsError::Service(
            "no key service compiled in. Rebuild with: cargo install secretsctl --features aws"
                .to_string(),
        )
        .into())
    }
}
