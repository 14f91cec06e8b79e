//! Bootstrap command - create or verify the managed age key.

use tracing::info;

use crate::cli::output;
use crate::cli::resolve::Context;
use crate::core::constants::POLICY_FILE;
use crate::core::lifecycle::{Bootstrap, KeyLifecycle, KeyState};
use crate::core::policy;
use crate::error::Result;

/// Generate, seal and fingerprint a fresh age key, or verify the existing one.
///
/// A fresh key also gets a `.sops.yaml` for its public key, so a fresh
/// bootstrap refuses up front when one already exists.
pub fn execute() -> Result<()> {
    let ctx = Context::load()?;
    let kms = ctx.key_service()?;
    let lifecycle = KeyLifecycle::new(&ctx.root, kms.as_ref());

    info!("bootstrapping age key");

    if lifecycle.state() == KeyState::NoKey {
        policy::ensure_absent(&ctx.root)?;
    }

    match lifecycle.bootstrap(&ctx.keygen())? {
        Bootstrap::Generated(public) => {
            output::success("age key generated, fingerprinted and encrypted with KMS");
            policy::write(&ctx.root, &public)?;
            output::success(&format!("created {}", output::path(POLICY_FILE)));
            output::kv("public key", &public);
        }
        Bootstrap::Verified(public) => {
            output::success("age key verified (encrypted key + fingerprint match)");
            output::kv("public key", &public);
            match policy::lists(&ctx.root, &public)? {
                Some(true) => {}
                Some(false) => output::warn(&format!(
                    "{} does not list the managed public key; sops will encrypt to other recipients",
                    POLICY_FILE
                )),
                None => output::warn(&format!("{} not found", POLICY_FILE)),
            }
        }
    }

    Ok(())
}
