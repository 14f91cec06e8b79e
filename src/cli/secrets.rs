//! Secret file commands: enc, dec, validate and diff.
//!
//! The age key is only fetched from KMS once the file name and filesystem
//! checks have passed.

use tracing::info;

use crate::cli::output;
use crate::cli::resolve::Context;
use crate::core::guard;
use crate::core::lifecycle::KeyLifecycle;
use crate::core::secrets::SecretFiles;
use crate::error::Result;

/// Encrypt `<name>.yaml` into `<name>.enc.yaml`.
pub fn enc(file: &str) -> Result<()> {
    info!(file, "encrypting secret");
    let ctx = Context::load()?;
    let kms = ctx.key_service()?;
    let lifecycle = KeyLifecycle::new(&ctx.root, kms.as_ref());
    let sops = ctx.sops();

    SecretFiles::new(&ctx.root, &sops).encrypt(file, || lifecycle.load())?;

    output::success(&format!(
        "encrypted {} → {}",
        output::path(file),
        output::path(&guard::encrypted_name(file))
    ));
    Ok(())
}

/// Decrypt `<name>.enc.yaml` into `<name>.yaml`.
pub fn dec(file: &str) -> Result<()> {
    info!(file, "decrypting secret");
    let ctx = Context::load()?;
    let kms = ctx.key_service()?;
    let lifecycle = KeyLifecycle::new(&ctx.root, kms.as_ref());
    let sops = ctx.sops();

    SecretFiles::new(&ctx.root, &sops).decrypt(file, || lifecycle.load())?;

    output::success(&format!(
        "decrypted {} → {}",
        output::path(file),
        output::path(&guard::plain_name(file))
    ));
    output::hint(&format!(
        "re-encrypt and delete {} before committing",
        guard::plain_name(file)
    ));
    Ok(())
}

/// Check that `<name>.enc.yaml` decrypts with the managed key.
pub fn validate(file: &str) -> Result<()> {
    info!(file, "validating secret");
    let ctx = Context::load()?;
    let kms = ctx.key_service()?;
    let lifecycle = KeyLifecycle::new(&ctx.root, kms.as_ref());
    let sops = ctx.sops();

    SecretFiles::new(&ctx.root, &sops).validate(file, || lifecycle.load())?;

    output::success(&format!("{} decrypts with the managed key", output::path(file)));
    Ok(())
}

/// Print the SHA-256 of the decrypted content of `<name>.enc.yaml`.
pub fn diff(file: &str) -> Result<()> {
    info!(file, "auditing secret");
    let ctx = Context::load()?;
    let kms = ctx.key_service()?;
    let lifecycle = KeyLifecycle::new(&ctx.root, kms.as_ref());
    let sops = ctx.sops();

    let digest = SecretFiles::new(&ctx.root, &sops).audit(file, || lifecycle.load())?;

    println!("Decrypted content SHA-256 (audit only): {}", digest);
    Ok(())
}
