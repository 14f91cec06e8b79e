//! secretsctl - age + sops secrets with the age key sealed by AWS KMS.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secretsctl::cli::output;
use secretsctl::cli::{execute, Cli};
use secretsctl::error::{ConfigError, Error, KeyError, KmsError, ToolError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("SECRETSCTL_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secretsctl=debug")
        } else {
            EnvFilter::new("secretsctl=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Kms(KmsError::BlobNotFound(_)) => {
                Some(format!("run: {}", output::cmd("secretsctl bootstrap")))
            }
            Error::Kms(KmsError::KeyIdNotConfigured) => {
                Some("set SECRETSCTL_KMS_KEY_ID or add [kms] key_id to .secretsctl.toml".into())
            }
            Error::Key(KeyError::RefuseRegenerate { .. }) => Some(
                "restore the encrypted key from version control; remove the fingerprint only if nothing was encrypted with it".into(),
            ),
            Error::Key(KeyError::FingerprintMissing(_)) => {
                Some("restore the fingerprint file from version control".into())
            }
            Error::Config(ConfigError::PolicyExists(_)) => {
                Some("move the existing .sops.yaml aside, then run bootstrap again".into())
            }
            Error::Tool(ToolError::Spawn { .. }) => {
                Some(format!("run: {}", output::cmd("secretsctl doctor")))
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::error_hint(&hint);
        }
        std::process::exit(1);
    }
}
