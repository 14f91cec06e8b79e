//! Command-line interface.

pub mod bootstrap;
pub mod completions;
pub mod doctor;
pub mod output;
pub mod resolve;
pub mod secrets;

use clap::{Parser, Subcommand};

/// secretsctl - age + sops secrets with the age key sealed by AWS KMS.
#[derive(Parser)]
#[command(
    name = "secretsctl",
    about = "AGE + SOPS + AWS KMS secrets manager",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize or verify the KMS-encrypted age key
    Bootstrap,

    /// Encrypt a plaintext secret (<name>.yaml -> <name>.enc.yaml)
    Enc {
        /// Plaintext secret file
        file: String,
    },

    /// Decrypt a secret (<name>.enc.yaml -> <name>.yaml)
    Dec {
        /// Encrypted secret file
        file: String,
    },

    /// Check that an encrypted secret decrypts with the managed key
    Validate {
        /// Encrypted secret file
        file: String,
    },

    /// Print the SHA-256 of a secret's decrypted content without revealing it
    Diff {
        /// Encrypted secret file
        file: String,
    },

    /// Check tools, configuration and key files
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Bootstrap => bootstrap::execute(),
        Enc { file } => secrets::enc(&file),
        Dec { file } => secrets::dec(&file),
        Validate { file } => secrets::validate(&file),
        Diff { file } => secrets::diff(&file),
        Doctor { json } => doctor::execute(json),
        Completions { shell } => completions::execute(shell),
    }
}
