//! Age key generation.

use std::process::{Command, Stdio};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::key::KeyMaterial;
use crate::core::sops::stderr_line;
use crate::error::{Result, ToolError};

/// Source of fresh age key material.
pub trait KeyGenerator {
    fn generate(&self) -> Result<KeyMaterial>;
}

/// Runs `age-keygen` with no arguments and captures the key from stdout.
#[derive(Debug, Clone)]
pub struct AgeKeygen {
    program: String,
}

impl AgeKeygen {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl KeyGenerator for AgeKeygen {
    fn generate(&self) -> Result<KeyMaterial> {
        debug!(program = %self.program, "generating age key");

        let output = Command::new(&self.program)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = Zeroizing::new(output.stdout);
        if !output.status.success() {
            return Err(ToolError::KeygenFailed(stderr_line(&output.stderr, output.status)).into());
        }

        KeyMaterial::from_bytes(stdout)
    }
}
