//! sops subprocess wrapper.
//!
//! The age identity reaches sops only through the `SOPS_AGE_KEY` variable of
//! the child process. Both output streams are captured so nothing secret is
//! echoed to the terminal. The `Command` keeps its own copy of the variable,
//! which is not zeroized; it is dropped as soon as the child exits so that
//! copy lives no longer than the subprocess.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::constants::SOPS_AGE_KEY_ENV;
use crate::core::key::KeyMaterial;
use crate::error::{Result, ToolError};

/// Encrypts and decrypts secret files with a given age identity.
pub trait SecretTool {
    /// Encrypt `input` into `output`.
    fn encrypt(&self, input: &Path, output: &Path, key: &KeyMaterial) -> Result<()>;

    /// Decrypt `input` and return the plaintext.
    fn decrypt(&self, input: &Path, key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>>;
}

/// The sops CLI, run from the project root so it picks up `.sops.yaml`.
#[derive(Debug, Clone)]
pub struct Sops {
    program: String,
    workdir: PathBuf,
}

impl Sops {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    fn run(&self, args: &[&OsStr], key: &KeyMaterial) -> Result<Output> {
        trace!(program = %self.program, args = ?args, "running sops");

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.workdir)
            .env(SOPS_AGE_KEY_ENV, key.expose())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().map_err(|source| ToolError::Spawn {
            program: self.program.clone(),
            source,
        });
        // Frees, but does not wipe, the environment copy of the key.
        drop(cmd);
        Ok(output?)
    }
}

impl SecretTool for Sops {
    fn encrypt(&self, input: &Path, output: &Path, key: &KeyMaterial) -> Result<()> {
        debug!(input = %input.display(), output = %output.display(), "sops encrypt");

        let result = self.run(
            &[
                OsStr::new("--encrypt"),
                OsStr::new("--output"),
                output.as_os_str(),
                input.as_os_str(),
            ],
            key,
        )?;

        if !result.status.success() {
            return Err(ToolError::EncryptionFailed {
                path: input.to_path_buf(),
                stderr: stderr_line(&result.stderr, result.status),
            }
            .into());
        }
        Ok(())
    }

    fn decrypt(&self, input: &Path, key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
        debug!(input = %input.display(), "sops decrypt");

        let result = self.run(&[OsStr::new("--decrypt"), input.as_os_str()], key)?;
        let plaintext = Zeroizing::new(result.stdout);

        if !result.status.success() {
            return Err(ToolError::DecryptionFailed {
                path: input.to_path_buf(),
                stderr: stderr_line(&result.stderr, result.status),
            }
            .into());
        }

        trace!(plaintext_len = plaintext.len(), "sops decrypt finished");
        Ok(plaintext)
    }
}

/// Collapse a tool's stderr into one line for error messages.
pub(crate) fn stderr_line(stderr: &[u8], status: ExitStatus) -> String {
    let text = String::from_utf8_lossy(stderr);
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    if joined.is_empty() {
        status.to_string()
    } else {
        joined
    }
}
