//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a secretsctl command rooted in the project directory.
    ///
    /// Ambient AWS and secretsctl variables are cleared so the host
    /// environment cannot leak into a test.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secretsctl").expect("failed to find secretsctl binary");
        for var in [
            "SECRETSCTL_KMS_KEY_ID",
            "SECRETSCTL_KMS_ENDPOINT",
            "SECRETSCTL_SOPS",
            "SECRETSCTL_AGE_KEYGEN",
            "SECRETSCTL_LOG",
            "AWS_REGION",
            "AWS_DEFAULT_REGION",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Command wired to the fake age-keygen and sops scripts and a KMS key id.
    pub fn fake_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("SECRETSCTL_KMS_KEY_ID", "alias/secretsctl-test");
        cmd.env("AWS_REGION", "us-east-1");
        cmd.env("SECRETSCTL_AGE_KEYGEN", self.bin.path().join("age-keygen"));
        cmd.env("SECRETSCTL_SOPS", self.bin.path().join("sops"));
        cmd
    }

    fn run(&self, mut cmd: Command, args: &[&str]) -> Output {
        cmd.args(args)
            .output()
            .unwrap_or_else(|e| panic!("failed to run secretsctl {:?}: {}", args, e))
    }

    /// Shortcut for `secretsctl bootstrap`.
    pub fn bootstrap(&self) -> Output {
        self.run(self.fake_cmd(), &["bootstrap"])
    }

    /// Shortcut for `secretsctl enc <file>`.
    pub fn enc(&self, file: &str) -> Output {
        self.run(self.fake_cmd(), &["enc", file])
    }

    /// Shortcut for `secretsctl dec <file>`.
    pub fn dec(&self, file: &str) -> Output {
        self.run(self.fake_cmd(), &["dec", file])
    }

    /// Shortcut for `secretsctl validate <file>`.
    pub fn validate(&self, file: &str) -> Output {
        self.run(self.fake_cmd(), &["validate", file])
    }

    /// Shortcut for `secretsctl diff <file>`.
    pub fn diff(&self, file: &str) -> Output {
        self.run(self.fake_cmd(), &["diff", file])
    }

    /// Shortcut for `secretsctl doctor`.
    pub fn doctor(&self, json: bool) -> Output {
        let args: &[&str] = if json { &["doctor", "--json"] } else { &["doctor"] };
        self.run(self.fake_cmd(), args)
    }
}
