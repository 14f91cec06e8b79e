//! Test support utilities for secretsctl integration tests.
//!
//! Provides isolated project directories, the binary under test, and fake
//! collaborators for the library-level tests.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fakes;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fakes::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::collections::BTreeSet;
use std::path::Path;

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// No process-global state is mutated. Child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary project root
    pub dir: TempDir,
    /// Temporary directory for fake tool scripts
    pub bin: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bin = TempDir::new().expect("failed to create temp bin dir");
        Self { dir, bin }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn write(&self, name: &str, contents: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, contents).expect("failed to write file");
    }

    /// Read a file relative to the project root.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("failed to read file")
    }

    pub fn read_bytes(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.dir.path().join(name)).expect("failed to read file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Names of all entries in the project root.
    pub fn files(&self) -> BTreeSet<String> {
        std::fs::read_dir(self.dir.path())
            .expect("failed to list temp dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect()
    }
}
