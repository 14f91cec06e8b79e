//! secretsctl - age + sops secrets workflow with the age key sealed by AWS KMS.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── bootstrap     # Create or verify the managed key
//! │   ├── secrets       # enc / dec / validate / diff
//! │   ├── doctor        # Environment checks
//! │   └── resolve       # Settings -> backends
//! └── core/
//!     ├── guard         # <name>.yaml / <name>.enc.yaml contract
//!     ├── key           # Key material, public key, fingerprint
//!     ├── lifecycle     # NoKey / KeyPresent / Inconsistent state machine
//!     ├── kms/          # Key service trait, AWS and stub backends
//!     ├── keygen        # age-keygen wrapper
//!     ├── sops          # sops wrapper
//!     ├── secrets       # Secret file operations
//!     ├── policy        # .sops.yaml
//!     ├── doctor        # Read-only checks
//!     └── config        # .secretsctl.toml + environment
//! ```
//!
//! # Files
//!
//! - `age-key.encrypted`: the age private key, sealed by KMS
//! - `.age-key.fingerprint`: SHA-256 of the age public key
//! - `.sops.yaml`: sops creation rules for the public key
//!
//! Concurrent invocations against the same directory are not safe; callers
//! must serialize them.

pub mod cli;
pub mod core;
pub mod error;
