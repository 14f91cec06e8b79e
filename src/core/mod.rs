//! Core library components.
//!
//! Key lifecycle, filename guards, the key service and tool seams, and the
//! secret file operations built on them.

pub mod config;
pub mod constants;
pub mod doctor;
pub mod files;
pub mod guard;
pub mod key;
pub mod keygen;
pub mod kms;
pub mod lifecycle;
pub mod policy;
pub mod secrets;
pub mod sops;
