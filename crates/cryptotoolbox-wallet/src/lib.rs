//! Wallet key material for cryptotoolbox.
//!
//! - **Create** a wallet from a supplied or freshly generated seed phrase
//! - **Derive** deterministic per-index key material (PBKDF2 + SHA-256)
//! - **Export / import** a JSON envelope tagged with HMAC-SHA256
//!
//! This is demo key material only: there is no elliptic-curve key pair,
//! no address standard and no encryption of the exported phrase.

pub mod canonical;
pub mod envelope;
pub mod wallet;
pub mod wallet_file;

pub use envelope::{export_envelope, import_envelope};
pub use wallet::{KeyMaterial, Wallet};
