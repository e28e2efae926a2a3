//! Cryptographic primitives for cryptotoolbox.
//!
//! This crate is the only place in the workspace that touches hash,
//! KDF or MAC implementations directly.
//!
//! # Modules
//!
//! - [`hash`]: SHA-256 digests
//! - [`kdf`]: PBKDF2-HMAC-SHA256 key stretching
//! - [`mac`]: HMAC-SHA256 tags with constant-time verification
//! - [`wordlist`]: the fixed seed-phrase word list and phrase generation

pub mod hash;
pub mod kdf;
pub mod mac;
pub mod wordlist;
