//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! Stretches a password (here: the wallet seed phrase) into fixed-length
//! key material. Output is zeroized on drop.

use cryptotoolbox_types::{Result, ToolboxError};
use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ---------------------------------------------------------------------------
// DerivedKey
// ---------------------------------------------------------------------------

/// 256-bit key produced by [`pbkdf2_sha256`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; 32]);

impl DerivedKey {
    /// Fixed byte length of the derived key.
    pub const LEN: usize = 32;

    /// Returns the raw 32-byte key material.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding of the key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// DerivedKey does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

/// Derives a 32-byte key with PBKDF2-HMAC-SHA256.
///
/// # Errors
///
/// Returns [`ToolboxError::CryptoError`] if `iterations` is zero or the
/// underlying PBKDF2 call rejects its parameters.
pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    let mut output = [0u8; DerivedKey::LEN];
    pbkdf2_sha256_into(password, salt, iterations, &mut output)?;
    Ok(DerivedKey(output))
}

/// Fills `output` with PBKDF2-HMAC-SHA256 key material of any length.
pub fn pbkdf2_sha256_into(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output: &mut [u8],
) -> Result<()> {
    if iterations == 0 {
        return Err(ToolboxError::CryptoError {
            reason: "PBKDF2 iteration count must be at least 1".into(),
        });
    }

    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, output).map_err(|e| {
        ToolboxError::CryptoError {
            reason: format!("PBKDF2-HMAC-SHA256 derivation failed: {e}"),
        }
    })
}
