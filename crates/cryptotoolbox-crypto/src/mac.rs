//! HMAC-SHA256 message authentication codes.
//!
//! Used to tag exported wallet envelopes. Verification always goes
//! through [`hmac::Mac::verify_slice`], which compares in constant time.

use cryptotoolbox_types::{Result, ToolboxError};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HMAC-SHA256 type alias.
type HmacSha256 = Hmac<Sha256>;

/// Fixed output length of HMAC-SHA256 in bytes.
pub const HMAC_SHA256_LEN: usize = 32;

fn keyed(key: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(key).map_err(|e| ToolboxError::CryptoError {
        reason: format!("HMAC-SHA256 key init failed: {e}"),
    })
}

/// Computes HMAC-SHA256 over `data` using `key`.
///
/// Any key length is accepted, including the empty key.
///
/// # Errors
///
/// Returns [`ToolboxError::CryptoError`] if HMAC initialisation fails
/// (should not happen with SHA-256, but we avoid `unwrap`).
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA256_LEN]> {
    let mut mac = keyed(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Computes HMAC-SHA256 and returns it as lowercase hex (64 chars).
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String> {
    hmac_sha256(key, data).map(hex::encode)
}

/// Verifies an HMAC-SHA256 tag in constant time.
///
/// # Errors
///
/// - [`ToolboxError::CryptoError`] if HMAC initialisation fails.
/// - [`ToolboxError::Integrity`] if `expected` does not match the
///   recomputed tag (including a wrong length).
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], expected: &[u8]) -> Result<()> {
    let mut mac = keyed(key)?;
    mac.update(data);

    mac.verify_slice(expected).map_err(|_| ToolboxError::Integrity {
        reason: "HMAC-SHA256 tag mismatch (wrong passphrase or corrupted data)".into(),
    })
}

/// Verifies a hex-encoded HMAC-SHA256 tag in constant time.
///
/// Only lowercase hex, as emitted by [`hmac_sha256_hex`], is accepted.
/// Anything else is reported as an integrity failure, so altering any
/// character of a stored tag (case included) is detected.
pub fn verify_hmac_sha256_hex(key: &[u8], data: &[u8], expected_hex: &str) -> Result<()> {
    if !expected_hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(ToolboxError::Integrity {
            reason: "HMAC-SHA256 tag is not lowercase hex (corrupted data)".into(),
        });
    }
    let expected = hex::decode(expected_hex).map_err(|_| ToolboxError::Integrity {
        reason: "HMAC-SHA256 tag is not valid hex (corrupted data)".into(),
    })?;
    verify_hmac_sha256(key, data, &expected)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
