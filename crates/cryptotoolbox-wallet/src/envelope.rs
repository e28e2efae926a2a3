//! HMAC-tagged JSON export envelope.
//!
//! # Format
//!
//! ```json
//! {
//!   "payload": {
//!     "seed_phrase": "<string>"
//!   },
//!   "mac": "<64 lowercase hex chars>"
//! }
//! ```
//!
//! `mac = HMAC-SHA256(passphrase, canonical_json(payload))`. The tag
//! gives integrity only: the seed phrase is stored in plaintext.
//! Indentation of the envelope itself is cosmetic; only the canonical
//! re-encoding of `payload` is authenticated.

use cryptotoolbox_crypto::mac::{hmac_sha256_hex, verify_hmac_sha256_hex};
use cryptotoolbox_types::{Result, ToolboxError};
use serde::Serialize;
use serde_json::Value;

use crate::canonical::{canonicalize_value, to_ascii_pretty_json, to_canonical_json};
use crate::wallet::Wallet;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WalletPayload<'a> {
    seed_phrase: &'a str,
}

/// Field order here fixes the output order: `payload` first, then `mac`.
#[derive(Serialize)]
struct WalletEnvelope<'a> {
    payload: WalletPayload<'a>,
    mac: String,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Exports `wallet` as a pretty-printed (2-space, ASCII-escaped) JSON
/// envelope whose `mac` is keyed by `passphrase`.
///
/// # Errors
///
/// Returns [`ToolboxError::CryptoError`] if HMAC initialisation fails, or
/// [`ToolboxError::MalformedInput`] if serialization fails (neither is
/// expected for a string payload).
pub fn export_envelope(wallet: &Wallet, passphrase: &str) -> Result<String> {
    let payload = WalletPayload {
        seed_phrase: wallet.seed_phrase(),
    };

    let canonical = to_canonical_json(&payload)?;
    let mac = hmac_sha256_hex(passphrase.as_bytes(), &canonical)?;

    let envelope = WalletEnvelope { payload, mac };
    let json = to_ascii_pretty_json(&envelope)?;

    tracing::info!(words = wallet.word_count(), "wallet exported");
    Ok(json)
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Verifies an envelope with `passphrase` and returns the wallet it holds.
///
/// # Validation order
///
/// 1. The text parses as a JSON object.
/// 2. `payload` is present and is an object.
/// 3. `mac` is present and is a string.
/// 4. The whole `payload` object is re-canonicalized and its tag compared
///    in constant time against `mac`.
/// 5. `payload.seed_phrase` is a string.
///
/// # Errors
///
/// - [`ToolboxError::MalformedInput`] for steps 1–3 and 5.
/// - [`ToolboxError::Integrity`] for step 4: wrong passphrase, altered
///   payload, or altered tag.
pub fn import_envelope(json_text: &str, passphrase: &str) -> Result<Wallet> {
    let envelope: Value = serde_json::from_str(json_text).map_err(|e| {
        ToolboxError::MalformedInput {
            reason: format!("envelope is not valid JSON: {e}"),
        }
    })?;

    let fields = envelope.as_object().ok_or_else(|| ToolboxError::MalformedInput {
        reason: "envelope must be a JSON object".into(),
    })?;

    let payload = fields.get("payload").ok_or_else(|| missing_field("payload"))?;
    if !payload.is_object() {
        return Err(ToolboxError::MalformedInput {
            reason: "`payload` must be a JSON object".into(),
        });
    }

    let mac = fields
        .get("mac")
        .ok_or_else(|| missing_field("mac"))?
        .as_str()
        .ok_or_else(|| ToolboxError::MalformedInput {
            reason: "`mac` must be a string".into(),
        })?;

    let canonical = canonicalize_value(payload)?;
    if let Err(e) = verify_hmac_sha256_hex(passphrase.as_bytes(), &canonical, mac) {
        if e.is_integrity() {
            tracing::warn!("wallet envelope failed integrity check");
        }
        return Err(e);
    }

    let seed_phrase = payload
        .get("seed_phrase")
        .ok_or_else(|| missing_field("payload.seed_phrase"))?
        .as_str()
        .ok_or_else(|| ToolboxError::MalformedInput {
            reason: "`payload.seed_phrase` must be a string".into(),
        })?;

    tracing::info!("wallet imported");
    Ok(Wallet::from_seed_phrase(seed_phrase))
}

fn missing_field(name: &str) -> ToolboxError {
    ToolboxError::MalformedInput {
        reason: format!("missing field `{name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() -> std::result::Result<(), ToolboxError> {
        let wallet = Wallet::generate();
        let json = export_envelope(&wallet, "pw")?;
        let restored = import_envelope(&json, "pw")?;
        assert_eq!(restored.seed_phrase(), wallet.seed_phrase());
        Ok(())
    }

    #[test]
    fn payload_comes_before_mac() -> std::result::Result<(), ToolboxError> {
        let json = export_envelope(&Wallet::from_seed_phrase("x"), "")?;
        let payload_at = json.find("\"payload\"");
        let mac_at = json.find("\"mac\"");
        assert!(payload_at < mac_at);
        Ok(())
    }

    #[test]
    fn extra_payload_fields_are_authenticated() -> std::result::Result<(), ToolboxError> {
        let payload = serde_json::json!({ "seed_phrase": "kilo", "label": "savings" });
        let canonical = canonicalize_value(&payload)?;
        let mac = hmac_sha256_hex(b"pw", &canonical)?;
        let envelope = serde_json::json!({ "payload": payload, "mac": mac }).to_string();

        assert_eq!(import_envelope(&envelope, "pw")?.seed_phrase(), "kilo");

        let stripped =
            serde_json::json!({ "payload": { "seed_phrase": "kilo" }, "mac": mac }).to_string();
        assert!(import_envelope(&stripped, "pw").unwrap_err().is_integrity());
        Ok(())
    }

    #[test]
    fn not_json_is_malformed() {
        let err = import_envelope("not json", "pw").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn top_level_array_is_malformed() {
        assert!(import_envelope("[]", "pw").unwrap_err().is_malformed());
    }

    #[test]
    fn missing_payload_is_malformed() {
        let err = import_envelope(r#"{"mac":"00"}"#, "pw").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn payload_must_be_object() {
        let err = import_envelope(r#"{"payload":"x","mac":"00"}"#, "pw").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn missing_mac_is_malformed() {
        let err = import_envelope(r#"{"payload":{"seed_phrase":"a"}}"#, "pw").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn non_string_mac_is_malformed() {
        let err = import_envelope(r#"{"payload":{"seed_phrase":"a"},"mac":7}"#, "pw").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn authentic_payload_without_seed_phrase_is_malformed() -> std::result::Result<(), ToolboxError> {
        let payload = serde_json::json!({ "phrase": "a" });
        let mac = hmac_sha256_hex(b"pw", &canonicalize_value(&payload)?)?;
        let envelope = serde_json::json!({ "payload": payload, "mac": mac }).to_string();
        assert!(import_envelope(&envelope, "pw").unwrap_err().is_malformed());
        Ok(())
    }

    #[test]
    fn authentic_non_string_seed_phrase_is_malformed() -> std::result::Result<(), ToolboxError> {
        let payload = serde_json::json!({ "seed_phrase": 12 });
        let mac = hmac_sha256_hex(b"", &canonicalize_value(&payload)?)?;
        let envelope = serde_json::json!({ "payload": payload, "mac": mac }).to_string();
        assert!(import_envelope(&envelope, "").unwrap_err().is_malformed());
        Ok(())
    }
}
