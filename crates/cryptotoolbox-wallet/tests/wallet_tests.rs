//! Integration tests for cryptotoolbox-wallet.
//!
//! Expected derivation and export values were produced by the reference
//! tool for the fixed phonetic phrase below.

use std::collections::HashSet;

use cryptotoolbox_types::ToolboxError;
use cryptotoolbox_wallet::wallet_file::{export_to_file, import_from_file, load_envelope};
use cryptotoolbox_wallet::Wallet;

// ---------------------------------------------------------------------------
// Test constants
// ---------------------------------------------------------------------------

const PHONETIC: &str = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";

/// Reference export of [`PHONETIC`] with passphrase `"pw"`.
const PHONETIC_EXPORT_PW: &str = r#"{
  "payload": {
    "seed_phrase": "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima"
  },
  "mac": "4f8390d6d35401c30b7b4af10bddff97098bc29334ef793248c07609fe4b191e"
}"#;

/// Reference export of a non-ASCII phrase with the empty passphrase,
/// written with `\u` escapes.
const ACCENTED_EXPORT_EMPTY: &str = r#"{
  "payload": {
    "seed_phrase": "zulu yankee caf\u00e9"
  },
  "mac": "db85582206bec4c08cfba6ca1e0b0d7b415039eeebf8051f8d9631cf11c02676"
}"#;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// RAII guard that removes a temporary file on drop.
struct TempFile(std::path::PathBuf);

impl TempFile {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "cryptotoolbox_test_{name}_{}.json",
            std::process::id()
        ));
        Self(path)
    }

    fn path(&self) -> &std::path::Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Replaces the character at byte offset `at` with a different ASCII
/// character of the same class.
fn flip_char(s: &str, at: usize) -> String {
    let mut bytes = s.as_bytes().to_vec();
    bytes[at] = match bytes[at] {
        b'0' => b'1',
        b'a'..=b'y' => bytes[at] + 1,
        b'z' => b'a',
        b' ' => b'_',
        other => other ^ 0x01,
    };
    String::from_utf8(bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

#[test]
fn derive_matches_reference_vectors() -> Result<(), ToolboxError> {
    let wallet = Wallet::from_seed_phrase(PHONETIC);

    let cases = [
        (
            1,
            "531753fe04a762f8cc7cfd1b91d69769d76f7f9151eaee0feb730da61679c9ab",
            "f25a87e5198f8d3c00d56ca2718c1464d9c27374",
        ),
        (
            7,
            "b476c1ee6bfb3afb233b0fdb5bf81ca2e89a3a888464a2d24da0f6e92cf1145e",
            "91cc431352659d80ddbb9fa28ad8166d4521eb08",
        ),
    ];

    for (index, private_key, address) in cases {
        let key = wallet.derive_key(index)?;
        assert_eq!(key.index(), index);
        assert_eq!(key.private_key(), private_key);
        assert_eq!(key.address(), address);
    }
    Ok(())
}

#[test]
fn derive_is_deterministic_across_instances() -> Result<(), ToolboxError> {
    let a = Wallet::from_seed_phrase(PHONETIC).derive_key(42)?;
    let b = Wallet::from_seed_phrase(PHONETIC).derive_key(42)?;
    assert_eq!(a.private_key(), b.private_key());
    assert_eq!(a.address(), b.address());
    Ok(())
}

#[test]
fn first_hundred_indexes_do_not_collide() -> Result<(), ToolboxError> {
    let wallet = Wallet::from_seed_phrase(PHONETIC);
    let mut private_keys = HashSet::new();
    let mut addresses = HashSet::new();

    for index in 0..100 {
        let key = wallet.derive_key(index)?;
        assert_eq!(key.private_key().len(), 64);
        assert_eq!(key.address().len(), 40);
        assert!(private_keys.insert(key.private_key().to_string()));
        assert!(addresses.insert(key.address().to_string()));
    }
    Ok(())
}

#[test]
fn different_phrases_give_different_keys() -> Result<(), ToolboxError> {
    let a = Wallet::from_seed_phrase(PHONETIC).derive_key(0)?;
    let b = Wallet::from_seed_phrase("alpha").derive_key(0)?;
    assert_ne!(a.private_key(), b.private_key());
    Ok(())
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[test]
fn export_matches_reference_bytes() -> Result<(), ToolboxError> {
    let json = Wallet::from_seed_phrase(PHONETIC).export_json("pw")?;
    assert_eq!(json, PHONETIC_EXPORT_PW);
    Ok(())
}

#[test]
fn imports_reference_export() -> Result<(), ToolboxError> {
    let wallet = Wallet::import_json(PHONETIC_EXPORT_PW, "pw")?;
    assert_eq!(wallet.seed_phrase(), PHONETIC);
    Ok(())
}

#[test]
fn non_ascii_phrase_interoperates() -> Result<(), ToolboxError> {
    let wallet = Wallet::import_json(ACCENTED_EXPORT_EMPTY, "")?;
    assert_eq!(wallet.seed_phrase(), "zulu yankee café");

    let json = wallet.export_json("")?;
    assert_eq!(json, ACCENTED_EXPORT_EMPTY);
    assert!(json.is_ascii());
    assert_eq!(Wallet::import_json(&json, "")?.seed_phrase(), "zulu yankee café");
    Ok(())
}

#[test]
fn roundtrip_various_phrases_and_passphrases() -> Result<(), ToolboxError> {
    let phrases = [PHONETIC, "", "single", "tab\there \"quoted\" \\ back", "日本語 🔑"];
    let passphrases = ["", "pw", "correct horse battery staple", "ünïcödé"];

    for phrase in phrases {
        for passphrase in passphrases {
            let json = Wallet::from_seed_phrase(phrase).export_json(passphrase)?;
            let restored = Wallet::import_json(&json, passphrase)?;
            assert_eq!(restored.seed_phrase(), phrase);
        }
    }

    let generated = Wallet::generate();
    let restored = Wallet::import_json(&generated.export_json("pw")?, "pw")?;
    assert_eq!(restored.seed_phrase(), generated.seed_phrase());
    Ok(())
}

#[test]
fn reformatted_envelope_still_verifies() -> Result<(), ToolboxError> {
    let compact: serde_json::Value = serde_json::from_str(PHONETIC_EXPORT_PW)
        .map_err(|e| ToolboxError::MalformedInput { reason: e.to_string() })?;
    let wallet = Wallet::import_json(&compact.to_string(), "pw")?;
    assert_eq!(wallet.seed_phrase(), PHONETIC);
    Ok(())
}

#[test]
fn wrong_passphrase_is_integrity_error() -> Result<(), ToolboxError> {
    let json = Wallet::from_seed_phrase(PHONETIC).export_json("pw1")?;
    let err = Wallet::import_json(&json, "pw2").unwrap_err();
    assert!(err.is_integrity(), "unexpected error: {err}");
    Ok(())
}

#[test]
fn flipping_any_mac_character_is_detected() -> Result<(), ToolboxError> {
    let json = Wallet::from_seed_phrase(PHONETIC).export_json("pw")?;
    let mac_start = json.find("\"mac\": \"").map(|i| i + "\"mac\": \"".len()).unwrap();

    for offset in 0..64 {
        let tampered = flip_char(&json, mac_start + offset);
        let err = Wallet::import_json(&tampered, "pw").unwrap_err();
        assert!(err.is_integrity(), "offset {offset}: {err}");
    }
    Ok(())
}

#[test]
fn flipping_any_seed_phrase_character_is_detected() -> Result<(), ToolboxError> {
    let json = Wallet::from_seed_phrase(PHONETIC).export_json("pw")?;
    let phrase_start = json.find(PHONETIC).unwrap();

    for offset in 0..PHONETIC.len() {
        let tampered = flip_char(&json, phrase_start + offset);
        let err = Wallet::import_json(&tampered, "pw").unwrap_err();
        assert!(err.is_integrity(), "offset {offset}: {err}");
    }
    Ok(())
}

#[test]
fn truncated_envelope_is_malformed() -> Result<(), ToolboxError> {
    let json = Wallet::from_seed_phrase(PHONETIC).export_json("pw")?;
    let err = Wallet::import_json(&json[..json.len() / 2], "pw").unwrap_err();
    assert!(err.is_malformed());
    Ok(())
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn file_roundtrip() -> Result<(), ToolboxError> {
    let tmp = TempFile::new("file_roundtrip");
    let wallet = Wallet::from_seed_phrase(PHONETIC);

    export_to_file(&wallet, "pw", tmp.path())?;
    assert_eq!(load_envelope(tmp.path())?, PHONETIC_EXPORT_PW);

    let restored = import_from_file(tmp.path(), "pw")?;
    assert_eq!(restored.seed_phrase(), PHONETIC);
    Ok(())
}

#[cfg(unix)]
#[test]
fn saved_envelope_is_owner_only() -> Result<(), ToolboxError> {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempFile::new("owner_only");
    export_to_file(&Wallet::from_seed_phrase("alpha bravo"), "pw", tmp.path())?;

    let mode = std::fs::metadata(tmp.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0, "envelope readable by group/other: {:o}", mode & 0o777);
    Ok(())
}

#[cfg(unix)]
#[test]
fn overwriting_world_readable_file_tightens_mode() -> Result<(), ToolboxError> {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempFile::new("tighten");
    std::fs::write(tmp.path(), "old").unwrap();
    std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

    export_to_file(&Wallet::from_seed_phrase(PHONETIC), "pw", tmp.path())?;

    let mode = std::fs::metadata(tmp.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(load_envelope(tmp.path())?, PHONETIC_EXPORT_PW);
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let tmp = TempFile::new("never_written");
    let result = import_from_file(tmp.path(), "pw");
    assert!(matches!(result, Err(ToolboxError::Io { .. })));
}
