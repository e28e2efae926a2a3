//! Seed-phrase wallet and deterministic per-index key derivation.

use std::fmt;

use cryptotoolbox_crypto::hash::sha256_concat;
use cryptotoolbox_crypto::kdf::pbkdf2_sha256;
use cryptotoolbox_crypto::wordlist::generate_phrase;
use cryptotoolbox_types::Result;
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::envelope::{export_envelope, import_envelope};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix of the PBKDF2 salt; the decimal account index is appended.
pub const DERIVATION_SALT_PREFIX: &str = "cryptotoolbox:";

/// PBKDF2 iteration count for per-index key derivation.
pub const DERIVATION_ITERATIONS: u32 = 4096;

/// Suffix hashed together with the key to form the address.
const ADDRESS_SUFFIX: &[u8] = b"addr";

/// Number of hex characters kept from the address digest.
pub const ADDRESS_HEX_LEN: usize = 40;

// ---------------------------------------------------------------------------
// KeyMaterial
// ---------------------------------------------------------------------------

/// Key material derived for one account index.
///
/// Serializes as `{"index": .., "private_key": .., "address": ..}`.
/// String fields are zeroized on drop.
#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    index: u32,
    private_key: String,
    address: String,
}

impl KeyMaterial {
    /// Account index this material was derived for.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// 64 lowercase hex characters: the raw PBKDF2 output.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// First 40 hex characters of `SHA-256(key || "addr")`.
    ///
    /// Not a real chain address format.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("index", &self.index)
            .field("private_key", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// In-memory wallet holding only a seed phrase.
///
/// # Invariants
///
/// - The phrase is stored in a zeroize-on-drop buffer and is never logged.
/// - Key material is recomputed on every [`derive_key`](Wallet::derive_key)
///   call; nothing is cached.
pub struct Wallet {
    seed_phrase: Zeroizing<String>,
}

impl Wallet {
    /// Creates a wallet from `seed_phrase`, or generates a fresh phrase
    /// when `None`.
    pub fn new(seed_phrase: Option<String>) -> Self {
        match seed_phrase {
            Some(phrase) => Self::from_seed_phrase(phrase),
            None => Self::generate(),
        }
    }

    /// Creates a wallet with a freshly generated 12-word phrase.
    pub fn generate() -> Self {
        Self {
            seed_phrase: generate_phrase(),
        }
    }

    /// Creates a wallet from an existing phrase.
    ///
    /// Any string is accepted: the phrase is a password for PBKDF2, not a
    /// checksummed mnemonic.
    pub fn from_seed_phrase(seed_phrase: impl Into<String>) -> Self {
        Self {
            seed_phrase: Zeroizing::new(seed_phrase.into()),
        }
    }

    /// Returns the seed phrase.
    ///
    /// **Security Warning**: this reconstructs every derivable key.
    pub fn seed_phrase(&self) -> &str {
        &self.seed_phrase
    }

    /// Number of whitespace-separated words in the phrase.
    pub fn word_count(&self) -> usize {
        self.seed_phrase.split_whitespace().count()
    }

    /// Derives the key material for `index`.
    ///
    /// `key = PBKDF2-HMAC-SHA256(phrase, "cryptotoolbox:" + index, 4096, 32)`,
    /// `private_key = hex(key)`, `address = hex(SHA-256(key || "addr"))[..40]`.
    /// Identical `(phrase, index)` pairs always give identical output.
    pub fn derive_key(&self, index: u32) -> Result<KeyMaterial> {
        let salt = format!("{DERIVATION_SALT_PREFIX}{index}");
        let key = pbkdf2_sha256(self.seed_phrase.as_bytes(), salt.as_bytes(), DERIVATION_ITERATIONS)?;

        let digest = Zeroizing::new(hex::encode(sha256_concat(key.as_bytes(), ADDRESS_SUFFIX)));

        tracing::debug!(index, "derived key material");

        Ok(KeyMaterial {
            index,
            private_key: key.to_hex(),
            address: digest[..ADDRESS_HEX_LEN].to_string(),
        })
    }

    /// Exports the wallet as an HMAC-tagged JSON envelope.
    ///
    /// See [`export_envelope`].
    pub fn export_json(&self, passphrase: &str) -> Result<String> {
        export_envelope(self, passphrase)
    }

    /// Verifies and imports a JSON envelope produced by
    /// [`export_json`](Self::export_json).
    ///
    /// See [`import_envelope`].
    pub fn import_json(json_text: &str, passphrase: &str) -> Result<Self> {
        import_envelope(json_text, passphrase)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("seed_phrase", &"<redacted>")
            .field("word_count", &self.word_count())
            .finish()
    }
}
