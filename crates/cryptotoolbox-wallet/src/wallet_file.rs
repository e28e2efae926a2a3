//! Envelope file persistence.
//!
//! The exported envelope is the only externalized form of a wallet.
//! Writes go through a temporary sibling file and a rename so a crash
//! never leaves a half-written envelope behind. On unix the file is
//! created owner-only (0600) since it holds the phrase in plaintext.

use std::io::Write;
use std::path::Path;

use cryptotoolbox_types::{Result, ToolboxError};

use crate::wallet::Wallet;

/// Writes envelope JSON to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ToolboxError::Io`] if the temporary file cannot be written
/// or renamed into place.
pub fn save_envelope(path: &Path, json: &str) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    write_owner_only(&tmp_path, json.as_bytes()).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        ToolboxError::Io {
            reason: format!("failed to write {}: {e}", tmp_path.display()),
        }
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        ToolboxError::Io {
            reason: format!("failed to move envelope into {}: {e}", path.display()),
        }
    })?;

    tracing::info!(path = %path.display(), "wallet envelope saved");
    Ok(())
}

/// Creates (or truncates) `path` with owner-only permissions and writes
/// `bytes` to it.
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        options.mode(0o600);
        let mut file = options.open(path)?;
        // `mode` only applies on creation; a stale temp file keeps its bits.
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    #[cfg(not(unix))]
    {
        let mut file = options.open(path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }
}

/// Reads envelope JSON from `path`.
pub fn load_envelope(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ToolboxError::Io {
        reason: format!("failed to read {}: {e}", path.display()),
    })
}

/// Exports `wallet` with `passphrase` and saves it to `path`.
pub fn export_to_file(wallet: &Wallet, passphrase: &str, path: &Path) -> Result<()> {
    let json = wallet.export_json(passphrase)?;
    save_envelope(path, &json)
}

/// Loads `path` and verifies it with `passphrase`.
pub fn import_from_file(path: &Path, passphrase: &str) -> Result<Wallet> {
    let json = load_envelope(path)?;
    Wallet::import_json(&json, passphrase)
}
