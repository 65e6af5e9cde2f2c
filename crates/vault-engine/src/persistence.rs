//! Atomic persistence of a vault's on-disk bytes.
//!
//! Writes go to a sibling temp file and are renamed into place, so a write
//! failure at any stage leaves the canonical vault path untouched rather
//! than truncated. This closes the load-bearing gap in the base format: a
//! `fopen`-succeeds/`fwrite`-fails sequence can never leave a half-written
//! file at the real path.

use crate::error::VaultError;
use std::fs;
use std::path::Path;

/// Write `bytes` to `path` atomically via a `.tmp` sibling file and rename.
///
/// On unix, the temp file is created with owner-only permissions (`0600`)
/// before the rename, since it transiently holds vault ciphertext.
///
/// # Errors
///
/// Returns `VaultError::FileOpenError` if the temp file cannot be written,
/// its permissions cannot be restricted, or the rename fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), VaultError> {
    let tmp = sibling_tmp_path(path);

    fs::write(&tmp, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp, path)?;

    Ok(())
}

fn sibling_tmp_path(path: &Path) -> std::path::PathBuf {
    let file_name = path
        .file_name()
        .map(|n| format!(".{}.tmp", n.to_string_lossy()))
        .unwrap_or_else(|| ".vault.tmp".to_string());
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => std::path::PathBuf::from(file_name),
    }
}
