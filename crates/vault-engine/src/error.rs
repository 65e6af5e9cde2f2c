//! Vault error types for `vault-engine`.

use thiserror::Error;
use vault_crypto::CryptoError;

/// Errors produced by vault operations — the stable, caller-visible taxonomy.
///
/// Every operation returns exactly one variant on failure; there are no
/// retries inside the engine and no partial success is ever reported.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Target vault path does not exist on open.
    #[error("vault not found: {0}")]
    FileNotFound(String),

    /// Target vault path already exists on create.
    #[error("vault already exists: {0}")]
    FileExists(String),

    /// OS-level read/write failure.
    #[error("file I/O error: {0}")]
    FileOpenError(String),

    /// Opened file's length is not a multiple of 16.
    #[error("vault file size is not a multiple of 16 bytes")]
    BadFileSize,

    /// Decrypted db header's magic does not match `0xD00DBABE`.
    ///
    /// Deliberately ambiguous: this is returned both for a corrupted file
    /// and for a wrong passphrase, so callers cannot distinguish the two.
    #[error("invalid vault: wrong passphrase or corrupted file")]
    BadMagic,

    /// Add with a name already present.
    #[error("a record named {0:?} already exists")]
    RecordExists(String),

    /// Delete/get with an absent name.
    #[error("no record named {0:?}")]
    RecordNotFound(String),

    /// Add when `num_records` is already at the 1000-record ceiling.
    #[error("vault has reached its 1000-record limit")]
    RecordLimitReached,

    /// List on an empty vault.
    #[error("vault has no records")]
    NoRecords,

    /// Any primitive-level cryptographic failure; fatal, aborts the operation.
    #[error("cryptographic operation failed")]
    CryptoFailure(#[from] CryptoError),
}

/// Underlying I/O errors fold into [`VaultError::FileOpenError`] with the
/// OS-provided message, never the raw `io::Error` debug form.
impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::FileOpenError(err.to_string())
    }
}
