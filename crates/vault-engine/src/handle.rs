//! In-memory vault handle: the mutable model of an opened vault and its
//! public operation contract (create/open/add/delete/get/list/info/close).

use crate::codec::{self, DbHeader, PasswordHeader, IV_LEN, MAGIC, MAX_RECORDS, SALT_LEN};
use crate::error::VaultError;
use crate::persistence;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use vault_crypto::SecretBuffer;
use zeroize::Zeroize;

/// One record as exposed by [`VaultHandle::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// Record name.
    pub name: String,
    /// User-requested password length in characters.
    pub pass_size: u64,
    /// UNIX seconds the record was created.
    pub create_time: u64,
}

/// Metadata returned by [`VaultHandle::info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultInfo {
    /// Path the vault was opened/created from.
    pub filename: PathBuf,
    /// Current number of records.
    pub num_records: u32,
    /// UNIX seconds of the last successful mutation.
    pub last_edit: u64,
}

/// The in-memory, mutable model of an opened vault.
///
/// Owns the filename, salt, IV, derived key, decoded record headers, and
/// the still-encrypted payload buffer. All of these are released when the
/// handle is dropped; the derived key and decoded header names are
/// zeroized rather than merely freed.
pub struct VaultHandle {
    path: PathBuf,
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    key: SecretBuffer,
    headers: Vec<PasswordHeader>,
    payload: Vec<u8>,
    last_edit: u64,
}

impl VaultHandle {
    /// Create a fresh, empty vault at `path`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::FileExists` if `path` already exists, or
    /// `VaultError::FileOpenError` / `VaultError::CryptoFailure` if key
    /// derivation or the initial persist fails.
    pub fn create(path: impl AsRef<Path>, passphrase: &[u8]) -> Result<Self, VaultError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(VaultError::FileExists(path.display().to_string()));
        }

        let mut salt = [0u8; SALT_LEN];
        vault_crypto::randomize(&mut salt)?;
        let mut iv = [0u8; IV_LEN];
        vault_crypto::randomize(&mut iv)?;
        let key = vault_crypto::derive(passphrase, &salt)?;

        let mut handle = Self {
            path: path.to_path_buf(),
            salt,
            iv,
            key,
            headers: Vec::new(),
            payload: Vec::new(),
            last_edit: now(),
        };
        handle.persist()?;
        Ok(handle)
    }

    /// Open an existing vault at `path`, decrypting its header and record
    /// headers with the key derived from `passphrase`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::FileNotFound` if `path` does not exist,
    /// `VaultError::BadFileSize` if the file length is not a multiple of
    /// 16 bytes or is otherwise structurally too short, and
    /// `VaultError::BadMagic` if the derived key does not decrypt the db
    /// header to the expected magic (wrong passphrase or corruption,
    /// indistinguishably).
    pub fn open(path: impl AsRef<Path>, passphrase: &[u8]) -> Result<Self, VaultError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                VaultError::FileNotFound(path.display().to_string())
            } else {
                VaultError::FileOpenError(e.to_string())
            }
        })?;

        if bytes.len() % 16 != 0 {
            return Err(VaultError::BadFileSize);
        }
        if bytes.len() < SALT_LEN + IV_LEN {
            return Err(VaultError::BadFileSize);
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[..SALT_LEN]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[SALT_LEN..SALT_LEN + IV_LEN]);

        let key = vault_crypto::derive(passphrase, &salt)?;
        let decoded = codec::decode(&bytes, key.expose(), &iv)?;

        Ok(Self {
            path: path.to_path_buf(),
            salt,
            iv,
            key,
            headers: decoded.headers,
            payload: decoded.payload,
            last_edit: decoded.db_header.last_edit,
        })
    }

    /// Generate a new record named `name` holding a password of `pass_size`
    /// characters, and persist the vault.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::RecordExists` if `name` is already present,
    /// `VaultError::RecordLimitReached` at 1000 records, or propagates any
    /// generation/persistence error.
    pub fn add(&mut self, name: &str, pass_size: usize) -> Result<(), VaultError> {
        if self.headers.len() as u32 >= MAX_RECORDS {
            return Err(VaultError::RecordLimitReached);
        }

        let name_bytes = PasswordHeader::encode_name(name)?;
        if self.headers.iter().any(|h| h.name == name_bytes) {
            return Err(VaultError::RecordExists(name.to_string()));
        }

        let record = vault_crypto::generate_record(pass_size)?;
        let ciphertext = vault_crypto::encrypt_group(self.key.expose(), &self.iv, &record.buffer)?;

        let record_start = u64::try_from(self.payload.len()).map_err(|_| VaultError::BadFileSize)?;
        let record_size = u64::try_from(ciphertext.len()).map_err(|_| VaultError::BadFileSize)?;

        let mut new_payload = self.payload.clone();
        new_payload.extend_from_slice(&ciphertext);
        let mut new_headers = self.headers.clone();
        new_headers.push(PasswordHeader {
            name: name_bytes,
            pass_size: pass_size as u64,
            create_time: now(),
            record_size,
            record_start,
        });

        self.persist_state(new_headers, new_payload)
    }

    /// Remove the record named `name`, compacting the payload and
    /// renumbering subsequent offsets, then persist the vault.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::RecordNotFound` if no such record exists.
    pub fn delete(&mut self, name: &str) -> Result<(), VaultError> {
        let name_bytes = PasswordHeader::encode_name(name)
            .map_err(|_| VaultError::RecordNotFound(name.to_string()))?;
        let idx = self
            .headers
            .iter()
            .position(|h| h.name == name_bytes)
            .ok_or_else(|| VaultError::RecordNotFound(name.to_string()))?;

        let mut new_headers = self.headers.clone();
        let removed = new_headers.remove(idx);
        let start = usize::try_from(removed.record_start).map_err(|_| VaultError::BadFileSize)?;
        let size = usize::try_from(removed.record_size).map_err(|_| VaultError::BadFileSize)?;
        let end = start.checked_add(size).ok_or(VaultError::BadFileSize)?;
        if end > self.payload.len() {
            return Err(VaultError::BadFileSize);
        }

        // Build the new payload as prefix followed by suffix, into a fresh
        // buffer — this cannot reproduce the single-offset overwrite bug
        // that an in-place compaction starting both copies at 0 would.
        let remaining = self
            .payload
            .len()
            .checked_sub(size)
            .ok_or(VaultError::BadFileSize)?;
        let mut new_payload = Vec::with_capacity(remaining);
        new_payload.extend_from_slice(&self.payload[..start]);
        new_payload.extend_from_slice(&self.payload[end..]);

        for header in &mut new_headers {
            if header.record_start > removed.record_start {
                header.record_start = header
                    .record_start
                    .checked_sub(removed.record_size)
                    .ok_or(VaultError::BadFileSize)?;
            }
        }

        self.persist_state(new_headers, new_payload)
    }

    /// Decrypt and return the plaintext buffer for the record named `name`.
    ///
    /// The first `pass_size` bytes are the password; the remainder up to
    /// `record_size` is NUL padding. Callers are expected to zeroize the
    /// returned buffer after use.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::RecordNotFound` if no such record exists.
    pub fn get(&self, name: &str) -> Result<Vec<u8>, VaultError> {
        let name_bytes = PasswordHeader::encode_name(name)
            .map_err(|_| VaultError::RecordNotFound(name.to_string()))?;
        let header = self
            .headers
            .iter()
            .find(|h| h.name == name_bytes)
            .ok_or_else(|| VaultError::RecordNotFound(name.to_string()))?;

        let start = usize::try_from(header.record_start).map_err(|_| VaultError::BadFileSize)?;
        let size = usize::try_from(header.record_size).map_err(|_| VaultError::BadFileSize)?;
        let end = start.checked_add(size).ok_or(VaultError::BadFileSize)?;
        let ciphertext = self
            .payload
            .get(start..end)
            .ok_or(VaultError::BadFileSize)?;

        Ok(vault_crypto::decrypt_group(
            self.key.expose(),
            &self.iv,
            ciphertext,
        )?)
    }

    /// Enumerate `(name, pass_size, create_time)` for every record, in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NoRecords` if the vault is empty.
    pub fn list(&self) -> Result<Vec<RecordSummary>, VaultError> {
        if self.headers.is_empty() {
            return Err(VaultError::NoRecords);
        }
        Ok(self
            .headers
            .iter()
            .map(|h| RecordSummary {
                name: h.name_string(),
                pass_size: h.pass_size,
                create_time: h.create_time,
            })
            .collect())
    }

    /// Return `(filename, num_records, last_edit)`.
    #[must_use]
    pub fn info(&self) -> VaultInfo {
        VaultInfo {
            filename: self.path.clone(),
            num_records: self.headers.len() as u32,
            last_edit: self.last_edit,
        }
    }

    /// Number of records currently in the vault.
    #[must_use]
    pub fn num_records(&self) -> u32 {
        self.headers.len() as u32
    }

    fn persist(&mut self) -> Result<(), VaultError> {
        let headers = self.headers.clone();
        let payload = self.payload.clone();
        self.persist_state(headers, payload)
    }

    /// Encode and atomically write `headers`/`payload`, committing them
    /// (and a fresh `last_edit`) to `self` only once the write succeeds.
    /// On a write failure the handle's in-memory state is left unchanged.
    fn persist_state(
        &mut self,
        headers: Vec<PasswordHeader>,
        payload: Vec<u8>,
    ) -> Result<(), VaultError> {
        let last_edit = now();
        let db_header = DbHeader {
            magic: MAGIC,
            num_records: headers.len() as u32,
            last_edit,
        };
        let bytes = codec::encode(
            db_header,
            &headers,
            &payload,
            &self.salt,
            &self.iv,
            self.key.expose(),
        )?;
        persistence::write_atomic(&self.path, &bytes)?;

        self.headers = headers;
        self.payload = payload;
        self.last_edit = last_edit;
        Ok(())
    }
}

/// Explicit close — dropping a [`VaultHandle`] has the same effect; this
/// exists to make the end of a vault's lifetime visible at call sites.
impl VaultHandle {
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for VaultHandle {
    fn drop(&mut self) {
        for header in &mut self.headers {
            header.name.zeroize();
        }
        // `self.key` is a `SecretBuffer`, which zeroizes on its own drop.
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_refuses_existing_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.vault");
        VaultHandle::create(&path, b"hunter2").unwrap();
        let err = VaultHandle::create(&path, b"hunter2").unwrap_err();
        assert!(matches!(err, VaultError::FileExists(_)));
    }

    #[test]
    fn open_missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.vault");
        let err = VaultHandle::open(&path, b"hunter2").unwrap_err();
        assert!(matches!(err, VaultError::FileNotFound(_)));
    }

    #[test]
    fn add_pass_size_1_yields_16_byte_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.vault");
        let mut handle = VaultHandle::create(&path, b"x").unwrap();
        handle.add("r", 1).unwrap();
        let plaintext = handle.get("r").unwrap();
        assert_eq!(plaintext.len(), 16);
    }

    #[test]
    fn add_pass_size_16_yields_32_byte_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.vault");
        let mut handle = VaultHandle::create(&path, b"x").unwrap();
        handle.add("r", 16).unwrap();
        let plaintext = handle.get("r").unwrap();
        assert_eq!(plaintext.len(), 32);
    }

    #[test]
    fn info_reports_filename_and_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.vault");
        let mut handle = VaultHandle::create(&path, b"x").unwrap();
        handle.add("a", 4).unwrap();
        let info = handle.info();
        assert_eq!(info.filename, path);
        assert_eq!(info.num_records, 1);
    }

    #[test]
    fn record_offsets_stay_contiguous_after_delete() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("v.vault");
        let mut handle = VaultHandle::create(&path, b"x").unwrap();
        handle.add("a", 10).unwrap();
        handle.add("b", 20).unwrap();
        handle.add("c", 30).unwrap();
        handle.delete("a").unwrap();

        let mut expected_start = 0u64;
        for header in &handle.headers {
            assert_eq!(header.record_start, expected_start);
            expected_start += header.record_size;
        }
    }
}
