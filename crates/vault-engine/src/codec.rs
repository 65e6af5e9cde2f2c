//! Vault file codec — position-deterministic encode/decode of the on-disk
//! byte layout described by the record/header/payload format.
//!
//! Layout: `salt (32) || iv (16) || db_header (16, encrypted) ||
//! record_headers (64 * num_records, each encrypted independently) ||
//! payload (sum of record_size, already encrypted)`.
//!
//! Every multi-byte integer field is fixed little-endian regardless of
//! host endianness. All cursor arithmetic uses checked addition; an
//! overflow or an out-of-bounds read surfaces as [`VaultError::BadFileSize`]
//! rather than panicking.

use crate::error::VaultError;
use vault_crypto::symmetric::{decrypt_group, encrypt_group};

/// Length of the random salt prefix, in bytes.
pub const SALT_LEN: usize = 32;
/// Length of the vault IV, in bytes.
pub const IV_LEN: usize = 16;
/// Length of the encrypted db header, in bytes (one AES block).
pub const DB_HEADER_LEN: usize = 16;
/// Length of one encrypted record header, in bytes (four AES blocks).
pub const RECORD_HEADER_LEN: usize = 64;
/// Length of the NUL-padded name field within a record header.
pub const NAME_LEN: usize = 32;
/// Magic constant identifying a correctly-decrypted db header.
pub const MAGIC: u32 = 0xD00D_BABE;
/// Maximum number of records a vault may hold.
pub const MAX_RECORDS: u32 = 1000;

/// Decrypted plaintext fields of the db header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbHeader {
    /// Must equal [`MAGIC`] for a correctly-keyed vault.
    pub magic: u32,
    /// Number of record headers that follow.
    pub num_records: u32,
    /// UNIX seconds of the last successful mutation.
    pub last_edit: u64,
}

impl DbHeader {
    fn to_bytes(self) -> [u8; DB_HEADER_LEN] {
        let mut out = [0u8; DB_HEADER_LEN];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4..8].copy_from_slice(&self.num_records.to_le_bytes());
        out[8..16].copy_from_slice(&self.last_edit.to_le_bytes());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, VaultError> {
        if bytes.len() != DB_HEADER_LEN {
            return Err(VaultError::BadFileSize);
        }
        let magic = read_u32_le(bytes, 0)?;
        let num_records = read_u32_le(bytes, 4)?;
        let last_edit = read_u64_le(bytes, 8)?;
        Ok(Self {
            magic,
            num_records,
            last_edit,
        })
    }
}

/// Decrypted plaintext fields of one record header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHeader {
    /// 32-byte NUL-padded record name.
    pub name: [u8; NAME_LEN],
    /// User-requested password length in characters.
    pub pass_size: u64,
    /// UNIX seconds the record was created.
    pub create_time: u64,
    /// Length in bytes of this record's ciphertext payload (multiple of 16).
    pub record_size: u64,
    /// Byte offset into the payload region where this record's ciphertext begins.
    pub record_start: u64,
}

impl PasswordHeader {
    /// Build a NUL-padded 32-byte name field from a `&str`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::FileOpenError` if `name` is empty or longer
    /// than 31 bytes (the 32nd byte is reserved for the NUL terminator).
    pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN], VaultError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > NAME_LEN - 1 {
            return Err(VaultError::FileOpenError(format!(
                "record name {name:?} must be 1..={} bytes",
                NAME_LEN - 1
            )));
        }
        let mut out = [0u8; NAME_LEN];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(out)
    }

    /// Render the NUL-padded name field back to a `String`, trimming the
    /// padding.
    #[must_use]
    pub fn name_string(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    fn to_bytes(&self) -> [u8; RECORD_HEADER_LEN] {
        let mut out = [0u8; RECORD_HEADER_LEN];
        out[0..32].copy_from_slice(&self.name);
        out[32..40].copy_from_slice(&self.pass_size.to_le_bytes());
        out[40..48].copy_from_slice(&self.create_time.to_le_bytes());
        out[48..56].copy_from_slice(&self.record_size.to_le_bytes());
        out[56..64].copy_from_slice(&self.record_start.to_le_bytes());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, VaultError> {
        if bytes.len() != RECORD_HEADER_LEN {
            return Err(VaultError::BadFileSize);
        }
        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&bytes[0..32]);
        Ok(Self {
            name,
            pass_size: read_u64_le(bytes, 32)?,
            create_time: read_u64_le(bytes, 40)?,
            record_size: read_u64_le(bytes, 48)?,
            record_start: read_u64_le(bytes, 56)?,
        })
    }
}

/// The fully decoded contents of a vault file, with the payload still
/// encrypted (callers decrypt individual record slices on demand).
pub struct DecodedVault {
    /// Decrypted db header.
    pub db_header: DbHeader,
    /// Decrypted record headers, in declaration order.
    pub headers: Vec<PasswordHeader>,
    /// Still-encrypted, contiguous record payload.
    pub payload: Vec<u8>,
}

/// Decode a vault file's bytes given the derived key and the vault IV.
///
/// `bytes` is the *entire* file including the plaintext salt, which this
/// function does not need (the caller already used it to derive `key`) but
/// skips over along with the IV.
///
/// # Errors
///
/// Returns `VaultError::BadFileSize` if `bytes` is too short to contain a
/// salt, IV, and db header, or too short for the record headers/payload its
/// own header fields declare. Returns `VaultError::BadMagic` if the
/// decrypted db header's magic does not match [`MAGIC`] — this covers both
/// file corruption and a wrong passphrase, indistinguishably by design.
pub fn decode(bytes: &[u8], key: &[u8], iv: &[u8]) -> Result<DecodedVault, VaultError> {
    let header_region_start = SALT_LEN
        .checked_add(IV_LEN)
        .ok_or(VaultError::BadFileSize)?;
    let header_region_end = header_region_start
        .checked_add(DB_HEADER_LEN)
        .ok_or(VaultError::BadFileSize)?;
    if bytes.len() < header_region_end {
        return Err(VaultError::BadFileSize);
    }

    let db_header_ct = &bytes[header_region_start..header_region_end];
    let db_header_pt = decrypt_group(key, iv, db_header_ct)
        .map_err(|e| VaultError::CryptoFailure(e))?;
    let db_header = DbHeader::from_bytes(&db_header_pt)?;

    if db_header.magic != MAGIC {
        return Err(VaultError::BadMagic);
    }

    let headers_len = usize::try_from(db_header.num_records)
        .ok()
        .and_then(|n| n.checked_mul(RECORD_HEADER_LEN))
        .ok_or(VaultError::BadFileSize)?;
    let headers_start = header_region_end;
    let headers_end = headers_start
        .checked_add(headers_len)
        .ok_or(VaultError::BadFileSize)?;
    if bytes.len() < headers_end {
        return Err(VaultError::BadFileSize);
    }

    let mut headers = Vec::with_capacity(db_header.num_records as usize);
    let mut cursor = headers_start;
    for _ in 0..db_header.num_records {
        let next = cursor
            .checked_add(RECORD_HEADER_LEN)
            .ok_or(VaultError::BadFileSize)?;
        let header_ct = &bytes[cursor..next];
        let header_pt =
            decrypt_group(key, iv, header_ct).map_err(|e| VaultError::CryptoFailure(e))?;
        headers.push(PasswordHeader::from_bytes(&header_pt)?);
        cursor = next;
    }

    let payload = bytes[headers_end..].to_vec();

    Ok(DecodedVault {
        db_header,
        headers,
        payload,
    })
}

/// Encode a full vault file: plaintext `salt || iv`, then the encrypted db
/// header, then each encrypted record header, then the already-encrypted
/// payload unmodified.
///
/// # Errors
///
/// Returns `VaultError::CryptoFailure` if any block-group encryption fails.
pub fn encode(
    db_header: DbHeader,
    headers: &[PasswordHeader],
    payload: &[u8],
    salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
    key: &[u8],
) -> Result<Vec<u8>, VaultError> {
    let headers_len = headers
        .len()
        .checked_mul(RECORD_HEADER_LEN)
        .ok_or(VaultError::BadFileSize)?;
    let capacity = SALT_LEN
        .checked_add(IV_LEN)
        .and_then(|n| n.checked_add(DB_HEADER_LEN))
        .and_then(|n| n.checked_add(headers_len))
        .and_then(|n| n.checked_add(payload.len()))
        .ok_or(VaultError::BadFileSize)?;
    let mut out = Vec::with_capacity(capacity);
    out.extend_from_slice(salt);
    out.extend_from_slice(iv);

    let db_header_ct =
        encrypt_group(key, iv, &db_header.to_bytes()).map_err(VaultError::CryptoFailure)?;
    out.extend_from_slice(&db_header_ct);

    for header in headers {
        let header_ct =
            encrypt_group(key, iv, &header.to_bytes()).map_err(VaultError::CryptoFailure)?;
        out.extend_from_slice(&header_ct);
    }

    out.extend_from_slice(payload);

    Ok(out)
}

fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32, VaultError> {
    let end = offset.checked_add(4).ok_or(VaultError::BadFileSize)?;
    let slice = bytes.get(offset..end).ok_or(VaultError::BadFileSize)?;
    let mut arr = [0u8; 4];
    arr.copy_from_slice(slice);
    Ok(u32::from_le_bytes(arr))
}

fn read_u64_le(bytes: &[u8], offset: usize) -> Result<u64, VaultError> {
    let end = offset.checked_add(8).ok_or(VaultError::BadFileSize)?;
    let slice = bytes.get(offset..end).ok_or(VaultError::BadFileSize)?;
    let mut arr = [0u8; 8];
    arr.copy_from_slice(slice);
    Ok(u64::from_le_bytes(arr))
}
