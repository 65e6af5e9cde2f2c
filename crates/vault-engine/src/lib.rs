//! `vault-engine` — vault file format and handle lifecycle for the
//! password vault engine.
//!
//! Manages the on-disk binary layout, atomic persistence, and the
//! in-memory handle exposing create/open/add/delete/get/list/info/close.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod codec;
pub mod error;
pub mod handle;
pub mod persistence;

pub use codec::{DbHeader, PasswordHeader, DB_HEADER_LEN, MAGIC, MAX_RECORDS, RECORD_HEADER_LEN};
pub use error::VaultError;
pub use handle::{RecordSummary, VaultHandle, VaultInfo};
