//! Vault entry types.
//!
//! Each entry holds a plaintext label for search plus one or two
//! serialized envelopes: the secret payload, and (for file entries)
//! the encrypted original file name.  Entries are immutable once
//! built; all fields are read-only after construction.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::errors::{LockboxError, Result};

/// What kind of payload an entry protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A short text secret typed in by the user.
    Text,
    /// The raw contents of an uploaded file.
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Text => write!(f, "Text"),
            EntryKind::File => write!(f, "File"),
        }
    }
}

/// One file handed to the vault for encryption: its original name
/// and raw byte content.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A single stored secret or file record.
///
/// `secret` and `file_name` are serialized envelopes, never raw
/// plaintext.  `name` stays in the clear so listing and filtering
/// work without a passphrase.
#[derive(Debug, Clone)]
pub struct VaultEntry {
    /// Unique identifier, assigned by the vault in append order.
    pub id: u64,

    /// User-chosen label, used for search and display.
    pub name: String,

    /// Entry type discriminator.
    pub kind: EntryKind,

    /// Envelope of the secret text or file bytes.
    pub secret: String,

    /// Envelope of the original file name; empty for text entries.
    pub file_name: String,

    /// When this entry was added to the vault.
    pub created_at: DateTime<Utc>,

    /// Optional expiry chosen at upload time.  Display metadata only:
    /// expired entries stay in the vault and remain decryptable.
    pub expires_at: Option<DateTime<Utc>>,
}

impl VaultEntry {
    /// Build an entry, enforcing the kind/file_name pairing.
    ///
    /// A `File` entry must carry an encrypted file name and a `Text`
    /// entry must not — a mismatch is rejected here rather than ever
    /// being stored.
    pub fn new(
        id: u64,
        name: String,
        kind: EntryKind,
        secret: String,
        file_name: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        match kind {
            EntryKind::File if file_name.is_empty() => {
                return Err(LockboxError::InvalidEntry(
                    "file entry is missing its encrypted file name".into(),
                ));
            }
            EntryKind::Text if !file_name.is_empty() => {
                return Err(LockboxError::InvalidEntry(
                    "text entry must not carry a file name".into(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            id,
            name,
            kind,
            secret,
            file_name,
            created_at: Utc::now(),
            expires_at,
        })
    }

    /// Whether the entry's optional expiry lies in the past.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}
