//! The in-memory vault: an append-only, ordered store of entries.
//!
//! `Vault` owns the entry list outright and exposes exactly one way
//! to grow it (the `add_*` methods), so every reader sees the same
//! ordered view.  Entries are never edited or removed once appended;
//! reveal and download operations borrow them read-only.

use std::thread;

use chrono::{DateTime, Utc};
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::envelope::Envelope;
use crate::crypto::kdf::KdfConfig;
use crate::errors::{LockboxError, Result};

use super::entry::{EntryKind, FileInput, VaultEntry};

/// The vault handle.  Lives for one process session; dropping it is
/// the only way entries ever go away.
pub struct Vault {
    /// Ordered entry list.  Append-only.
    entries: Vec<VaultEntry>,

    /// Next identifier to hand out.  Ids are unique and strictly
    /// increasing within a session.
    next_id: u64,

    /// How passphrases become keys for every entry in this vault.
    kdf: KdfConfig,
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create an empty vault using digest key derivation.
    pub fn new() -> Self {
        Self::with_kdf(KdfConfig::default())
    }

    /// Create an empty vault with an explicit key derivation config.
    pub fn with_kdf(kdf: KdfConfig) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            kdf,
        }
    }

    // ------------------------------------------------------------------
    // Adding entries
    // ------------------------------------------------------------------

    /// Encrypt a text secret and append it as a new entry.
    pub fn add_text_entry(
        &mut self,
        name: &str,
        secret: &str,
        passphrase: &[u8],
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<&VaultEntry> {
        let key = self.kdf.derive(passphrase)?;
        let sealed = encrypt(&key, secret.as_bytes())?.serialize()?;

        let entry = VaultEntry::new(
            self.next_id,
            name.to_string(),
            EntryKind::Text,
            sealed,
            String::new(),
            expires_at,
        )?;
        self.next_id += 1;

        Ok(self.append(entry))
    }

    /// Encrypt a batch of files and append one entry per file, all
    /// sharing the caller-supplied label.
    ///
    /// Each file's content and original name are encrypted
    /// independently under the same derived key, fanned out across
    /// worker threads.  The scope is the join barrier: nothing is
    /// appended until every worker has finished, so the store grows by
    /// exactly `files.len()` entries in input order.  A failure in any
    /// file appends nothing.
    pub fn add_file_entries(
        &mut self,
        name: &str,
        files: &[FileInput],
        passphrase: &[u8],
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<&[VaultEntry]> {
        let key = self.kdf.derive(passphrase)?;

        let sealed: Vec<Result<(String, String)>> = thread::scope(|scope| {
            let handles: Vec<_> = files
                .iter()
                .map(|file| {
                    let key = &key;
                    scope.spawn(move || {
                        let secret = encrypt(key, &file.bytes)?.serialize()?;
                        let file_name = encrypt(key, file.file_name.as_bytes())?.serialize()?;
                        Ok((secret, file_name))
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        // Build all entries before appending any.
        let mut pending = Vec::with_capacity(files.len());
        for (offset, result) in sealed.into_iter().enumerate() {
            let (secret, file_name) = result?;
            pending.push(VaultEntry::new(
                self.next_id + offset as u64,
                name.to_string(),
                EntryKind::File,
                secret,
                file_name,
                expires_at,
            )?);
        }
        self.next_id += pending.len() as u64;

        let start = self.entries.len();
        self.entries.extend(pending);
        Ok(&self.entries[start..])
    }

    /// The single mutation point: every new entry lands here.
    fn append(&mut self, entry: VaultEntry) -> &VaultEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    // ------------------------------------------------------------------
    // Revealing entries
    // ------------------------------------------------------------------

    /// Decrypt an entry's secret payload back to raw bytes.
    ///
    /// Re-derives the key from the supplied passphrase; a wrong
    /// passphrase fails with `AuthenticationFailed`, a damaged stored
    /// envelope with `MalformedEnvelope`.  Never retried: retrying
    /// cannot fix a wrong passphrase.
    pub fn reveal_secret(&self, entry: &VaultEntry, passphrase: &[u8]) -> Result<Vec<u8>> {
        let envelope = Envelope::parse(&entry.secret)?;
        let key = self.kdf.derive(passphrase)?;
        decrypt(&key, &envelope)
    }

    /// Decrypt a text entry's secret and return it as a string.
    pub fn reveal_text(&self, entry: &VaultEntry, passphrase: &[u8]) -> Result<String> {
        let bytes = self.reveal_secret(entry, passphrase)?;
        utf8_or_zeroize(bytes)
    }

    /// Decrypt a file entry's original file name.
    ///
    /// Text entries have no file name; asking for one is a caller bug
    /// and is rejected rather than answered with an empty string.
    pub fn reveal_file_name(&self, entry: &VaultEntry, passphrase: &[u8]) -> Result<String> {
        if entry.kind != EntryKind::File {
            return Err(LockboxError::InvalidEntry(
                "text entries have no file name".into(),
            ));
        }

        let envelope = Envelope::parse(&entry.file_name)?;
        let key = self.kdf.derive(passphrase)?;
        let bytes = decrypt(&key, &envelope)?;
        utf8_or_zeroize(bytes)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All entries in insertion order.
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    /// Look up an entry by its id.
    pub fn get(&self, id: u64) -> Option<&VaultEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Number of entries in the vault.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries have been added yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert decrypted bytes to a `String`, wiping them if they turn
/// out not to be UTF-8 so plaintext never sticks around inside an
/// error value.
fn utf8_or_zeroize(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        LockboxError::SerializationError("decrypted value is not valid UTF-8".to_string())
    })
}
