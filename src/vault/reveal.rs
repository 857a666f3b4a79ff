//! Per-entry reveal state for the session front end.
//!
//! Each entry a user asks to see moves `Hidden -> Decrypting ->
//! Revealed`, and back to `Hidden` on the next toggle.  The tracker
//! caches revealed plaintext in a zeroizing buffer; entries are
//! immutable, so a cached value can never go stale.  A failed decrypt
//! caches nothing and leaves the entry hidden — no partial or garbage
//! plaintext is ever shown.

use std::collections::HashMap;

use zeroize::Zeroizing;

use crate::errors::Result;

use super::entry::VaultEntry;
use super::store::Vault;

/// Where an entry currently sits in the reveal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Decrypting,
    Revealed,
}

/// Internal slot for one entry.  Absence from the map means `Hidden`.
enum Slot {
    Decrypting,
    Revealed(Zeroizing<Vec<u8>>),
}

/// Tracks which entries are currently revealed, keyed by entry id.
#[derive(Default)]
pub struct RevealTracker {
    slots: HashMap<u64, Slot>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of an entry.
    pub fn state(&self, id: u64) -> RevealState {
        match self.slots.get(&id) {
            None => RevealState::Hidden,
            Some(Slot::Decrypting) => RevealState::Decrypting,
            Some(Slot::Revealed(_)) => RevealState::Revealed,
        }
    }

    /// The cached plaintext of a revealed entry, if any.
    pub fn plaintext(&self, id: u64) -> Option<&[u8]> {
        match self.slots.get(&id) {
            Some(Slot::Revealed(bytes)) => Some(bytes),
            _ => None,
        }
    }

    /// Flip an entry between hidden and revealed.
    ///
    /// Revealing decrypts through the vault; the entry only reaches
    /// `Revealed` if decryption succeeds.  On failure the error
    /// propagates and the entry stays `Hidden`.  Hiding discards the
    /// cached plaintext (zeroized on drop).
    pub fn toggle(
        &mut self,
        vault: &Vault,
        entry: &VaultEntry,
        passphrase: &[u8],
    ) -> Result<RevealState> {
        if matches!(self.state(entry.id), RevealState::Revealed) {
            self.slots.remove(&entry.id);
            return Ok(RevealState::Hidden);
        }

        self.slots.insert(entry.id, Slot::Decrypting);
        match vault.reveal_secret(entry, passphrase) {
            Ok(plaintext) => {
                self.slots
                    .insert(entry.id, Slot::Revealed(Zeroizing::new(plaintext)));
                Ok(RevealState::Revealed)
            }
            Err(err) => {
                self.slots.remove(&entry.id);
                Err(err)
            }
        }
    }

    /// Drop every cached plaintext and hide all entries.
    pub fn hide_all(&mut self) {
        self.slots.clear();
    }
}
