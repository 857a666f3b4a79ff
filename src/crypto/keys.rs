//! The ephemeral symmetric key used by the envelope codec.
//!
//! A `VaultKey` is recomputed from the passphrase on every encrypt or
//! decrypt call and never written anywhere.  The wrapper zeroes its
//! memory when dropped so key bytes cannot linger after use.

use zeroize::Zeroize;

/// Length of the symmetric key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key that automatically zeroes its memory
/// when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Create a new `VaultKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build an AES cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
