//! AES-256-GCM authenticated encryption over envelopes.
//!
//! Each call to `encrypt` generates a fresh random 12-byte IV from
//! the OS random source and returns it alongside the ciphertext in
//! an [`Envelope`].  `decrypt` reverses the operation and verifies
//! the auth tag before releasing any plaintext.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::crypto::envelope::Envelope;
use crate::crypto::keys::VaultKey;
use crate::errors::{LockboxError, Result};

/// Encrypt `plaintext` under `key`, producing a fresh envelope.
///
/// The IV comes from `OsRng` on every call, so two encryptions of
/// the same plaintext never produce the same envelope.
pub fn encrypt(key: &VaultKey, plaintext: &[u8]) -> Result<Envelope> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LockboxError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // The aes-gcm crate appends the 16-byte auth tag to the ciphertext.
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| LockboxError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(Envelope {
        iv: nonce.into(),
        ciphertext,
    })
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// Fails with `AuthenticationFailed` when the tag does not verify —
/// from a wrong passphrase or a tampered ciphertext; the error never
/// says which.
pub fn decrypt(key: &VaultKey, envelope: &Envelope) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| LockboxError::AuthenticationFailed)?;

    let nonce = Nonce::from_slice(&envelope.iv);

    cipher
        .decrypt(nonce, envelope.ciphertext.as_slice())
        .map_err(|_| LockboxError::AuthenticationFailed)
}
