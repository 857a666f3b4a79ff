//! Passphrase-to-key derivation.
//!
//! Two modes are supported:
//! - **Digest** — a single SHA-256 digest of the passphrase bytes,
//!   used directly as the AES-256 key.  Deterministic and portable:
//!   any party holding the same passphrase derives the same key and
//!   can open any envelope produced under it.  Offers no resistance
//!   against offline guessing beyond the passphrase's own entropy.
//! - **Stretched** — Argon2id with a per-vault random salt.  Memory-
//!   hard, so brute-forcing a leaked envelope costs real resources.
//!   Envelopes produced this way are only openable with the same salt.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::crypto::keys::{VaultKey, KEY_LEN};
use crate::errors::{LockboxError, Result};

/// Length of the stretched-mode salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Derive a key as the SHA-256 digest of the passphrase bytes.
///
/// Same passphrase, same key — this is what makes envelopes portable
/// between sessions and implementations.
pub fn derive_key(passphrase: &[u8]) -> VaultKey {
    let digest = Sha256::digest(passphrase);
    VaultKey::new(digest.into())
}

/// Configurable Argon2id parameters for the stretched mode.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Derive a 32-byte key from a passphrase and salt using Argon2id.
///
/// The same passphrase + salt + params always produce the same key.
/// Enforces minimum parameters to prevent dangerously weak settings.
pub fn derive_key_stretched(
    passphrase: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<VaultKey> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(LockboxError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(LockboxError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(LockboxError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| LockboxError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| LockboxError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(VaultKey::new(key))
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// How a vault turns passphrases into keys.
///
/// The salt for the stretched mode is generated once per vault and
/// lives next to the entries for the length of the session, so every
/// entry in the vault is openable with the same passphrase.
#[derive(Debug, Clone)]
pub enum KdfConfig {
    /// Plain SHA-256 digest of the passphrase.
    Digest,
    /// Argon2id with a per-vault salt.
    Stretched {
        salt: [u8; SALT_LEN],
        params: Argon2Params,
    },
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self::Digest
    }
}

impl KdfConfig {
    /// Build a stretched config with a freshly generated salt.
    pub fn stretched(params: Argon2Params) -> Self {
        Self::Stretched {
            salt: generate_salt(),
            params,
        }
    }

    /// Derive the key for `passphrase` under this configuration.
    pub fn derive(&self, passphrase: &[u8]) -> Result<VaultKey> {
        match self {
            Self::Digest => Ok(derive_key(passphrase)),
            Self::Stretched { salt, params } => derive_key_stretched(passphrase, salt, params),
        }
    }
}
