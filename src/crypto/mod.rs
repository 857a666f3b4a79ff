//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The portable `{iv, ciphertext}` text envelope (`envelope`)
//! - Passphrase-to-key derivation, digest and Argon2id (`kdf`)
//! - The zeroize-on-drop key wrapper (`keys`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, Envelope, ...};
pub use encryption::{decrypt, encrypt};
pub use envelope::Envelope;
pub use kdf::{derive_key, derive_key_stretched, generate_salt, Argon2Params, KdfConfig};
pub use keys::VaultKey;
