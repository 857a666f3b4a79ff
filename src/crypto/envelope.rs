//! The portable text envelope wrapping one encrypted value.
//!
//! An envelope is a JSON record `{"iv": [...], "ciphertext": [...]}`
//! with both fields as plain byte sequences, wrapped in standard
//! base64 so the result is safe to embed in any text field.  Any
//! implementation that agrees on the passphrase and the cipher
//! parameters (AES-256-GCM, 12-byte IV, 16-byte tag) can open an
//! envelope produced by another.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const IV_LEN: usize = 12;

/// One encrypted value: a fresh random IV plus the authenticated
/// ciphertext (auth tag appended per the cipher's convention).
///
/// The IV is generated per encryption call and never reused, even
/// when the same plaintext is encrypted again under the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode this envelope as a single ASCII-safe string.
    pub fn serialize(&self) -> Result<String> {
        let record = serde_json::to_vec(self)
            .map_err(|e| LockboxError::SerializationError(format!("envelope: {e}")))?;
        Ok(BASE64.encode(record))
    }

    /// Decode an envelope previously produced by [`Envelope::serialize`].
    ///
    /// Fails with `MalformedEnvelope` if the text is not valid base64,
    /// if the decoded record is not the expected JSON shape, or if the
    /// IV is not exactly 12 bytes.  The serde round-trip enforces the
    /// IV length because the field is a fixed-size array.
    pub fn parse(text: &str) -> Result<Self> {
        let record = BASE64
            .decode(text.trim())
            .map_err(|e| LockboxError::MalformedEnvelope(format!("invalid base64: {e}")))?;

        serde_json::from_slice(&record)
            .map_err(|e| LockboxError::MalformedEnvelope(format!("invalid record: {e}")))
    }
}
