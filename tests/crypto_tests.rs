//! Integration tests for the Lockbox crypto module.

use lockbox::crypto::{
    decrypt, derive_key, derive_key_stretched, encrypt, generate_salt, Argon2Params, Envelope,
    KdfConfig,
};
use lockbox::errors::LockboxError;

// ---------------------------------------------------------------------------
// Envelope round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_serialize_parse_decrypt_roundtrip() {
    let key = derive_key(b"correct horse battery staple");
    let plaintext = b"the launch code is 0000";

    let envelope = encrypt(&key, plaintext).expect("encrypt should succeed");
    let text = envelope.serialize().expect("serialize should succeed");

    // The envelope text must be plain ASCII, safe for any text field.
    assert!(text.is_ascii());

    let parsed = Envelope::parse(&text).expect("parse should succeed");
    let recovered = decrypt(&key, &parsed).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn roundtrip_preserves_arbitrary_bytes() {
    let key = derive_key(b"pw");
    // Not valid UTF-8 — file contents are opaque bytes.
    let plaintext: Vec<u8> = (0u8..=255).collect();

    let envelope = encrypt(&key, &plaintext).expect("encrypt");
    let text = envelope.serialize().expect("serialize");
    let recovered = decrypt(&key, &Envelope::parse(&text).expect("parse")).expect("decrypt");

    assert_eq!(recovered, plaintext);
}

#[test]
fn empty_plaintext_roundtrips() {
    let key = derive_key(b"pw");

    let envelope = encrypt(&key, b"").expect("encrypt");
    // Even an empty plaintext carries a 16-byte auth tag.
    assert_eq!(envelope.ciphertext.len(), 16);

    let recovered = decrypt(&key, &envelope).expect("decrypt");
    assert!(recovered.is_empty());
}

// ---------------------------------------------------------------------------
// IV uniqueness
// ---------------------------------------------------------------------------

#[test]
fn same_plaintext_twice_differs_in_iv_and_ciphertext() {
    let key = derive_key(b"same-pass");
    let plaintext = b"identical secret";

    let env1 = encrypt(&key, plaintext).expect("encrypt 1");
    let env2 = encrypt(&key, plaintext).expect("encrypt 2");

    assert_ne!(env1.iv, env2.iv, "IVs must never repeat");
    assert_ne!(
        env1.ciphertext, env2.ciphertext,
        "ciphertexts must differ when the IV differs"
    );
}

// ---------------------------------------------------------------------------
// Tamper detection and wrong-key rejection
// ---------------------------------------------------------------------------

#[test]
fn flipping_one_ciphertext_bit_fails_authentication() {
    let key = derive_key(b"pw");
    let envelope = encrypt(&key, b"integrity matters").expect("encrypt");

    // Flip a single bit in every ciphertext position in turn; each
    // variant must fail closed with no plaintext.
    for index in 0..envelope.ciphertext.len() {
        let mut tampered = envelope.clone();
        tampered.ciphertext[index] ^= 0x01;

        let result = decrypt(&key, &tampered);
        assert!(
            matches!(result, Err(LockboxError::AuthenticationFailed)),
            "bit flip at byte {index} must fail tag verification"
        );
    }
}

#[test]
fn tampered_serialized_envelope_fails_authentication() {
    let key = derive_key(b"pw");
    let text = encrypt(&key, b"hands off")
        .expect("encrypt")
        .serialize()
        .expect("serialize");

    // Corrupt the ciphertext through the text representation.
    let mut envelope = Envelope::parse(&text).expect("parse");
    let last = envelope.ciphertext.len() - 1;
    envelope.ciphertext[last] ^= 0x80;
    let corrupted_text = envelope.serialize().expect("serialize");

    let reparsed = Envelope::parse(&corrupted_text).expect("parse");
    let result = decrypt(&key, &reparsed);
    assert!(matches!(result, Err(LockboxError::AuthenticationFailed)));
}

#[test]
fn wrong_passphrase_is_rejected() {
    let envelope = encrypt(&derive_key(b"passphrase-one"), b"secret").expect("encrypt");

    let result = decrypt(&derive_key(b"passphrase-two"), &envelope);
    assert!(
        matches!(result, Err(LockboxError::AuthenticationFailed)),
        "a key from a different passphrase must fail tag verification"
    );
}

// ---------------------------------------------------------------------------
// Envelope parsing failure modes
// ---------------------------------------------------------------------------

#[test]
fn parse_rejects_invalid_base64() {
    let result = Envelope::parse("@@@ definitely not base64 @@@");
    assert!(matches!(result, Err(LockboxError::MalformedEnvelope(_))));
}

#[test]
fn parse_rejects_wrong_iv_length() {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    // 11-byte IV: one short.
    let record = br#"{"iv":[0,1,2,3,4,5,6,7,8,9,10],"ciphertext":[1,2,3]}"#;
    let result = Envelope::parse(&BASE64.encode(record));
    assert!(matches!(result, Err(LockboxError::MalformedEnvelope(_))));
}

// ---------------------------------------------------------------------------
// Key derivation — digest mode
// ---------------------------------------------------------------------------

#[test]
fn derive_key_matches_sha256_test_vector() {
    // SHA-256("abc") from the FIPS 180-2 test vectors.
    let expected: [u8; 32] = [
        0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22,
        0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00,
        0x15, 0xad,
    ];

    let key = derive_key(b"abc");
    assert_eq!(key.as_bytes(), &expected);
}

#[test]
fn derive_key_is_deterministic() {
    let key1 = derive_key(b"my-passphrase");
    let key2 = derive_key(b"my-passphrase");
    assert_eq!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn different_passphrases_derive_different_keys() {
    let key1 = derive_key(b"passphrase-a");
    let key2 = derive_key(b"passphrase-b");
    assert_ne!(key1.as_bytes(), key2.as_bytes());
}

// ---------------------------------------------------------------------------
// Key derivation — stretched mode
// ---------------------------------------------------------------------------

/// Small-but-valid Argon2 params so tests stay fast.
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

#[test]
fn stretched_same_inputs_same_key() {
    let salt = generate_salt();
    let params = test_params();

    let key1 = derive_key_stretched(b"passphrase", &salt, &params).expect("derive 1");
    let key2 = derive_key_stretched(b"passphrase", &salt, &params).expect("derive 2");

    assert_eq!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn stretched_different_salts_different_keys() {
    let params = test_params();
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_key_stretched(b"passphrase", &salt1, &params).expect("derive 1");
    let key2 = derive_key_stretched(b"passphrase", &salt2, &params).expect("derive 2");

    assert_ne!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn stretched_rejects_weak_params() {
    let weak = Argon2Params {
        memory_kib: 16, // far below the enforced minimum
        iterations: 1,
        parallelism: 1,
    };

    let result = derive_key_stretched(b"pw", &generate_salt(), &weak);
    assert!(matches!(result, Err(LockboxError::KeyDerivationFailed(_))));
}

#[test]
fn kdf_config_digest_matches_direct_derivation() {
    let config = KdfConfig::Digest;
    let via_config = config.derive(b"pw").expect("derive");
    assert_eq!(via_config.as_bytes(), derive_key(b"pw").as_bytes());
}

#[test]
fn kdf_config_stretched_keeps_its_salt() {
    let config = KdfConfig::stretched(test_params());

    // The same config derives the same key every time — the salt is
    // fixed at construction, not per call.
    let key1 = config.derive(b"pw").expect("derive 1");
    let key2 = config.derive(b"pw").expect("derive 2");
    assert_eq!(key1.as_bytes(), key2.as_bytes());

    // A different config means a different salt, so a different key.
    let other = KdfConfig::stretched(test_params());
    let key3 = other.derive(b"pw").expect("derive 3");
    assert_ne!(key1.as_bytes(), key3.as_bytes());
}
