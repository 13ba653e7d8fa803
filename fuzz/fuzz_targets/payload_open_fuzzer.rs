//! Fuzz target for authenticated decryption of untrusted payloads
//!
//! # Strategy
//!
//! - Arbitrary wire bytes opened under a fixed key (forgery attempts)
//! - Valid payloads with one attacker-chosen byte modified
//!
//! # Invariants
//!
//! - Decryption never panics
//! - Inputs not longer than the nonce fail with `InvalidInputLength`
//! - Forged or modified payloads fail with `AuthenticationFailure`
//! - Unmodified payloads always decrypt to the original plaintext

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sphinx_crypto::{CryptoError, SymmetricKey, KEY_SIZE, NONCE_SIZE};

#[derive(Debug, Arbitrary)]
struct OpenScenario {
    key: [u8; KEY_SIZE],
    /// Raw bytes presented as a payload
    forged: Vec<u8>,
    /// Plaintext for the honest payload
    plaintext: Vec<u8>,
    /// Position and mask of the single modification
    flip_at: u16,
    flip_mask: u8,
}

fuzz_target!(|scenario: OpenScenario| {
    let Ok(key) = SymmetricKey::from_bytes(&scenario.key) else {
        return;
    };

    // INVARIANT 1: Forged input is rejected by length or by tag
    match key.decrypt(&scenario.forged) {
        Err(CryptoError::InvalidInputLength { .. }) => {
            assert!(scenario.forged.len() <= NONCE_SIZE);
        },
        Err(CryptoError::AuthenticationFailure) => {},
        Ok(_) => panic!("forged payload authenticated"),
        Err(other) => panic!("unexpected error: {other}"),
    }

    // INVARIANT 2: Honest payload round-trips
    let wire = key.encrypt(&scenario.plaintext).to_bytes();
    assert_eq!(key.decrypt(&wire).expect("honest payload"), scenario.plaintext);

    // INVARIANT 3: Any single modification is detected
    if scenario.flip_mask != 0 {
        let mut tampered = wire;
        let index = scenario.flip_at as usize % tampered.len();
        tampered[index] ^= scenario.flip_mask;
        assert_eq!(key.decrypt(&tampered), Err(CryptoError::AuthenticationFailure));
    }
});
