//! Fuzz target for master key reconstruction
//!
//! Feeds arbitrary bytes to every master key constructor.
//!
//! # Invariants
//!
//! - Constructors never panic
//! - Exactly 32 bytes are accepted by `from_bytes`, everything else rejected
//! - `from_buf` consumes exactly 32 bytes on success and nothing on failure
//! - Hex import agrees with byte import

#![no_main]

use libfuzzer_sys::fuzz_target;
use sphinx_crypto::{CryptoError, MasterKey, MASTER_KEY_SIZE};

fuzz_target!(|data: &[u8]| {
    // INVARIANT 1: Only the exact size is accepted
    match MasterKey::from_bytes(data) {
        Ok(key) => {
            assert_eq!(data.len(), MASTER_KEY_SIZE);
            assert_eq!(&key.as_bytes()[..], data, "round-trip must be identity");
        },
        Err(err) => {
            assert_eq!(err, CryptoError::InvalidLength { expected: MASTER_KEY_SIZE, actual: data.len() });
        },
    }

    // INVARIANT 2: Cursor reads are all-or-nothing
    let mut cursor = bytes::Bytes::copy_from_slice(data);
    match MasterKey::from_buf(&mut cursor) {
        Ok(key) => {
            assert_eq!(&key.as_bytes()[..], &data[..MASTER_KEY_SIZE]);
            assert_eq!(cursor.len(), data.len() - MASTER_KEY_SIZE);
        },
        Err(_) => assert_eq!(cursor.len(), data.len(), "failed read must not advance"),
    }

    // INVARIANT 3: Hex parsing never panics and agrees with byte parsing
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(key) = MasterKey::from_hex(text) {
            let again = MasterKey::from_hex(&key.to_hex()).expect("own encoding must parse");
            assert!(key.equals(&again));
        }
    }
});
