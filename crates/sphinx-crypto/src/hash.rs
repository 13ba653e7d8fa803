//! Salted fixed-output hash.
//!
//! BLAKE2b-256 keyed by the salt, the construction libsodium exposes as
//! `crypto_generichash`. An empty salt gives plain unkeyed BLAKE2b-256.
//!
//! BLAKE2b keys are at most [`MAX_KEYED_SALT_SIZE`] bytes. A longer salt is
//! reduced with BLAKE2b-512 and the reduction keys a hash with its own
//! personalization, so a long salt and its reduction supplied directly never
//! share a digest.

use blake2::{
    Blake2b, Blake2b512, Blake2bMac,
    digest::{Digest, Mac, consts::U32},
};
use zeroize::Zeroize;

type Blake2b256 = Blake2b<U32>;
type Blake2bMac256 = Blake2bMac<U32>;

/// Size of a generic hash digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// Longest salt used directly as a BLAKE2b key
pub const MAX_KEYED_SALT_SIZE: usize = 64;

const LONG_SALT_PERSONA: &[u8; 16] = b"sphinx long salt";

/// Hash `message` under `salt`.
///
/// Deterministic: identical `(message, salt)` pairs always give the same
/// digest. Swapping the arguments gives an unrelated digest. Any salt length
/// is accepted.
pub fn generic_hash(message: &[u8], salt: &[u8]) -> [u8; DIGEST_SIZE] {
    if salt.is_empty() {
        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&Blake2b256::digest(message));
        return digest;
    }

    if salt.len() <= MAX_KEYED_SALT_SIZE {
        return keyed_hash(message, salt, &[]);
    }

    let mut reduced = [0u8; MAX_KEYED_SALT_SIZE];
    reduced.copy_from_slice(&Blake2b512::digest(salt));
    let digest = keyed_hash(message, &reduced, LONG_SALT_PERSONA);
    reduced.zeroize();
    digest
}

fn keyed_hash(message: &[u8], key: &[u8], persona: &[u8]) -> [u8; DIGEST_SIZE] {
    let Ok(mut mac) = Blake2bMac256::new_with_salt_and_personal(key, &[], persona) else {
        unreachable!("key is at most 64 bytes and persona at most 16");
    };
    mac.update(message);

    let mut digest = [0u8; DIGEST_SIZE];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}
