//! Authenticated symmetric encryption using `XChaCha20-Poly1305`.
//!
//! Every encryption draws a fresh random 24-byte nonce. The wire form of a
//! payload is the nonce followed by the ciphertext and its 16-byte tag:
//!
//! ```text
//! ┌──────────────┬────────────────────────────┬──────────────┐
//! │ nonce (24 B) │ ciphertext (plaintext len) │ tag (16 B)   │
//! └──────────────┴────────────────────────────┴──────────────┘
//! ```
//!
//! Decryption fails closed: either the whole plaintext verifies or nothing is
//! returned.

use std::fmt;

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    env::{RandomSource, SystemRandom},
    error::{CryptoError, Result},
};

/// Size of a symmetric key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the `XChaCha20` nonce in bytes
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size in bytes
pub const TAG_SIZE: usize = 16;

/// Secret key for authenticated encryption.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Build a key from its exact byte form.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` unless `bytes` is exactly [`KEY_SIZE`] long
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Ok(key) = <[u8; KEY_SIZE]>::try_from(bytes) else {
            return Err(CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() });
        };
        Ok(Self(key))
    }

    /// Encrypt `plaintext` under a nonce from the OS RNG.
    pub fn encrypt(&self, plaintext: &[u8]) -> EncryptedPayload {
        self.encrypt_with(&SystemRandom, plaintext)
    }

    /// Encrypt `plaintext` under a nonce drawn from `rng`.
    ///
    /// # Security
    ///
    /// - A new nonce is drawn on every call, so identical plaintexts encrypt
    ///   to unrelated ciphertexts
    /// - 192-bit random nonces make collisions negligible
    /// - Callers MUST pass a cryptographically secure source in production
    pub fn encrypt_with(&self, rng: &impl RandomSource, plaintext: &[u8]) -> EncryptedPayload {
        let nonce: [u8; NONCE_SIZE] = rng.random_array();
        let cipher = XChaCha20Poly1305::new((&self.0).into());

        let Ok(ciphertext) = cipher.encrypt(XNonce::from_slice(&nonce), plaintext) else {
            unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
        };

        tracing::trace!(plaintext_len = plaintext.len(), "encrypted payload");
        EncryptedPayload { nonce, ciphertext }
    }

    /// Decrypt a `nonce ++ ciphertext` payload.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength` if `input` is not longer than [`NONCE_SIZE`]
    /// - `AuthenticationFailure` if the tag does not verify (tampered data,
    ///   wrong key, or a ciphertext too short to hold a tag)
    pub fn decrypt(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.len() <= NONCE_SIZE {
            return Err(CryptoError::InvalidInputLength { minimum: NONCE_SIZE, actual: input.len() });
        }

        let (nonce, ciphertext) = input.split_at(NONCE_SIZE);
        self.open(nonce, ciphertext)
    }

    /// Decrypt an already split payload.
    ///
    /// # Errors
    ///
    /// - `AuthenticationFailure` if the tag does not verify
    pub fn decrypt_payload(&self, payload: &EncryptedPayload) -> Result<Vec<u8>> {
        self.open(&payload.nonce, &payload.ciphertext)
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        debug_assert_eq!(nonce.len(), NONCE_SIZE);

        let cipher = XChaCha20Poly1305::new((&self.0).into());
        cipher.decrypt(XNonce::from_slice(nonce), ciphertext).map_err(|_| {
            tracing::debug!(ciphertext_len = ciphertext.len(), "payload authentication failed");
            CryptoError::AuthenticationFailure
        })
    }
}

impl ConstantTimeEq for SymmetricKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SymmetricKey {}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// A nonce and the ciphertext it was used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    nonce: [u8; NONCE_SIZE],
    ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Parse the `nonce ++ ciphertext` wire form.
    ///
    /// Only framing is checked here. Authenticity is checked on decryption.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength` if `bytes` is not longer than [`NONCE_SIZE`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() <= NONCE_SIZE {
            return Err(CryptoError::InvalidInputLength { minimum: NONCE_SIZE, actual: bytes.len() });
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[..NONCE_SIZE]);
        Ok(Self { nonce, ciphertext: bytes[NONCE_SIZE..].to_vec() })
    }

    /// Serialize to bytes: nonce || ciphertext
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(NONCE_SIZE + self.ciphertext.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// The random nonce (not secret).
    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    /// Ciphertext including the Poly1305 tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Plaintext length (ciphertext length minus authentication tag).
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }
}
