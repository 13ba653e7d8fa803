//! Master key: the root of the key hierarchy.
//!
//! A master key is 32 random bytes. Every other key is recomputed from it on
//! demand through a [`Context`] fold, so it is the only secret that ever needs
//! to be stored.
//!
//! ```text
//! MasterKey
//!    │
//!    ├── Context::Signing    + inputs → Ed25519 seed   → SigningKey
//!    ├── Context::Encryption + inputs → AEAD key       → SymmetricKey
//!    ├── Context::Salt       + host   → per-host salt
//!    └── Context::Password   + inputs → password context
//! ```

use std::fmt;

use bytes::Buf;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{
    context::{Context, FoldedDigest},
    env::{RandomSource, SystemRandom},
    error::{CryptoError, Result},
    signing::SigningKey,
    symmetric::SymmetricKey,
};

/// Size of a master key in bytes
pub const MASTER_KEY_SIZE: usize = 32;

/// Root secret of the key hierarchy.
///
/// # Invariants
///
/// - Always exactly [`MASTER_KEY_SIZE`] bytes
/// - Never mutated after construction
/// - Zeroized on drop, compared in constant time
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; MASTER_KEY_SIZE]);

impl MasterKey {
    /// Generate a fresh master key from the OS RNG.
    pub fn generate() -> Self {
        Self::generate_with(&SystemRandom)
    }

    /// Generate a fresh master key from the given random source.
    pub fn generate_with(rng: &impl RandomSource) -> Self {
        let key = Self(rng.random_array());
        tracing::debug!("generated master key");
        key
    }

    /// Reconstruct a master key from its exact byte form.
    ///
    /// # Errors
    ///
    /// - `InvalidLength` unless `bytes` is exactly [`MASTER_KEY_SIZE`] long
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Ok(key) = <[u8; MASTER_KEY_SIZE]>::try_from(bytes) else {
            return Err(CryptoError::InvalidLength {
                expected: MASTER_KEY_SIZE,
                actual: bytes.len(),
            });
        };
        Ok(Self(key))
    }

    /// Read a master key from a positioned cursor, advancing it by
    /// [`MASTER_KEY_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// - `Underflow` if fewer than [`MASTER_KEY_SIZE`] bytes remain. The
    ///   cursor is left where it was.
    pub fn from_buf<B: Buf>(buf: &mut B) -> Result<Self> {
        let remaining = buf.remaining();
        if remaining < MASTER_KEY_SIZE {
            return Err(CryptoError::Underflow { needed: MASTER_KEY_SIZE, remaining });
        }

        let mut key = [0u8; MASTER_KEY_SIZE];
        buf.copy_to_slice(&mut key);
        Ok(Self(key))
    }

    /// Decode a master key from lowercase or uppercase hex.
    ///
    /// # Errors
    ///
    /// - `InvalidEncoding` if `text` is not valid hex
    /// - `InvalidLength` if it does not decode to [`MASTER_KEY_SIZE`] bytes
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(text.trim()).map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Lowercase hex encoding of the key.
    ///
    /// Only for handing the key to a storage layer. Never log the result.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; MASTER_KEY_SIZE] {
        &self.0
    }

    /// Constant-time comparison of the full key.
    pub fn equals(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }

    /// Derive context-bound material from this key.
    ///
    /// The key bytes are folded first, followed by `extra` in order.
    pub fn derive(&self, context: Context, extra: &[&[u8]]) -> FoldedDigest {
        let mut messages: Vec<&[u8]> = Vec::with_capacity(extra.len() + 1);
        messages.push(&self.0);
        messages.extend_from_slice(extra);

        tracing::debug!(%context, extra = extra.len(), "deriving from master key");
        context.fold_hash(&messages)
    }

    /// Signing key bound to `extra` under [`Context::Signing`].
    pub fn signing_key(&self, extra: &[&[u8]]) -> SigningKey {
        let seed = self.derive(Context::Signing, extra);
        let Ok(key) = SigningKey::from_seed(seed.as_bytes()) else {
            unreachable!("folding the key bytes always yields a full-size seed");
        };
        key
    }

    /// Encryption key bound to `extra` under [`Context::Encryption`].
    pub fn symmetric_key(&self, extra: &[&[u8]]) -> SymmetricKey {
        let seed = self.derive(Context::Encryption, extra);
        let Ok(key) = SymmetricKey::from_bytes(seed.as_bytes()) else {
            unreachable!("folding the key bytes always yields a full-size key");
        };
        key
    }

    /// Per-host salt under [`Context::Salt`].
    pub fn host_salt(&self, host: &str) -> FoldedDigest {
        self.derive(Context::Salt, &[host.as_bytes()])
    }

    /// Password derivation context under [`Context::Password`].
    pub fn password_context(&self, extra: &[&[u8]]) -> FoldedDigest {
        self.derive(Context::Password, extra)
    }
}

impl ConstantTimeEq for MasterKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for MasterKey {}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(..)")
    }
}
