//! Ed25519 signing keys derived from seeds.
//!
//! A signing key is fully determined by its 32-byte seed, so a key derived
//! from the master key under [`crate::Context::Signing`] never needs its own
//! storage.

use std::fmt;

use ed25519_dalek::{Signature, Signer, VerifyingKey};

use crate::error::{CryptoError, Result};

/// Size of an Ed25519 seed in bytes
pub const SEED_SIZE: usize = 32;

/// Size of an Ed25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of a detached Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Size of the combined `seed ++ public_key` keypair encoding
pub const KEYPAIR_SIZE: usize = SEED_SIZE + PUBLIC_KEY_SIZE;

/// Ed25519 private key with its public half.
///
/// The secret scalar is zeroized on drop by `ed25519-dalek`.
#[derive(Clone)]
pub struct SigningKey {
    secret: ed25519_dalek::SigningKey,
}

impl SigningKey {
    /// Deterministically expand a seed into a keypair.
    ///
    /// # Errors
    ///
    /// - `InvalidSeedLength` unless `seed` is exactly [`SEED_SIZE`] bytes
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let Ok(seed) = <&[u8; SEED_SIZE]>::try_from(seed) else {
            return Err(CryptoError::InvalidSeedLength { expected: SEED_SIZE, actual: seed.len() });
        };
        Ok(Self { secret: ed25519_dalek::SigningKey::from_bytes(seed) })
    }

    /// Restore a key from its `seed ++ public_key` encoding.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` unless `bytes` is exactly [`KEYPAIR_SIZE`] bytes
    /// - `KeyMismatch` if the public half was not produced by the seed
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self> {
        let Ok(keypair) = <&[u8; KEYPAIR_SIZE]>::try_from(bytes) else {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEYPAIR_SIZE,
                actual: bytes.len(),
            });
        };
        let secret = ed25519_dalek::SigningKey::from_keypair_bytes(keypair)
            .map_err(|_| CryptoError::KeyMismatch)?;
        Ok(Self { secret })
    }

    /// The `seed ++ public_key` encoding of this key.
    pub fn to_keypair_bytes(&self) -> zeroize::Zeroizing<[u8; KEYPAIR_SIZE]> {
        zeroize::Zeroizing::new(self.secret.to_keypair_bytes())
    }

    /// Produce a detached signature over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        self.secret.sign(message).to_bytes()
    }

    /// Public key matching this private key.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.secret.verifying_key().to_bytes()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey").field("public_key", &hex::encode(self.public_key())).finish()
    }
}

/// Verify a detached signature.
///
/// Uses strict verification: small-order public keys and non-canonical
/// signatures are rejected.
///
/// # Errors
///
/// - `InvalidKeyLength` if `public_key` is not [`PUBLIC_KEY_SIZE`] bytes
/// - `InvalidSignatureLength` if `signature` is not [`SIGNATURE_SIZE`] bytes
/// - `SignatureMismatch` if the key is not a valid point or the signature
///   does not verify
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    let Ok(public_key) = <&[u8; PUBLIC_KEY_SIZE]>::try_from(public_key) else {
        return Err(CryptoError::InvalidKeyLength {
            expected: PUBLIC_KEY_SIZE,
            actual: public_key.len(),
        });
    };
    let Ok(signature) = <&[u8; SIGNATURE_SIZE]>::try_from(signature) else {
        return Err(CryptoError::InvalidSignatureLength {
            expected: SIGNATURE_SIZE,
            actual: signature.len(),
        });
    };

    let verifying_key = VerifyingKey::from_bytes(public_key).map_err(|_| {
        tracing::debug!("public key is not a valid Ed25519 point");
        CryptoError::SignatureMismatch
    })?;

    verifying_key
        .verify_strict(message, &Signature::from_bytes(signature))
        .map_err(|_| CryptoError::SignatureMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032, section 7.1, TEST 1
    const RFC8032_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const RFC8032_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const RFC8032_SIGNATURE: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                                     5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    fn rfc_key() -> SigningKey {
        SigningKey::from_seed(&hex::decode(RFC8032_SEED).unwrap()).unwrap()
    }

    #[test]
    fn matches_rfc8032_vector() {
        let key = rfc_key();
        assert_eq!(hex::encode(key.public_key()), RFC8032_PUBLIC);
        assert_eq!(hex::encode(key.sign(b"")), RFC8032_SIGNATURE);
    }

    #[test]
    fn from_seed_is_deterministic() {
        let seed = [7u8; SEED_SIZE];
        let a = SigningKey::from_seed(&seed).unwrap();
        let b = SigningKey::from_seed(&seed).unwrap();

        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.sign(b"message"), b.sign(b"message"));
    }

    #[test]
    fn from_seed_rejects_wrong_lengths() {
        for len in [0, 31, 33, 64] {
            let result = SigningKey::from_seed(&vec![0u8; len]);
            assert!(matches!(
                result,
                Err(CryptoError::InvalidSeedLength { expected: 32, actual }) if actual == len
            ));
        }
    }

    #[test]
    fn keypair_bytes_roundtrip() {
        let key = rfc_key();
        let encoded = key.to_keypair_bytes();
        assert_eq!(&encoded[..SEED_SIZE], hex::decode(RFC8032_SEED).unwrap().as_slice());
        assert_eq!(&encoded[SEED_SIZE..], &key.public_key());

        let restored = SigningKey::from_keypair_bytes(encoded.as_slice()).unwrap();
        assert_eq!(restored.public_key(), key.public_key());
    }

    #[test]
    fn keypair_bytes_reject_malformed_material() {
        assert!(matches!(
            SigningKey::from_keypair_bytes(&[0u8; 63]),
            Err(CryptoError::InvalidKeyLength { expected: 64, actual: 63 })
        ));

        let mut encoded = *rfc_key().to_keypair_bytes();
        encoded[KEYPAIR_SIZE - 1] ^= 0x01;
        assert!(matches!(
            SigningKey::from_keypair_bytes(&encoded),
            Err(CryptoError::KeyMismatch)
        ));
    }

    #[test]
    fn signature_verifies() {
        let key = SigningKey::from_seed(&[1u8; SEED_SIZE]).unwrap();
        let signature = key.sign(b"hello");
        assert!(verify(&key.public_key(), b"hello", &signature).is_ok());
    }

    #[test]
    fn signature_rejects_other_message_or_key() {
        let key = SigningKey::from_seed(&[1u8; SEED_SIZE]).unwrap();
        let other = SigningKey::from_seed(&[2u8; SEED_SIZE]).unwrap();
        let signature = key.sign(b"hello");

        assert_eq!(verify(&key.public_key(), b"hellO", &signature), Err(CryptoError::SignatureMismatch));
        assert_eq!(verify(&other.public_key(), b"hello", &signature), Err(CryptoError::SignatureMismatch));
    }

    #[test]
    fn verify_checks_lengths() {
        let key = SigningKey::from_seed(&[1u8; SEED_SIZE]).unwrap();
        let signature = key.sign(b"hello");

        assert!(matches!(
            verify(&key.public_key()[..31], b"hello", &signature),
            Err(CryptoError::InvalidKeyLength { expected: 32, actual: 31 })
        ));
        assert!(matches!(
            verify(&key.public_key(), b"hello", &signature[..63]),
            Err(CryptoError::InvalidSignatureLength { expected: 64, actual: 63 })
        ));
    }

    #[test]
    fn debug_shows_only_public_key() {
        let text = format!("{:?}", rfc_key());
        assert!(text.contains(RFC8032_PUBLIC));
        assert!(!text.contains(RFC8032_SEED));
    }
}
