//! Error types for the key hierarchy.
//!
//! Every failure here is local and synchronous. None of them is transient:
//! a wrong length stays wrong and a forged ciphertext stays forged, so callers
//! must not retry. Size failures carry the expected and observed sizes so the
//! storage layer can tell truncation apart from a format mix-up.

use thiserror::Error;

/// Errors produced by key construction, derivation, signing and encryption.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Master key material has the wrong size
    #[error("invalid master key length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required size in bytes
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Cursor ran out of bytes before a full key could be read
    #[error("buffer underflow: needed {needed} bytes, {remaining} remaining")]
    Underflow {
        /// Bytes required by the read
        needed: usize,
        /// Bytes left in the cursor
        remaining: usize,
    },

    /// Signing seed has the wrong size
    #[error("invalid seed length: expected {expected} bytes, got {actual}")]
    InvalidSeedLength {
        /// Required size in bytes
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Key material (symmetric key, keypair or public key) has the wrong size
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required size in bytes
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Encrypted input is too short to contain a nonce and ciphertext
    #[error("invalid input length: need more than {minimum} bytes, got {actual}")]
    InvalidInputLength {
        /// The input must be strictly longer than this
        minimum: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Detached signature has the wrong size
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength {
        /// Required size in bytes
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Authentication tag did not verify (tampered data or wrong key)
    #[error("authentication failed")]
    AuthenticationFailure,

    /// Signature did not verify under the given public key
    #[error("signature verification failed")]
    SignatureMismatch,

    /// Public half of a keypair does not belong to its seed
    #[error("public key does not match secret seed")]
    KeyMismatch,

    /// Text encoding of key material could not be decoded
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Context name does not match any known context
    #[error("unknown context: {0}")]
    UnknownContext(String),

    /// The operating system RNG is not usable
    #[error("random source unavailable: {0}")]
    RandomUnavailable(String),
}

impl CryptoError {
    /// Returns true if the error reports a size mismatch.
    ///
    /// These indicate corrupted or mis-framed input rather than an attack,
    /// although callers should treat both the same way.
    pub fn is_length_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. }
                | Self::Underflow { .. }
                | Self::InvalidSeedLength { .. }
                | Self::InvalidKeyLength { .. }
                | Self::InvalidInputLength { .. }
                | Self::InvalidSignatureLength { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
