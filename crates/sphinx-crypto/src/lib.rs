//! Sphinx Cryptographic Key Hierarchy
//!
//! Deterministic key hierarchy and authenticated cryptography. One random
//! master key is the only stored secret; every purpose-specific key is
//! re-derived from it on demand.
//!
//! # Key Hierarchy
//!
//! ```text
//! OS RNG
//!    │
//!    ▼
//! MasterKey (32 bytes)
//!    │
//!    ▼
//! Context label fold (keyed BLAKE2b) → 32-byte digest
//!    │
//!    ├── Signing    → Ed25519 SigningKey   → sign / verify
//!    ├── Encryption → SymmetricKey         → XChaCha20-Poly1305
//!    ├── Salt       → per-host salt
//!    └── Password   → password context
//! ```
//!
//! # Security
//!
//! Domain Separation:
//! - Each [`Context`] has a distinct fixed label, so the same master key and
//!   inputs never yield the same digest for two purposes
//! - Derivation is deterministic: same key, context and inputs give the same
//!   digest
//!
//! Authenticity:
//! - `XChaCha20-Poly1305` AEAD rejects any modified byte of nonce, ciphertext
//!   or tag
//! - Failed authentication tag -> no plaintext at all
//!
//! Secret Hygiene:
//! - Master, symmetric and derived material is zeroized on drop
//! - Secret comparisons are constant time
//! - `Debug` output never contains secret bytes
//!
//! # Initialization
//!
//! Call [`init`] once before the first operation. It checks that the OS RNG
//! is usable and reports an error instead of panicking later.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod context;
pub mod env;
pub mod error;
pub mod hash;
pub mod master_key;
pub mod signing;
pub mod symmetric;

pub use context::{Context, FoldedDigest};
pub use env::{RandomSource, SystemRandom, init, random_bytes};
pub use error::{CryptoError, Result};
pub use hash::{DIGEST_SIZE, generic_hash};
pub use master_key::{MASTER_KEY_SIZE, MasterKey};
pub use signing::{
    KEYPAIR_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE, SIGNATURE_SIZE, SigningKey, verify,
};
pub use symmetric::{EncryptedPayload, KEY_SIZE, NONCE_SIZE, SymmetricKey, TAG_SIZE};
