//! Random source abstraction.
//!
//! Decouples key generation and nonce selection from the operating system RNG.
//! Production code uses [`SystemRandom`]; tests inject a seeded generator so
//! that nonces and generated keys are reproducible.
//!
//! # Initialization
//!
//! The OS RNG is the only process-wide resource this crate touches. Call
//! [`init`] once before the first operation: it probes the RNG and reports a
//! [`CryptoError::RandomUnavailable`] instead of the panic that
//! [`SystemRandom`] raises when entropy cannot be obtained.

use std::sync::OnceLock;

use crate::error::{CryptoError, Result};

/// Source of cryptographically secure random bytes.
///
/// # Invariants
///
/// - Implementations used outside tests MUST draw from a CSPRNG
/// - `fill` always fills the whole buffer or does not return
pub trait RandomSource {
    /// Fills the provided buffer with random bytes.
    fn fill(&self, buffer: &mut [u8]);

    /// Returns a fixed-size array of random bytes.
    fn random_array<const N: usize>(&self) -> [u8; N]
    where
        Self: Sized,
    {
        let mut bytes = [0u8; N];
        self.fill(&mut bytes);
        bytes
    }
}

/// Operating system CSPRNG (getrandom).
///
/// # Panics
///
/// Panics if the OS RNG fails. Without working randomness no key or nonce can
/// be produced safely, so there is nothing to fall back to. Use [`init`] to
/// detect the condition up front.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    #[allow(clippy::expect_used)]
    fn fill(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - no secure fallback exists");
    }
}

static RNG_PROBE: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// One-time initialization of the primitives used by this crate.
///
/// Probes the OS RNG on first call and caches the outcome, so later calls are
/// free. Idempotent and safe to call from several threads.
pub fn init() -> Result<()> {
    RNG_PROBE
        .get_or_init(|| {
            let mut probe = [0u8; 32];
            let outcome = getrandom::fill(&mut probe).map_err(|e| e.to_string());
            tracing::debug!(ok = outcome.is_ok(), "probed OS random source");
            outcome
        })
        .clone()
        .map_err(CryptoError::RandomUnavailable)
}

/// Returns `n` bytes from the OS RNG.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; n];
    SystemRandom.fill(&mut bytes);
    bytes
}
