//! Fuzz target for context-separated derivation
//!
//! # Invariants
//!
//! - Derivation is deterministic (same inputs → same output)
//! - Distinct contexts never produce the same digest
//! - Derived signing keys sign and verify

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sphinx_crypto::{verify, Context, MasterKey};

#[derive(Debug, Arbitrary)]
struct DerivationScenario {
    master: [u8; 32],
    messages: Vec<Vec<u8>>,
    to_sign: Vec<u8>,
}

fuzz_target!(|scenario: DerivationScenario| {
    let Ok(master) = MasterKey::from_bytes(&scenario.master) else {
        return;
    };
    let extra: Vec<&[u8]> = scenario.messages.iter().take(8).map(Vec::as_slice).collect();

    let digests: Vec<_> = Context::ALL.iter().map(|c| master.derive(*c, &extra)).collect();

    for (i, context) in Context::ALL.iter().enumerate() {
        // INVARIANT 1: Deterministic
        assert_eq!(digests[i], master.derive(*context, &extra));

        // INVARIANT 2: Context separation
        for other in &digests[i + 1..] {
            assert_ne!(&digests[i], other);
        }
    }

    // INVARIANT 3: Derived signer verifies its own signatures
    let signer = master.signing_key(&extra);
    let signature = signer.sign(&scenario.to_sign);
    assert!(verify(&signer.public_key(), &scenario.to_sign, &signature).is_ok());
});
