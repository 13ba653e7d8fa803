//! Domain-separation contexts and the label fold.
//!
//! Each key purpose owns a fixed ASCII label. Derivation starts from the label
//! and folds every input into it with [`generic_hash`]:
//!
//! ```text
//! seed_0 = label
//! seed_i = generic_hash(message = seed_{i-1}, salt = input_i)
//! ```
//!
//! The running value is always the hashed message and the next input is
//! always the salt. Because the labels are distinct, the same inputs folded
//! under two contexts give unrelated digests.

use std::{fmt, str::FromStr};

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    error::CryptoError,
    hash::{DIGEST_SIZE, generic_hash},
};

/// Key purpose, bound to a fixed derivation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Ed25519 signing keys
    Signing,
    /// Symmetric encryption keys
    Encryption,
    /// Per-host salts
    Salt,
    /// Password derivation context
    Password,
}

impl Context {
    /// Every context, in declaration order.
    pub const ALL: [Self; 4] = [Self::Signing, Self::Encryption, Self::Salt, Self::Password];

    /// The domain-separation label for this context.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Signing => "sphinx signing key",
            Self::Encryption => "sphinx encryption key",
            Self::Salt => "sphinx host salt",
            Self::Password => "sphinx password context",
        }
    }

    /// Fold `messages` into this context's label.
    ///
    /// With no messages the result is the label itself. Every folded message
    /// yields a [`DIGEST_SIZE`] digest.
    pub fn fold_hash(self, messages: &[&[u8]]) -> FoldedDigest {
        tracing::trace!(context = %self, messages = messages.len(), "folding context label");

        let mut seed = self.label().as_bytes().to_vec();
        for message in messages {
            let mut next = generic_hash(&seed, message);
            seed.zeroize();
            seed.extend_from_slice(&next);
            next.zeroize();
        }

        FoldedDigest(seed)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Signing => "signing",
            Self::Encryption => "encryption",
            Self::Salt => "salt",
            Self::Password => "password",
        };
        f.write_str(name)
    }
}

impl FromStr for Context {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|context| context.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptoError::UnknownContext(s.to_string()))
    }
}

/// Output of a context fold.
///
/// The bare label when nothing was folded, otherwise a [`DIGEST_SIZE`]
/// digest. Secret-derived material: zeroized on drop, compared in constant
/// time and never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FoldedDigest(Vec<u8>);

impl FoldedDigest {
    /// Raw folded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for FoldedDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for FoldedDigest {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl PartialEq for FoldedDigest {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FoldedDigest {}

impl fmt::Debug for FoldedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FoldedDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_pairwise_distinct() {
        for (i, a) in Context::ALL.iter().enumerate() {
            for b in &Context::ALL[i + 1..] {
                assert_ne!(a.label(), b.label(), "{a} and {b} share a label");
            }
        }
    }

    #[test]
    fn labels_are_ascii() {
        for context in Context::ALL {
            assert!(context.label().is_ascii());
        }
    }

    #[test]
    fn fold_is_deterministic() {
        let messages: [&[u8]; 2] = [b"alpha", b"beta"];
        assert_eq!(Context::Salt.fold_hash(&messages), Context::Salt.fold_hash(&messages));
    }

    #[test]
    fn fold_separates_contexts() {
        let messages: [&[u8]; 1] = [b"example.org"];
        let digests: Vec<_> = Context::ALL.iter().map(|c| c.fold_hash(&messages)).collect();

        for (i, a) in digests.iter().enumerate() {
            for b in &digests[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn fold_uses_running_value_as_message() {
        let first = generic_hash(b"sphinx host salt", b"one");
        let expected = generic_hash(&first, b"two");

        let folded = Context::Salt.fold_hash(&[b"one", b"two"]);
        assert_eq!(folded.as_bytes(), &expected);
    }

    #[test]
    fn fold_depends_on_message_order() {
        let forward = Context::Password.fold_hash(&[b"one", b"two"]);
        let reversed = Context::Password.fold_hash(&[b"two", b"one"]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn empty_fold_is_the_label() {
        for context in Context::ALL {
            let folded = context.fold_hash(&[]);
            assert_eq!(folded.as_ref(), context.label().as_bytes());
            assert_ne!(folded, context.fold_hash(&[b""]));
        }
    }

    #[test]
    fn folded_messages_give_full_digests() {
        assert_eq!(Context::Signing.fold_hash(&[b""]).as_bytes().len(), DIGEST_SIZE);
        assert_eq!(Context::Password.fold_hash(&[b"a", b"b", b"c"]).as_bytes().len(), DIGEST_SIZE);
    }

    #[test]
    fn context_parses_case_insensitively() {
        assert_eq!("SIGNING".parse::<Context>().unwrap(), Context::Signing);
        assert_eq!("encryption".parse::<Context>().unwrap(), Context::Encryption);
        assert_eq!("Salt".parse::<Context>().unwrap(), Context::Salt);
        assert_eq!("password".parse::<Context>().unwrap(), Context::Password);
        assert_eq!(
            "hashing".parse::<Context>(),
            Err(CryptoError::UnknownContext("hashing".to_string()))
        );
    }

    #[test]
    fn digest_debug_is_redacted() {
        let folded = Context::Encryption.fold_hash(&[b"secret"]);
        assert_eq!(format!("{folded:?}"), "FoldedDigest(..)");
    }
}
