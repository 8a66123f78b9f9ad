//! phrasekit-codec: BIP-39 mnemonic codec
//!
//! Pipeline:
//! ```text
//! generate:  entropy → ‖ SHA-256 checksum bits → 11-bit groups → words → phrase
//! validate:  phrase → NFKD + trim → words → indices → bits → entropy ‖ checksum → verify
//! seed:      NFKD(phrase), NFKD("mnemonic" ‖ passphrase) → PBKDF2-HMAC-SHA512 × 2048 → 64 bytes
//! ```
//!
//! Word lists come from a [`WordlistProvider`]; the plain functions use the
//! embedded BIP-39 lists and every operation has a `*_with` form that takes
//! a provider explicitly.

pub mod bits;
pub mod entropy;
pub mod kdf;
pub mod mnemonic;
pub mod seed;
pub mod wordlist;

pub use entropy::{generate_entropy, Entropy};
pub use mnemonic::{from_entropy, generate, is_valid, validate, validate_with, Mnemonic};
pub use seed::{to_seed, to_seed_with, Seed, PBKDF2_ROUNDS, SEED_LEN};
pub use wordlist::{
    detect_language, expand, expand_word, EmbeddedWordlists, WordlistProvider, WORDLIST_LEN,
};

pub use phrasekit_core::{Language, MnemonicError};
