//! Seed derivation: mnemonic + passphrase -> 64-byte seed
//!
//! `seed = PBKDF2(HMAC-SHA512, NFKD(phrase), NFKD("mnemonic" || passphrase), 2048)`.
//! The output is always exactly one HMAC-SHA512 block, whatever the phrase
//! length or language.

use phrasekit_core::{Language, MnemonicError};
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::kdf::{hmac_sha512, pbkdf2, HMAC_SHA512_LEN};
use crate::mnemonic::validate_with;
use crate::wordlist::{EmbeddedWordlists, WordlistProvider};

/// Seed length in bytes.
pub const SEED_LEN: usize = HMAC_SHA512_LEN;

/// PBKDF2 iteration count fixed by BIP-39.
pub const PBKDF2_ROUNDS: u32 = 2048;

const SALT_PREFIX: &str = "mnemonic";

/// A 512-bit seed derived from a mnemonic.
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_LEN],
}

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Validate `phrase` in `language`, then derive its seed.
pub fn to_seed(phrase: &str, passphrase: &str, language: Language) -> Result<Seed, MnemonicError> {
    to_seed_with(&EmbeddedWordlists, phrase, passphrase, language)
}

pub fn to_seed_with<P: WordlistProvider + ?Sized>(
    provider: &P,
    phrase: &str,
    passphrase: &str,
    language: Language,
) -> Result<Seed, MnemonicError> {
    let mut normalized: String = phrase.nfkd().collect();
    let result = validate_with(provider, &normalized, language)
        .map(|_| derive_seed(&normalized, passphrase));
    normalized.zeroize();
    result
}

/// PBKDF2-HMAC-SHA512 over an already-normalized phrase. Does not validate.
pub(crate) fn derive_seed(normalized_phrase: &str, passphrase: &str) -> Seed {
    let mut salt: String = format!("{SALT_PREFIX}{passphrase}").nfkd().collect();
    let bytes: [u8; SEED_LEN] = pbkdf2(
        hmac_sha512,
        normalized_phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
    );
    salt.zeroize();

    tracing::trace!(rounds = PBKDF2_ROUNDS, "derived seed");
    Seed::from_bytes(bytes)
}
