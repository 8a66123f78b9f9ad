//! Mnemonic assembly and validation
//!
//! Generation: entropy -> append checksum -> 11-bit groups -> words.
//! Validation: NFKD + trim -> split on ' ' -> word indices -> pack bits ->
//! split entropy / checksum -> recompute checksum.

use std::fmt;

use phrasekit_core::{Language, MnemonicError, VALID_WORD_COUNTS};
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bits::{pack_groups, split_into_groups, BITS_PER_WORD};
use crate::entropy::{append_checksum, extract_entropy, generate_entropy, verify_checksum, Entropy};
use crate::seed::{derive_seed, Seed};
use crate::wordlist::{EmbeddedWordlists, WordlistProvider};

/// An ordered, checksummed word sequence in one language.
///
/// Always valid: it can only be built from entropy or from a phrase that
/// passed validation. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    #[zeroize(skip)]
    language: Language,
    words: Vec<String>,
    entropy: Entropy,
}

impl Mnemonic {
    /// Fresh mnemonic from `ent_bits` of CSPRNG entropy.
    pub fn generate(ent_bits: usize, language: Language) -> Result<Self, MnemonicError> {
        Self::generate_with(&EmbeddedWordlists, ent_bits, language)
    }

    pub fn generate_with<P: WordlistProvider + ?Sized>(
        provider: &P,
        ent_bits: usize,
        language: Language,
    ) -> Result<Self, MnemonicError> {
        let entropy = generate_entropy(ent_bits)?;
        Ok(Self::from_entropy_with(provider, &entropy, language))
    }

    pub fn from_entropy(entropy: &Entropy, language: Language) -> Self {
        Self::from_entropy_with(&EmbeddedWordlists, entropy, language)
    }

    /// Encode `entropy` as words from `provider`'s list for `language`.
    pub fn from_entropy_with<P: WordlistProvider + ?Sized>(
        provider: &P,
        entropy: &Entropy,
        language: Language,
    ) -> Self {
        let checksummed = append_checksum(entropy);
        let mut indices = split_into_groups(&checksummed, BITS_PER_WORD);
        let words = indices
            .iter()
            .map(|&i| provider.word_at(language, i).to_string())
            .collect::<Vec<_>>();
        indices.zeroize();

        tracing::debug!(%language, words = words.len(), "encoded entropy as mnemonic");
        Self {
            language,
            words,
            entropy: entropy.clone(),
        }
    }

    /// Validate `phrase` and rebuild it with the canonical list spelling.
    pub fn parse(phrase: &str, language: Language) -> Result<Self, MnemonicError> {
        Self::parse_with(&EmbeddedWordlists, phrase, language)
    }

    pub fn parse_with<P: WordlistProvider + ?Sized>(
        provider: &P,
        phrase: &str,
        language: Language,
    ) -> Result<Self, MnemonicError> {
        let entropy = validate_with(provider, phrase, language)?;
        Ok(Self::from_entropy_with(provider, &entropy, language))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn to_entropy(&self) -> Entropy {
        self.entropy.clone()
    }

    /// Derive the 64-byte seed; the mnemonic is already known to be valid.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        let mut normalized: String = self.to_string().nfkd().collect();
        let seed = derive_seed(&normalized, passphrase);
        normalized.zeroize();
        seed
    }
}

/// Words joined with the language separator (U+3000 for Japanese).
impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(self.language.separator()))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("language", &self.language)
            .field("words", &self.words.len())
            .finish_non_exhaustive()
    }
}

/// Generate a mnemonic from fresh entropy.
pub fn generate(ent_bits: usize, language: Language) -> Result<Mnemonic, MnemonicError> {
    Mnemonic::generate(ent_bits, language)
}

/// Encode raw entropy bytes (16, 20, 24, 28 or 32 bytes).
pub fn from_entropy(entropy: &[u8], language: Language) -> Result<Mnemonic, MnemonicError> {
    let entropy = Entropy::from_bytes(entropy)?;
    Ok(Mnemonic::from_entropy(&entropy, language))
}

/// Check `phrase` against the embedded list for `language` and return the
/// entropy it encodes.
pub fn validate(phrase: &str, language: Language) -> Result<Entropy, MnemonicError> {
    validate_with(&EmbeddedWordlists, phrase, language)
}

/// Full validation pipeline against `provider`.
///
/// The phrase is NFKD-normalized and trimmed, then split on single ASCII
/// spaces. Errors short-circuit in this order: word count, unknown words,
/// bit length, checksum.
pub fn validate_with<P: WordlistProvider + ?Sized>(
    provider: &P,
    phrase: &str,
    language: Language,
) -> Result<Entropy, MnemonicError> {
    let mut normalized: String = phrase.nfkd().collect();
    let result = decode_words(provider, normalized.trim(), language);
    normalized.zeroize();

    match &result {
        Ok(entropy) => {
            tracing::debug!(%language, bits = entropy.bit_len(), "mnemonic validated")
        }
        Err(e) => tracing::debug!(%language, error = %e, "mnemonic rejected"),
    }
    result
}

fn decode_words<P: WordlistProvider + ?Sized>(
    provider: &P,
    normalized: &str,
    language: Language,
) -> Result<Entropy, MnemonicError> {
    let words: Vec<&str> = normalized.split(' ').collect();
    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return Err(MnemonicError::InvalidWordCount(words.len()));
    }

    let mut indices = Vec::with_capacity(words.len());
    let mut unknown = Vec::new();
    for word in &words {
        match provider.index_of(language, word) {
            Some(i) => indices.push(i),
            None => unknown.push((*word).to_string()),
        }
    }
    if !unknown.is_empty() {
        indices.zeroize();
        return Err(MnemonicError::InvalidWords(unknown));
    }

    let checksummed = pack_groups(&indices, BITS_PER_WORD);
    indices.zeroize();

    let (entropy, checksum) = extract_entropy(&checksummed)?;
    if !verify_checksum(&entropy, &checksum) {
        return Err(MnemonicError::InvalidChecksum);
    }
    Ok(entropy)
}

/// `true` when `phrase` validates in `language`.
pub fn is_valid(phrase: &str, language: Language) -> bool {
    validate(phrase, language).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrasekit_core::VALID_ENTROPY_BITS;
    use proptest::prelude::*;

    const ZERO_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_from_zero_entropy() {
        let mnemonic = from_entropy(&[0u8; 16], Language::English).unwrap();
        assert_eq!(mnemonic.to_string(), ZERO_PHRASE);
        assert_eq!(mnemonic.word_count(), 12);
    }

    #[test]
    fn test_from_entropy_rejects_bad_length() {
        assert!(matches!(
            from_entropy(&[0u8; 17], Language::English),
            Err(MnemonicError::InvalidEntropyLengthOrLanguage(_))
        ));
    }

    #[test]
    fn test_word_counts_per_entropy_size() {
        for (bits, words) in VALID_ENTROPY_BITS.iter().zip(VALID_WORD_COUNTS) {
            let mnemonic = generate(*bits, Language::English).unwrap();
            assert_eq!(mnemonic.word_count(), words);
        }
    }

    #[test]
    fn test_generate_rejects_bad_size() {
        assert!(matches!(
            generate(100, Language::English),
            Err(MnemonicError::InvalidEntropyLengthOrLanguage(_))
        ));
    }

    #[test]
    fn test_validate_zero_phrase() {
        let entropy = validate(ZERO_PHRASE, Language::English).unwrap();
        assert_eq!(entropy.as_bytes(), &[0u8; 16]);
    }

    #[test]
    fn test_validate_trims_surrounding_whitespace() {
        let padded = format!("  {ZERO_PHRASE}\n");
        assert!(validate(&padded, Language::English).is_ok());
    }

    #[test]
    fn test_validate_unknown_word() {
        let phrase = ZERO_PHRASE.replacen("abandon", "bitcoin", 1);
        assert_eq!(
            validate(&phrase, Language::English).unwrap_err(),
            MnemonicError::InvalidWords(vec!["bitcoin".to_string()])
        );
    }

    #[test]
    fn test_validate_eleven_words() {
        let phrase = ZERO_PHRASE.split(' ').skip(1).collect::<Vec<_>>().join(" ");
        assert_eq!(
            validate(&phrase, Language::English).unwrap_err(),
            MnemonicError::InvalidWordCount(11)
        );
    }

    #[test]
    fn test_validate_double_space_is_not_collapsed() {
        let phrase = ZERO_PHRASE.replacen(' ', "  ", 1);
        assert_eq!(
            validate(&phrase, Language::English).unwrap_err(),
            MnemonicError::InvalidWordCount(13)
        );
    }

    #[test]
    fn test_validate_bad_checksum() {
        let phrase = ZERO_PHRASE.replace("about", "abandon");
        assert_eq!(
            validate(&phrase, Language::English).unwrap_err(),
            MnemonicError::InvalidChecksum
        );
    }

    #[test]
    fn test_validate_wrong_language() {
        assert!(matches!(
            validate(ZERO_PHRASE, Language::Spanish),
            Err(MnemonicError::InvalidWords(_))
        ));
    }

    #[test]
    fn test_parse_canonicalizes() {
        let mnemonic = Mnemonic::parse(&format!(" {ZERO_PHRASE} "), Language::English).unwrap();
        assert_eq!(mnemonic.to_string(), ZERO_PHRASE);
        assert_eq!(mnemonic.to_entropy().as_bytes(), &[0u8; 16]);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(ZERO_PHRASE, Language::English));
        assert!(!is_valid("abandon", Language::English));
    }

    #[test]
    fn test_debug_redacts_words() {
        let mnemonic = from_entropy(&[0u8; 16], Language::English).unwrap();
        let debug = format!("{mnemonic:?}");
        assert!(!debug.contains("abandon"));
    }

    #[test]
    fn test_japanese_rendering_uses_ideographic_space() {
        let mnemonic = from_entropy(&[0u8; 16], Language::Japanese).unwrap();
        let rendered = mnemonic.to_string();
        assert_eq!(rendered.matches('\u{3000}').count(), 11);
        assert!(!rendered.contains(' '));
    }

    #[test]
    fn test_japanese_rendering_revalidates_after_nfkd() {
        // NFKD maps U+3000 to U+0020, so the ASCII-space split still sees 12 words
        let mnemonic = from_entropy(&[0x5A; 32], Language::Japanese).unwrap();
        let entropy = validate(&mnemonic.to_string(), Language::Japanese).unwrap();
        assert_eq!(entropy.as_bytes(), &[0x5A; 32]);
    }

    /// Re-encode `mnemonic` with bit `flip` of its checksummed entropy inverted.
    fn flip_bit(mnemonic: &Mnemonic, flip: usize) -> String {
        let lists = EmbeddedWordlists;
        let indices: Vec<u16> = mnemonic
            .words()
            .map(|w| lists.index_of(Language::English, w).unwrap())
            .collect();
        let bits = pack_groups(&indices, BITS_PER_WORD);

        let mut flipped = crate::bits::BitString::new();
        for i in 0..bits.len() {
            flipped.push_bit(bits.bit(i) ^ (i == flip));
        }

        split_into_groups(&flipped, BITS_PER_WORD)
            .into_iter()
            .map(|i| lists.word_at(Language::English, i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_checksum_bit_flips_always_fail() {
        let mnemonic = from_entropy(&[0x3C; 32], Language::English).unwrap();
        // 256 entropy bits + 8 checksum bits
        for flip in 256..264 {
            assert_eq!(
                validate(&flip_bit(&mnemonic, flip), Language::English).unwrap_err(),
                MnemonicError::InvalidChecksum,
                "flipping checksum bit {flip}"
            );
        }
    }

    fn arb_entropy() -> impl Strategy<Value = Vec<u8>> {
        prop::sample::select(VALID_ENTROPY_BITS.to_vec())
            .prop_flat_map(|bits| proptest::collection::vec(any::<u8>(), bits / 8))
    }

    fn arb_language() -> impl Strategy<Value = Language> {
        prop::sample::select(Language::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn roundtrip_all_sizes_and_languages(bytes in arb_entropy(), lang in arb_language()) {
            let mnemonic = from_entropy(&bytes, lang).unwrap();
            let entropy = validate(&mnemonic.to_string(), lang).unwrap();
            prop_assert_eq!(entropy.as_bytes(), bytes.as_slice());
        }

        #[test]
        fn single_bit_flip_never_yields_original(bytes in arb_entropy(), bit in any::<prop::sample::Index>()) {
            let original = from_entropy(&bytes, Language::English).unwrap();
            let ent_len = bytes.len() * 8;
            let flip = bit.index(original.word_count() * 11);
            let phrase = flip_bit(&original, flip);

            // A flipped checksum bit can never match; a flipped entropy bit
            // passes only if the new entropy happens to share the checksum.
            match validate(&phrase, Language::English) {
                Err(MnemonicError::InvalidChecksum) => {}
                Ok(entropy) => {
                    prop_assert!(flip < ent_len, "checksum bit flip must not validate");
                    prop_assert_ne!(entropy.as_bytes(), bytes.as_slice());
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }

        #[test]
        fn word_count_gate(count in 0usize..40) {
            prop_assume!(!VALID_WORD_COUNTS.contains(&count));
            let phrase = vec!["abandon"; count].join(" ");
            let expected = count.max(1);
            prop_assert_eq!(
                validate(&phrase, Language::English).unwrap_err(),
                MnemonicError::InvalidWordCount(expected)
            );
        }
    }
}
