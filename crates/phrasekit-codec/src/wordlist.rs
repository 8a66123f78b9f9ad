//! Word list lookup: index <-> word for each supported language
//!
//! The codec only needs two capabilities from a word list, expressed by
//! [`WordlistProvider`]. [`EmbeddedWordlists`] serves the standard BIP-39
//! lists compiled into the `bip39` crate; its reverse index is built once,
//! on first lookup, and is read-only afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use phrasekit_core::{Language, MnemonicError};
use unicode_normalization::UnicodeNormalization;

/// Number of words in every list.
pub const WORDLIST_LEN: usize = 2048;

/// Source of the per-language 2048-word lists.
pub trait WordlistProvider {
    /// Word at `index` (0..2048).
    ///
    /// # Panics
    ///
    /// May panic if `index >= WORDLIST_LEN`.
    fn word_at(&self, language: Language, index: u16) -> &str;

    /// Index of `word`, which is expected in NFKD form.
    fn index_of(&self, language: Language, word: &str) -> Option<u16>;
}

/// The standard BIP-39 word lists bundled with the `bip39` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWordlists;

type ReverseIndex = HashMap<Language, HashMap<String, u16>>;

static REVERSE_INDEX: LazyLock<ReverseIndex> = LazyLock::new(|| {
    let index: ReverseIndex = Language::ALL
        .into_iter()
        .map(|language| {
            let words = bip39_language(language)
                .word_list()
                .iter()
                .enumerate()
                .map(|(i, word)| (word.nfkd().collect::<String>(), i as u16))
                .collect();
            (language, words)
        })
        .collect();
    tracing::debug!(languages = index.len(), "built word list reverse index");
    index
});

fn bip39_language(language: Language) -> bip39::Language {
    match language {
        Language::English => bip39::Language::English,
        Language::ChineseSimplified => bip39::Language::SimplifiedChinese,
        Language::ChineseTraditional => bip39::Language::TraditionalChinese,
        Language::French => bip39::Language::French,
        Language::Italian => bip39::Language::Italian,
        Language::Japanese => bip39::Language::Japanese,
        Language::Korean => bip39::Language::Korean,
        Language::Spanish => bip39::Language::Spanish,
    }
}

impl WordlistProvider for EmbeddedWordlists {
    fn word_at(&self, language: Language, index: u16) -> &str {
        bip39_language(language).word_list()[usize::from(index)]
    }

    fn index_of(&self, language: Language, word: &str) -> Option<u16> {
        REVERSE_INDEX.get(&language)?.get(word).copied()
    }
}

/// Identify the language whose list contains every word of `phrase`.
///
/// Fails with `InvalidWords` when no list matches and with
/// `AmbiguousLanguage` when several do (English and French share words).
pub fn detect_language_with<P: WordlistProvider + ?Sized>(
    provider: &P,
    phrase: &str,
) -> Result<Language, MnemonicError> {
    let normalized: String = phrase.nfkd().collect();
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let mut candidates: Vec<Language> = Language::ALL.to_vec();
    for word in &words {
        candidates.retain(|&lang| provider.index_of(lang, word).is_some());
        if candidates.is_empty() {
            return Err(MnemonicError::InvalidWords(vec![(*word).to_string()]));
        }
    }

    match candidates.as_slice() {
        [only] => Ok(*only),
        _ if words.is_empty() => Err(MnemonicError::InvalidWordCount(0)),
        _ => Err(MnemonicError::AmbiguousLanguage(candidates)),
    }
}

/// [`detect_language_with`] over the embedded lists.
pub fn detect_language(phrase: &str) -> Result<Language, MnemonicError> {
    detect_language_with(&EmbeddedWordlists, phrase)
}

/// Complete an abbreviated word.
///
/// Returns the list spelling of the word when listed, otherwise the single
/// list word that starts with `prefix`, otherwise `prefix` (NFKD) unchanged.
pub fn expand_word_with<P: WordlistProvider + ?Sized>(
    provider: &P,
    prefix: &str,
    language: Language,
) -> String {
    let prefix: String = prefix.nfkd().collect();
    if let Some(index) = provider.index_of(language, &prefix) {
        return provider.word_at(language, index).to_string();
    }

    let mut matches = (0..WORDLIST_LEN as u16)
        .map(|i| provider.word_at(language, i))
        .filter(|word| word.nfkd().collect::<String>().starts_with(&prefix));

    match (matches.next(), matches.next()) {
        (Some(word), None) => word.to_string(),
        _ => prefix,
    }
}

/// Expand every word of `phrase`.
///
/// The phrase is NFKD-normalized before splitting on ' ', so U+3000
/// separators split too. The result is joined with the language separator.
pub fn expand_with<P: WordlistProvider + ?Sized>(
    provider: &P,
    phrase: &str,
    language: Language,
) -> String {
    let normalized: String = phrase.nfkd().collect();
    normalized
        .split(' ')
        .map(|word| expand_word_with(provider, word, language))
        .collect::<Vec<_>>()
        .join(language.separator())
}

pub fn expand_word(prefix: &str, language: Language) -> String {
    expand_word_with(&EmbeddedWordlists, prefix, language)
}

pub fn expand(phrase: &str, language: Language) -> String {
    expand_with(&EmbeddedWordlists, phrase, language)
}
