//! Pluggable word lists and language-specific rendering

use std::collections::HashMap;

use phrasekit_codec::{
    detect_language, to_seed, to_seed_with, validate, validate_with, EmbeddedWordlists, Entropy,
    Language, Mnemonic, MnemonicError, WordlistProvider, WORDLIST_LEN,
};

/// English list shouted: every word upper-cased.
struct Shouting {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Shouting {
    fn new() -> Self {
        let words: Vec<String> = (0..WORDLIST_LEN as u16)
            .map(|i| EmbeddedWordlists.word_at(Language::English, i).to_uppercase())
            .collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u16))
            .collect();
        Self { words, index }
    }
}

impl WordlistProvider for Shouting {
    fn word_at(&self, _language: Language, index: u16) -> &str {
        &self.words[usize::from(index)]
    }

    fn index_of(&self, _language: Language, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }
}

#[test]
fn custom_provider_encodes_and_validates() {
    let provider = Shouting::new();
    let entropy = Entropy::from_bytes(&[0x7f; 16]).unwrap();

    let mnemonic = Mnemonic::from_entropy_with(&provider, &entropy, Language::English);
    assert_eq!(
        mnemonic.to_string(),
        "LEGAL WINNER THANK YEAR WAVE SAUSAGE WORTH USEFUL LEGAL WINNER THANK YELLOW"
    );

    let back = validate_with(&provider, &mnemonic.to_string(), Language::English).unwrap();
    assert_eq!(back, entropy);
}

#[test]
fn custom_provider_words_are_unknown_to_embedded_lists() {
    let provider = Shouting::new();
    let entropy = Entropy::from_bytes(&[0u8; 16]).unwrap();
    let phrase = Mnemonic::from_entropy_with(&provider, &entropy, Language::English).to_string();

    match validate(&phrase, Language::English) {
        Err(MnemonicError::InvalidWords(words)) => assert_eq!(words.len(), 12),
        other => panic!("expected InvalidWords, got {other:?}"),
    }
}

#[test]
fn custom_provider_seed_uses_rendered_phrase() {
    let provider = Shouting::new();
    let phrase = "ABANDON ABANDON ABANDON ABANDON ABANDON ABANDON ABANDON ABANDON ABANDON ABANDON ABANDON ABOUT";

    let shouted = to_seed_with(&provider, phrase, "TREZOR", Language::English).unwrap();
    let plain = to_seed(&phrase.to_lowercase(), "TREZOR", Language::English).unwrap();
    // the password is the phrase as given, so the case change alters the seed
    assert_ne!(shouted, plain);
}

#[test]
fn japanese_uses_ideographic_space() {
    let entropy = Entropy::from_bytes(&[0u8; 16]).unwrap();
    let mnemonic = Mnemonic::from_entropy(&entropy, Language::Japanese);
    let phrase = mnemonic.to_string();

    assert_eq!(phrase.matches('\u{3000}').count(), 11);
    assert!(!phrase.contains(' '));
    assert_eq!(mnemonic.word_count(), 12);
}

#[test]
fn japanese_validates_with_either_separator() {
    let entropy = Entropy::from_bytes(&[0x80; 32]).unwrap();
    let mnemonic = Mnemonic::from_entropy(&entropy, Language::Japanese);

    let ideographic = mnemonic.to_string();
    let ascii = mnemonic.words().collect::<Vec<_>>().join(" ");

    assert_eq!(validate(&ideographic, Language::Japanese).unwrap(), entropy);
    assert_eq!(validate(&ascii, Language::Japanese).unwrap(), entropy);
}

#[test]
fn japanese_seed_ignores_separator_choice() {
    let entropy = Entropy::from_bytes(&[0x42; 20]).unwrap();
    let mnemonic = Mnemonic::from_entropy(&entropy, Language::Japanese);

    let ideographic = mnemonic.to_string();
    let ascii = mnemonic.words().collect::<Vec<_>>().join(" ");

    let a = to_seed(&ideographic, "㍍ガバヴァぱばぐゞちぢ十人十色", Language::Japanese).unwrap();
    let b = to_seed(&ascii, "㍍ガバヴァぱばぐゞちぢ十人十色", Language::Japanese).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, mnemonic.to_seed("㍍ガバヴァぱばぐゞちぢ十人十色"));
}

#[test]
fn generated_phrases_are_detected() {
    for lang in [Language::Spanish, Language::Japanese, Language::Korean] {
        let mnemonic = Mnemonic::generate(128, lang).unwrap();
        assert_eq!(detect_language(&mnemonic.to_string()).unwrap(), lang);
    }
}
