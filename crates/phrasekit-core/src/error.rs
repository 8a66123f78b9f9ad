use thiserror::Error;

use crate::types::Language;

pub type PhraseKitResult<T> = Result<T, PhraseKitError>;

/// Failures surfaced by the mnemonic codec.
///
/// Precondition errors (`InvalidEntropyLengthOrLanguage`) are caller mistakes,
/// parse errors (`InvalidWordCount`, `InvalidWords`) describe malformed input,
/// and integrity errors (`InvalidMnemonicLength`, `InvalidChecksum`) mean the
/// phrase is corrupted or fabricated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("invalid entropy length or language: {0}")]
    InvalidEntropyLengthOrLanguage(String),

    #[error("invalid word count: {0} (expected 12, 15, 18, 21 or 24)")]
    InvalidWordCount(usize),

    #[error("invalid words: {} not in the word list", .0.join(", "))]
    InvalidWords(Vec<String>),

    #[error("invalid mnemonic length: {0} bits does not split into entropy and checksum")]
    InvalidMnemonicLength(usize),

    #[error("invalid checksum")]
    InvalidChecksum,

    #[error("ambiguous language: phrase matches {0:?}")]
    AmbiguousLanguage(Vec<Language>),
}

#[derive(Debug, Error)]
pub enum PhraseKitError {
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
