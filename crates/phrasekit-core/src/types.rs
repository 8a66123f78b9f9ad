use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MnemonicError;

/// Entropy sizes (in bits) accepted by the codec.
pub const VALID_ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Phrase lengths matching `VALID_ENTROPY_BITS` (one word per 11 bits of
/// entropy plus checksum).
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Word list language.
///
/// The set is closed: every variant has exactly one 2048-entry list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    ChineseSimplified,
    ChineseTraditional,
    French,
    Italian,
    Japanese,
    Korean,
    Spanish,
}

impl Language {
    /// All supported languages, in a fixed order.
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::French,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Spanish,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::ChineseSimplified => "chinese_simplified",
            Language::ChineseTraditional => "chinese_traditional",
            Language::French => "french",
            Language::Italian => "italian",
            Language::Japanese => "japanese",
            Language::Korean => "korean",
            Language::Spanish => "spanish",
        }
    }

    /// Separator used when rendering a phrase for display.
    ///
    /// Japanese phrases are joined with the ideographic space (U+3000).
    /// Its NFKD form is a plain ASCII space, so rendered Japanese phrases
    /// still split correctly after normalization.
    pub fn separator(self) -> &'static str {
        match self {
            Language::Japanese => "\u{3000}",
            _ => " ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Language::ALL
            .into_iter()
            .find(|lang| lang.name() == wanted)
            .ok_or_else(|| {
                MnemonicError::InvalidEntropyLengthOrLanguage(format!("unsupported language '{s}'"))
            })
    }
}
