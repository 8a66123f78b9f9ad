pub mod config;
pub mod error;
pub mod types;

pub use error::{MnemonicError, PhraseKitError, PhraseKitResult};
pub use types::{Language, VALID_ENTROPY_BITS, VALID_WORD_COUNTS};
