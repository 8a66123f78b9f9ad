//! Entropy generation and checksum handling
//!
//! `ENT` bits of entropy carry an `ENT / 32`-bit checksum: the leading bits
//! of `SHA-256(entropy)`. Entropy followed by checksum is always a multiple
//! of 11 bits long, one word index per 11 bits.

use phrasekit_core::{MnemonicError, VALID_ENTROPY_BITS};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bits::{take_bits, BitString};
use crate::kdf::sha256;

/// Raw entropy of one of the standard sizes (128..=256 bits in steps of 32).
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    bytes: Vec<u8>,
}

impl Entropy {
    /// Wrap existing entropy bytes, rejecting non-standard lengths.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MnemonicError> {
        let bits = bytes.len() * 8;
        if !VALID_ENTROPY_BITS.contains(&bits) {
            return Err(MnemonicError::InvalidEntropyLengthOrLanguage(format!(
                "{bits} bits of entropy (expected 128, 160, 192, 224 or 256)"
            )));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Parse hex-encoded entropy.
    pub fn from_hex(hex_str: &str) -> Result<Self, MnemonicError> {
        let mut bytes = hex::decode(hex_str.trim()).map_err(|e| {
            MnemonicError::InvalidEntropyLengthOrLanguage(format!("entropy is not valid hex: {e}"))
        })?;
        let entropy = Self::from_bytes(&bytes);
        bytes.zeroize();
        entropy
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entropy")
            .field("bits", &self.bit_len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Checksum length in bits for `ent_bits` of entropy.
pub fn checksum_len(ent_bits: usize) -> usize {
    ent_bits / 32
}

/// Draw `ent_bits / 8` bytes from the thread-local CSPRNG.
pub fn generate_entropy(ent_bits: usize) -> Result<Entropy, MnemonicError> {
    if !VALID_ENTROPY_BITS.contains(&ent_bits) {
        return Err(MnemonicError::InvalidEntropyLengthOrLanguage(format!(
            "cannot generate {ent_bits} bits of entropy (expected 128, 160, 192, 224 or 256)"
        )));
    }

    let mut bytes = vec![0u8; ent_bits / 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    let entropy = Entropy::from_bytes(&bytes);
    bytes.zeroize();

    tracing::debug!(bits = ent_bits, "generated entropy");
    entropy
}

/// Entropy followed by its checksum bits.
pub fn append_checksum(entropy: &Entropy) -> BitString {
    let digest = sha256(entropy.as_bytes());
    let checksum = take_bits(&digest, checksum_len(entropy.bit_len()));

    let mut bits = BitString::from_bytes(entropy.as_bytes());
    bits.extend(&checksum);
    bits
}

/// Split checksummed entropy back into entropy and checksum.
///
/// For a total length `L`, the entropy part is `L * 32 / 33` bits; `L` must
/// be exactly `ENT + ENT / 32` for one of the standard entropy sizes.
pub fn extract_entropy(checksummed: &BitString) -> Result<(Entropy, BitString), MnemonicError> {
    let total = checksummed.len();
    let ent_len = total * 32 / 33;
    let cs_len = checksum_len(ent_len);

    if !VALID_ENTROPY_BITS.contains(&ent_len) || ent_len + cs_len != total {
        return Err(MnemonicError::InvalidMnemonicLength(total));
    }

    let (entropy_bits, checksum) = checksummed.split_at(ent_len);
    let entropy = Entropy::from_bytes(entropy_bits.as_bytes())?;
    Ok((entropy, checksum))
}

/// Recompute the checksum of `entropy` and compare it with `checksum`.
pub fn verify_checksum(entropy: &Entropy, checksum: &BitString) -> bool {
    let digest = sha256(entropy.as_bytes());
    take_bits(&digest, checksum.len()) == *checksum
}
