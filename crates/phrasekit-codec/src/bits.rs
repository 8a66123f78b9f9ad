//! Big-endian bit strings and fixed-width group packing
//!
//! Checksummed entropy is not byte aligned (132..264 bits), so it is carried
//! as a `BitString`: bytes plus an explicit bit length. Bits are consumed
//! most-significant first.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Width of one word index in bits.
pub const BITS_PER_WORD: u32 = 11;

/// A sequence of bits packed MSB-first into bytes.
///
/// Padding bits past `len` in the final byte are always zero, so two
/// strings with the same bits compare equal. Zeroized on drop.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    /// All bits of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing bytes. The last byte is zero-padded when `len` is not a
    /// multiple of 8.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bit at position `i`, counting from the most significant bit.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {i} out of range for {} bits", self.len);
        (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1
    }

    pub fn push_bit(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.len / 8] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Append the low `width` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u32, width: u32) {
        debug_assert!(width <= 32);
        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn extend(&mut self, other: &BitString) {
        for i in 0..other.len {
            self.push_bit(other.bit(i));
        }
    }

    /// Split into the first `n` bits and the remainder.
    pub fn split_at(&self, n: usize) -> (BitString, BitString) {
        let n = n.min(self.len);
        let head = take_bits(&self.bytes, n);
        let mut tail = BitString::new();
        for i in n..self.len {
            tail.push_bit(self.bit(i));
        }
        (head, tail)
    }
}

impl std::fmt::Debug for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitString")
            .field("len", &self.len)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// The first `n` bits of `bytes` (clamped to the available bits).
pub fn take_bits(bytes: &[u8], n: usize) -> BitString {
    let n = n.min(bytes.len() * 8);
    let mut out = bytes[..n.div_ceil(8)].to_vec();
    if n % 8 != 0 {
        if let Some(last) = out.last_mut() {
            *last &= 0xFF << (8 - n % 8);
        }
    }
    BitString { bytes: out, len: n }
}

/// Cut `bits` into consecutive `width`-bit unsigned integers, left to right.
///
/// The bit length must be a multiple of `width`; checksummed entropy always
/// is for `BITS_PER_WORD`.
pub fn split_into_groups(bits: &BitString, width: u32) -> Vec<u16> {
    assert!((1..=16).contains(&width), "group width must be 1..=16 bits");
    let width = width as usize;
    debug_assert_eq!(bits.len() % width, 0, "bit length not a multiple of group width");

    (0..bits.len() / width)
        .map(|group| {
            (0..width).fold(0u16, |acc, k| (acc << 1) | u16::from(bits.bit(group * width + k)))
        })
        .collect()
}

/// Concatenate the `width`-bit big-endian form of each group, in order.
///
/// Inverse of [`split_into_groups`]. Bits of a group above `width` are
/// ignored.
pub fn pack_groups(groups: &[u16], width: u32) -> BitString {
    assert!((1..=16).contains(&width), "group width must be 1..=16 bits");
    let mut bits = BitString::new();
    for &group in groups {
        bits.push_bits(u32::from(group), width);
    }
    bits
}
