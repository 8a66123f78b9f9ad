//! Primitive crypto: SHA-256, HMAC-SHA512, and single-block PBKDF2
//!
//! PBKDF2 is generic over the pseudorandom function. The PRF's output width
//! doubles as the derived key length, so only the first block (T1) is ever
//! computed.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroize;

type HmacSha512 = Hmac<Sha512>;

/// SHA-256 digest length in bytes.
pub const SHA256_LEN: usize = 32;

/// HMAC-SHA512 output length in bytes.
pub const HMAC_SHA512_LEN: usize = 64;

pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    Sha256::digest(data).into()
}

/// HMAC-SHA512 of `data` keyed with `key`.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; HMAC_SHA512_LEN] {
    let mut mac =
        <HmacSha512 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);

    let mut out = [0u8; HMAC_SHA512_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// PBKDF2 over an arbitrary PRF with an `N`-byte output.
///
/// Computes `U1 = PRF(password, salt || be32(1))`, `Ui = PRF(password, Ui-1)`
/// and returns `U1 ^ U2 ^ ... ^ U_iterations`. Only the running XOR and the
/// previous block are kept, so memory does not grow with `iterations`.
///
/// # Panics
///
/// Panics if `iterations` is zero.
pub fn pbkdf2<const N: usize, F>(prf: F, password: &[u8], salt: &[u8], iterations: u32) -> [u8; N]
where
    F: Fn(&[u8], &[u8]) -> [u8; N],
{
    assert!(iterations >= 1, "PBKDF2 requires at least one iteration");

    let mut first_input = Vec::with_capacity(salt.len() + 4);
    first_input.extend_from_slice(salt);
    first_input.extend_from_slice(&1u32.to_be_bytes());

    let mut block = prf(password, first_input.as_slice());
    first_input.zeroize();

    let mut acc = block;
    for _ in 1..iterations {
        block = prf(password, block.as_slice());
        acc.iter_mut().zip(block.iter()).for_each(|(a, b)| *a ^= b);
    }
    block.zeroize();

    acc
}
