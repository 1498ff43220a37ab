//! Deterministic short codes for generated DNS labels.

use sha2::{Digest, Sha224};

/// Length of the cluster and gateway codes in generated names.
pub const SHORT_CODE_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// First `len` characters of the base36 SHA-224 digest of `input`.
pub fn short_code(input: &str, len: usize) -> String {
    let digest = Sha224::digest(input.as_bytes());
    base36(&digest).chars().take(len).collect()
}

/// Big-endian base36 rendering; each leading zero byte becomes one `0`.
fn base36(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|b| **b == 0).count();
    let mut number = bytes[leading_zeros..].to_vec();
    let mut digits = Vec::with_capacity(bytes.len() * 2);

    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());
        for &byte in &number {
            let acc = (remainder << 8) | u32::from(byte);
            let q = acc / 36;
            remainder = acc % 36;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }
        digits.push(ALPHABET[remainder as usize]);
        number = quotient;
    }
    digits.extend(std::iter::repeat_n(b'0', leading_zeros));

    digits.iter().rev().map(|&d| char::from(d)).collect()
}
