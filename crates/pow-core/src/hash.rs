//! Candidate encoding, SHA256 hashing and zero-prefix matching.

use sha2::{Digest, Sha256};

use crate::params::{DIGEST_HEX_LEN, DIGEST_SIZE, MAX_NONCE_DIGITS};

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(data).into()
}

/// Write the ASCII decimal digits of `nonce` into the tail of `buf`.
///
/// Returns the written digits: no sign, no separators, and no leading zeros
/// except for the single digit of `0`.
#[inline]
pub fn write_decimal(nonce: u64, buf: &mut [u8; MAX_NONCE_DIGITS]) -> &[u8] {
    let mut n = nonce;
    let mut pos = MAX_NONCE_DIGITS;
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[pos..]
}

/// The candidate byte sequence `prefix || decimal(nonce)`.
///
/// The search loop never builds this; it exists as the reference encoding.
pub fn candidate_bytes(prefix: &str, nonce: u64) -> Vec<u8> {
    let mut digits = [0u8; MAX_NONCE_DIGITS];
    let digits = write_decimal(nonce, &mut digits);

    let mut candidate = Vec::with_capacity(prefix.len() + digits.len());
    candidate.extend_from_slice(prefix.as_bytes());
    candidate.extend_from_slice(digits);
    candidate
}

/// SHA256 of the candidate for `nonce`.
pub fn candidate_digest(prefix: &str, nonce: u64) -> [u8; DIGEST_SIZE] {
    sha256(&candidate_bytes(prefix, nonce))
}

/// Hashes candidates for one prefix.
///
/// The prefix is absorbed once; each candidate clones that state and only
/// feeds the nonce digits.
#[derive(Clone)]
pub struct CandidateHasher {
    prefixed: Sha256,
}

impl CandidateHasher {
    /// Create a hasher for the given prefix bytes.
    pub fn new(prefix: &[u8]) -> Self {
        let mut prefixed = Sha256::new();
        prefixed.update(prefix);
        CandidateHasher { prefixed }
    }

    /// SHA256 of `prefix || decimal(nonce)`.
    #[inline]
    pub fn digest(&self, nonce: u64) -> [u8; DIGEST_SIZE] {
        let mut digits = [0u8; MAX_NONCE_DIGITS];
        let mut hasher = self.prefixed.clone();
        hasher.update(write_decimal(nonce, &mut digits));
        hasher.finalize().into()
    }
}

/// Count leading zero hex digits of a digest.
///
/// Each byte renders as two hex digits, high nibble first.
pub fn count_leading_zero_nibbles(digest: &[u8; DIGEST_SIZE]) -> u32 {
    let mut zeros = 0u32;
    for byte in digest.iter() {
        if *byte == 0 {
            zeros += 2;
        } else {
            if byte >> 4 == 0 {
                zeros += 1;
            }
            break;
        }
    }
    zeros
}

/// Check whether the first `required_zeros` hex digits of a digest are `'0'`.
///
/// Works on the raw bytes so the hot loop never renders hex.
#[inline]
pub fn meets_required_zeros(digest: &[u8; DIGEST_SIZE], required_zeros: u32) -> bool {
    let required = required_zeros as usize;
    if required > DIGEST_HEX_LEN {
        return false;
    }

    let full_bytes = required / 2;
    if digest[..full_bytes].iter().any(|byte| *byte != 0) {
        return false;
    }

    // Odd counts also need the high nibble of the next byte.
    required % 2 == 0 || digest[full_bytes] >> 4 == 0
}

/// Render a digest as lowercase hex.
pub fn digest_to_hex(digest: &[u8; DIGEST_SIZE]) -> String {
    hex::encode(digest)
}
