//! Search constants and defaults.

/// Attempts between progress/cancellation checkpoints unless overridden.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Length of a SHA256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Length of a SHA256 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// Longest decimal rendering of a `u64` (`18446744073709551615`).
pub const MAX_NONCE_DIGITS: usize = 20;

/// Nonces a cooperative host tries per batch before yielding.
/// Small enough that a browser tab stays responsive between batches.
pub const DEFAULT_BATCH_SIZE: u32 = 50_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_digits_fit_u64() {
        assert_eq!(u64::MAX.to_string().len(), MAX_NONCE_DIGITS);
        assert_eq!(DIGEST_HEX_LEN, 64);
    }
}
