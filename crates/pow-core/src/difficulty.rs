//! Required-zeros validation and work estimates.

use crate::error::{Result, SearchError};
use crate::params::DIGEST_HEX_LEN;

/// Most leading zero hex digits a SHA256 digest can have.
pub const MAX_REQUIRED_ZEROS: u32 = DIGEST_HEX_LEN as u32;

/// Reject zero counts that no digest can satisfy.
pub fn validate_required_zeros(required_zeros: u32) -> Result<()> {
    if required_zeros > MAX_REQUIRED_ZEROS {
        return Err(SearchError::InvalidRequest(format!(
            "required zeros {} exceeds digest length {}",
            required_zeros, MAX_REQUIRED_ZEROS
        )));
    }
    Ok(())
}

/// Convert a signed count (as handed over by hosts such as JS) to `u32`.
pub fn required_zeros_from_signed(required_zeros: i64) -> Result<u32> {
    let zeros = u32::try_from(required_zeros).map_err(|_| {
        SearchError::InvalidRequest(format!(
            "required zeros must be between 0 and {}, got {}",
            MAX_REQUIRED_ZEROS, required_zeros
        ))
    })?;
    validate_required_zeros(zeros)?;
    Ok(zeros)
}

/// Average candidates needed to find a match.
///
/// Each leading hex digit is zero with probability 1/16.
pub fn expected_attempts(required_zeros: u32) -> f64 {
    16f64.powi(required_zeros as i32)
}

/// Format an attempt count for display (e.g., "1.05M").
pub fn format_attempts(attempts: f64) -> String {
    if attempts >= 1e15 {
        format!("{:.2}P", attempts / 1e15)
    } else if attempts >= 1e12 {
        format!("{:.2}T", attempts / 1e12)
    } else if attempts >= 1e9 {
        format!("{:.2}G", attempts / 1e9)
    } else if attempts >= 1e6 {
        format!("{:.2}M", attempts / 1e6)
    } else if attempts >= 1e3 {
        format!("{:.2}K", attempts / 1e3)
    } else {
        format!("{:.0}", attempts)
    }
}
