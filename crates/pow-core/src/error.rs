//! Search failure kinds.

use thiserror::Error;

/// Terminal failures of a single search call.
///
/// None of these are retried internally. A caller that wants to try again
/// issues a new call; the engine keeps no state to resume from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The request can never be searched (too many required zeros, a negative
    /// count from a host, or a zero progress interval).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The nonce counter reached `u64::MAX` without a match.
    #[error("search space exhausted after {attempts} attempts")]
    Exhausted { attempts: u64 },

    /// The cancel token was observed at a checkpoint.
    #[error("search cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
}

impl SearchError {
    /// Candidates hashed before the failure, zero for rejected requests.
    pub fn attempts(&self) -> u64 {
        match self {
            SearchError::InvalidRequest(_) => 0,
            SearchError::Exhausted { attempts } | SearchError::Cancelled { attempts } => *attempts,
        }
    }
}

pub type Result<T> = core::result::Result<T, SearchError>;
