//! Zero-prefix proof-of-work search.
//!
//! This crate provides pure Rust implementations of:
//! - Candidate encoding (`prefix || decimal(nonce)`) and SHA256 hashing
//! - Leading zero hex digit matching
//! - The sequential nonce search loop with progress and cancellation checkpoints
//! - Resumable batch searching for cooperative hosts

pub mod cancel;
pub mod difficulty;
pub mod error;
pub mod hash;
pub mod params;
pub mod search;

pub use cancel::CancelToken;
pub use difficulty::{expected_attempts, validate_required_zeros, MAX_REQUIRED_ZEROS};
pub use error::{Result, SearchError};
pub use hash::{candidate_digest, count_leading_zero_nibbles, meets_required_zeros, CandidateHasher};
pub use search::{
    search, search_batch, search_with_progress, verify, BatchOutcome, ProgressEvent,
    SearchOptions, SearchRequest, SearchResult,
};
