//! The nonce search engine.

use crate::cancel::CancelToken;
use crate::difficulty::validate_required_zeros;
use crate::error::{Result, SearchError};
use crate::hash::{candidate_digest, digest_to_hex, meets_required_zeros, CandidateHasher};
use crate::params::{DEFAULT_PROGRESS_INTERVAL, DIGEST_SIZE};

/// What to search for: a prefix and the number of leading zero hex digits
/// its candidate digests must start with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    prefix: String,
    required_zeros: u32,
}

impl SearchRequest {
    /// Create a request, rejecting zero counts longer than a digest.
    pub fn new(prefix: impl Into<String>, required_zeros: u32) -> Result<Self> {
        validate_required_zeros(required_zeros)?;
        Ok(SearchRequest {
            prefix: prefix.into(),
            required_zeros,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn required_zeros(&self) -> u32 {
        self.required_zeros
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The smallest matching nonce at or after the start nonce.
    pub nonce: u64,
    /// Lowercase hex SHA256 of `prefix || decimal(nonce)`.
    pub digest_hex: String,
    /// Candidates hashed, including the winning one.
    pub attempts: u64,
}

impl SearchResult {
    /// Leading zero hex digits of the winning digest.
    pub fn leading_zeros(&self) -> u32 {
        self.digest_hex.bytes().take_while(|c| *c == b'0').count() as u32
    }

    fn from_digest(nonce: u64, digest: &[u8; DIGEST_SIZE], attempts: u64) -> Self {
        SearchResult {
            nonce,
            digest_hex: digest_to_hex(digest),
            attempts,
        }
    }
}

/// Emitted every `progress_interval` attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Candidates hashed so far in this call.
    pub attempts: u64,
}

/// Tunables for a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Attempts between progress/cancellation checkpoints. Must be positive.
    pub progress_interval: u64,
    /// First nonce to try.
    pub start_nonce: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            start_nonce: 0,
        }
    }
}

impl SearchOptions {
    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    pub fn starting_at(mut self, start_nonce: u64) -> Self {
        self.start_nonce = start_nonce;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.progress_interval == 0 {
            return Err(SearchError::InvalidRequest(
                "progress interval must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Search from nonce 0 with default options and no progress reporting.
pub fn search(request: &SearchRequest, cancel: &CancelToken) -> Result<SearchResult> {
    search_with_progress(request, &SearchOptions::default(), cancel, |_| {})
}

/// Search for the smallest nonce at or after `options.start_nonce` whose
/// candidate digest starts with `request.required_zeros()` zero hex digits.
///
/// Every `options.progress_interval` attempts (and once before the first
/// candidate) the loop reaches a checkpoint: `on_progress` is called when at
/// least one candidate has been hashed, then `cancel` is polled. A cancelled
/// token ends the call with [`SearchError::Cancelled`].
///
/// # Errors
/// * [`SearchError::InvalidRequest`] - zero progress interval
/// * [`SearchError::Cancelled`] - `cancel` was observed at a checkpoint
/// * [`SearchError::Exhausted`] - `u64::MAX` was tested without a match
pub fn search_with_progress<F>(
    request: &SearchRequest,
    options: &SearchOptions,
    cancel: &CancelToken,
    mut on_progress: F,
) -> Result<SearchResult>
where
    F: FnMut(ProgressEvent),
{
    options.validate()?;

    let hasher = CandidateHasher::new(request.prefix().as_bytes());
    let required_zeros = request.required_zeros();
    let interval = options.progress_interval;

    let mut nonce = options.start_nonce;
    let mut attempts: u64 = 0;

    loop {
        if attempts % interval == 0 {
            if attempts > 0 {
                on_progress(ProgressEvent { attempts });
            }
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled { attempts });
            }
        }

        let digest = hasher.digest(nonce);
        if meets_required_zeros(&digest, required_zeros) {
            return Ok(SearchResult::from_digest(nonce, &digest, attempts + 1));
        }

        // Never wrap back to nonce 0.
        nonce = nonce.checked_add(1).ok_or(SearchError::Exhausted {
            attempts: attempts + 1,
        })?;
        attempts += 1;
    }
}

/// Outcome of a bounded batch of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The first match in the batch, if any. Its `attempts` counts this
    /// batch only.
    pub result: Option<SearchResult>,
    /// Candidates hashed in this batch.
    pub hashes_computed: u64,
    /// Where the next batch should start. Equals the winning nonce when a
    /// match was found.
    pub next_nonce: u64,
}

impl BatchOutcome {
    fn found(result: SearchResult) -> Self {
        BatchOutcome {
            hashes_computed: result.attempts,
            next_nonce: result.nonce,
            result: Some(result),
        }
    }

    fn not_found(hashes: u64, next_nonce: u64) -> Self {
        BatchOutcome {
            result: None,
            hashes_computed: hashes,
            next_nonce,
        }
    }

    pub fn is_found(&self) -> bool {
        self.result.is_some()
    }
}

/// Try at most `nonce_count` candidates starting at `nonce_start`.
///
/// Hosts that must yield regularly (a browser event loop) call this
/// repeatedly, feeding `next_nonce` back in. Stitching batches together from
/// nonce 0 finds the same nonce as [`search`].
///
/// # Errors
/// [`SearchError::Exhausted`] when `u64::MAX` was tested without a match.
pub fn search_batch(
    request: &SearchRequest,
    nonce_start: u64,
    nonce_count: u32,
) -> Result<BatchOutcome> {
    let hasher = CandidateHasher::new(request.prefix().as_bytes());
    let required_zeros = request.required_zeros();

    let mut nonce = nonce_start;
    let mut hashes: u64 = 0;

    while hashes < u64::from(nonce_count) {
        let digest = hasher.digest(nonce);
        hashes += 1;

        if meets_required_zeros(&digest, required_zeros) {
            return Ok(BatchOutcome::found(SearchResult::from_digest(
                nonce, &digest, hashes,
            )));
        }

        nonce = nonce
            .checked_add(1)
            .ok_or(SearchError::Exhausted { attempts: hashes })?;
    }

    Ok(BatchOutcome::not_found(hashes, nonce))
}

/// Check a claimed solution by recomputing its digest.
pub fn verify(prefix: &str, required_zeros: u32, nonce: u64) -> bool {
    meets_required_zeros(&candidate_digest(prefix, nonce), required_zeros)
}
