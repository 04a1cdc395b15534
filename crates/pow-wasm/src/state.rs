//! Serializable state exchanged with JavaScript.

use pow_core::{
    difficulty::{expected_attempts, format_attempts},
    SearchOptions, SearchRequest, SearchResult,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Search configuration passed in from JS. Missing fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Attempts between progress callbacks.
    pub progress_interval_attempts: Option<u64>,
    /// First nonce to try.
    pub start_nonce: Option<u64>,
}

impl SearchConfig {
    /// Parse from a JS value; `undefined` and `null` give the defaults.
    pub fn from_js(value: &JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value.clone())
            .map_err(|e| JsValue::from_str(&format!("Invalid search config: {:?}", e)))
    }

    /// Apply over the engine defaults.
    pub fn to_options(&self) -> SearchOptions {
        let mut options = SearchOptions::default();
        if let Some(interval) = self.progress_interval_attempts {
            options = options.with_progress_interval(interval);
        }
        if let Some(start) = self.start_nonce {
            options = options.starting_at(start);
        }
        options
    }
}

/// Search statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total hashes computed.
    pub total_hashes: u64,
    /// Current hash rate (hashes per second).
    pub hash_rate: f64,
    /// Next nonce to be tried.
    pub next_nonce: u64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: f64,
    /// Whether a matching nonce was found.
    pub found: bool,
    /// Winning digest (lowercase hex).
    pub hash: Option<String>,
}

impl SearchStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update hash rate based on elapsed time.
    pub fn update_hash_rate(&mut self) {
        if self.elapsed_ms > 0.0 {
            self.hash_rate = (self.total_hashes as f64) / (self.elapsed_ms / 1000.0);
        }
    }

    /// Format hash rate for display.
    pub fn format_hash_rate(&self) -> String {
        if self.hash_rate >= 1_000_000_000.0 {
            format!("{:.2} GH/s", self.hash_rate / 1_000_000_000.0)
        } else if self.hash_rate >= 1_000_000.0 {
            format!("{:.2} MH/s", self.hash_rate / 1_000_000.0)
        } else if self.hash_rate >= 1_000.0 {
            format!("{:.2} KH/s", self.hash_rate / 1_000.0)
        } else {
            format!("{:.2} H/s", self.hash_rate)
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

/// Search parameters for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInfo {
    /// Candidate prefix.
    pub prefix: String,
    /// Leading zero hex digits required.
    pub required_zeros: u32,
    /// First nonce tried.
    pub start_nonce: u64,
    /// Average attempts needed.
    pub expected_attempts: f64,
    /// Formatted expected attempts.
    pub expected_attempts_display: String,
}

impl SearchInfo {
    pub fn new(request: &SearchRequest, start_nonce: u64) -> Self {
        let expected = expected_attempts(request.required_zeros());
        SearchInfo {
            prefix: request.prefix().to_string(),
            required_zeros: request.required_zeros(),
            start_nonce,
            expected_attempts: expected,
            expected_attempts_display: format_attempts(expected),
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

/// A found solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundInfo {
    /// The winning nonce.
    pub nonce: u64,
    /// Its digest (lowercase hex).
    pub hash: String,
    /// Number of leading zero hex digits in the digest.
    pub leading_zeros: u32,
    /// Candidates hashed to find it.
    pub attempts: u64,
}

impl FoundInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

impl From<&SearchResult> for FoundInfo {
    fn from(result: &SearchResult) -> Self {
        FoundInfo {
            nonce: result.nonce,
            hash: result.digest_hex.clone(),
            leading_zeros: result.leading_zeros(),
            attempts: result.attempts,
        }
    }
}

/// Result of one batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResultInfo {
    /// Whether a matching nonce was found.
    pub found: bool,
    /// Whether the search was stopped before hashing this batch.
    pub cancelled: bool,
    /// The winning nonce (if found).
    pub nonce: Option<u64>,
    /// The winning digest (if found).
    pub hash: Option<String>,
    /// Number of leading zero hex digits in the winning digest.
    pub leading_zeros: u32,
    /// Hashes computed in this batch.
    pub hashes_computed: u64,
}

impl BatchResultInfo {
    pub fn cancelled() -> Self {
        BatchResultInfo {
            cancelled: true,
            ..Self::default()
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}
