//! Search controller for the WASM host.

use wasm_bindgen::prelude::*;
use pow_core::{
    difficulty::required_zeros_from_signed,
    params::DEFAULT_BATCH_SIZE,
    search_batch, search_with_progress, CancelToken, SearchError, SearchRequest, SearchResult,
};
use crate::state::{BatchResultInfo, FoundInfo, SearchConfig, SearchInfo, SearchStats};

fn to_js_error(err: SearchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn build_request(prefix: &str, required_zeros: i32) -> Result<SearchRequest, JsValue> {
    let zeros = required_zeros_from_signed(i64::from(required_zeros)).map_err(to_js_error)?;
    SearchRequest::new(prefix, zeros).map_err(to_js_error)
}

/// Drives a search in batches so the JS event loop can run in between.
#[wasm_bindgen]
pub struct Searcher {
    /// What is being searched for.
    request: SearchRequest,
    /// First nonce of the search.
    start_nonce: u64,
    /// Next nonce to try.
    next_nonce: u64,
    /// Search statistics.
    stats: SearchStats,
    /// Start time of searching.
    start_time: f64,
    /// Whether searching is active.
    is_searching: bool,
    /// Set by `stop`, checked before every batch.
    cancel: CancelToken,
    /// The match, once found.
    result: Option<SearchResult>,
    /// Set once `u64::MAX` has been tried.
    exhausted: bool,
}

#[wasm_bindgen]
impl Searcher {
    /// Create a new searcher.
    ///
    /// # Arguments
    /// * `prefix` - The candidate prefix
    /// * `required_zeros` - Leading zero hex digits the digest must start with (0-64)
    #[wasm_bindgen(constructor)]
    pub fn new(prefix: &str, required_zeros: i32) -> Result<Searcher, JsValue> {
        Ok(Searcher::from_parts(build_request(prefix, required_zeros)?, 0))
    }

    /// Create a searcher with a config object (`{ startNonce }`).
    #[wasm_bindgen]
    pub fn with_config(
        prefix: &str,
        required_zeros: i32,
        config: JsValue,
    ) -> Result<Searcher, JsValue> {
        let request = build_request(prefix, required_zeros)?;
        let options = SearchConfig::from_js(&config)?.to_options();
        Ok(Searcher::from_parts(request, options.start_nonce))
    }

    /// Search the next batch of nonces.
    ///
    /// # Arguments
    /// * `batch_size` - Number of nonces to try in this batch (0 uses the default)
    ///
    /// # Returns
    /// Batch result with found/cancelled status and hash count.
    #[wasm_bindgen]
    pub fn search_batch(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        if self.result.is_some() {
            return Err(JsValue::from_str("Search already finished"));
        }
        if self.exhausted {
            return Err(JsValue::from_str("Search space exhausted"));
        }
        if self.cancel.is_cancelled() {
            self.is_searching = false;
            return BatchResultInfo::cancelled().to_js();
        }

        let batch_size = if batch_size == 0 { DEFAULT_BATCH_SIZE } else { batch_size };

        let outcome = match search_batch(&self.request, self.next_nonce, batch_size) {
            Ok(outcome) => outcome,
            Err(SearchError::Exhausted { attempts }) => {
                self.stats.total_hashes += attempts;
                self.exhausted = true;
                self.is_searching = false;
                self.update_elapsed();
                console_log(&format!(
                    "Search space exhausted after {} hashes",
                    self.stats.total_hashes
                ));
                return Err(to_js_error(SearchError::Exhausted {
                    attempts: self.stats.total_hashes,
                }));
            }
            Err(e) => return Err(to_js_error(e)),
        };

        // Update statistics
        self.stats.total_hashes += outcome.hashes_computed;
        self.next_nonce = outcome.next_nonce;
        self.stats.next_nonce = self.next_nonce;
        self.update_elapsed();

        let mut info = BatchResultInfo {
            hashes_computed: outcome.hashes_computed,
            ..BatchResultInfo::default()
        };

        if let Some(mut result) = outcome.result {
            // Report attempts across all batches, not just the last one.
            result.attempts = result.nonce - self.start_nonce + 1;

            info.found = true;
            info.nonce = Some(result.nonce);
            info.hash = Some(result.digest_hex.clone());
            info.leading_zeros = result.leading_zeros();

            self.stats.found = true;
            self.stats.hash = Some(result.digest_hex.clone());
            self.is_searching = false;

            console_log(&format!(
                "Found nonce {} ({}) after {} hashes",
                result.nonce, result.digest_hex, self.stats.total_hashes
            ));
            self.result = Some(result);
        }

        info.to_js()
    }

    /// Start (or resume) searching.
    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.cancel.reset();
        self.is_searching = true;
        if self.start_time == 0.0 {
            self.start_time = js_sys::Date::now();
        }
        console_log(&format!(
            "Searching for {} leading zeros with prefix {:?} from nonce {}",
            self.request.required_zeros(),
            self.request.prefix(),
            self.next_nonce
        ));
    }

    /// Stop searching. The next batch reports `cancelled` without hashing.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if self.is_searching {
            console_log(&format!(
                "Search stopped at nonce {} after {} hashes",
                self.next_nonce, self.stats.total_hashes
            ));
        }
        self.is_searching = false;
    }

    /// Check if searching is active.
    #[wasm_bindgen(getter)]
    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Get current search statistics.
    #[wasm_bindgen]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        self.stats.to_js()
    }

    /// Get the formatted hash rate.
    #[wasm_bindgen]
    pub fn get_hash_rate_display(&self) -> String {
        self.stats.format_hash_rate()
    }

    /// Get the search parameters and expected work.
    #[wasm_bindgen]
    pub fn get_info(&self) -> Result<JsValue, JsValue> {
        SearchInfo::new(&self.request, self.start_nonce).to_js()
    }

    /// Get the found solution, or `null` while still searching.
    #[wasm_bindgen]
    pub fn result(&self) -> Result<JsValue, JsValue> {
        match &self.result {
            Some(result) => FoundInfo::from(result).to_js(),
            None => Ok(JsValue::NULL),
        }
    }

    /// Reset to the start nonce, clearing stats and any stop request.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.cancel.reset();
        self.stats = SearchStats::new();
        self.next_nonce = self.start_nonce;
        self.stats.next_nonce = self.start_nonce;
        self.start_time = 0.0;
        self.is_searching = false;
        self.result = None;
        self.exhausted = false;
    }

    /// Get the candidate prefix.
    #[wasm_bindgen(getter)]
    pub fn prefix(&self) -> String {
        self.request.prefix().to_string()
    }

    /// Get the required number of leading zeros.
    #[wasm_bindgen(getter)]
    pub fn required_zeros(&self) -> u32 {
        self.request.required_zeros()
    }
}

impl Searcher {
    fn from_parts(request: SearchRequest, start_nonce: u64) -> Self {
        let mut stats = SearchStats::new();
        stats.next_nonce = start_nonce;
        Searcher {
            request,
            start_nonce,
            next_nonce: start_nonce,
            stats,
            start_time: 0.0,
            is_searching: false,
            cancel: CancelToken::new(),
            result: None,
            exhausted: false,
        }
    }

    fn update_elapsed(&mut self) {
        if self.start_time > 0.0 {
            self.stats.elapsed_ms = js_sys::Date::now() - self.start_time;
            self.stats.update_hash_rate();
        }
    }
}

/// Run a whole search synchronously.
///
/// Blocks the calling JS thread until a match is found, so it belongs in a
/// Web Worker. `on_progress` is called with the attempt count at every
/// checkpoint; exceptions it throws are ignored.
///
/// # Arguments
/// * `prefix` - The candidate prefix
/// * `required_zeros` - Leading zero hex digits the digest must start with (0-64)
/// * `config` - Optional `{ progressIntervalAttempts, startNonce }`
/// * `on_progress` - Optional progress callback
#[wasm_bindgen]
pub fn search_blocking(
    prefix: &str,
    required_zeros: i32,
    config: JsValue,
    on_progress: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    let request = build_request(prefix, required_zeros)?;
    let options = SearchConfig::from_js(&config)?.to_options();

    // Nothing can signal this token while the JS thread is blocked here.
    let cancel = CancelToken::new();

    let result = search_with_progress(&request, &options, &cancel, |event| {
        if let Some(callback) = &on_progress {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_f64(event.attempts as f64));
        }
    })
    .map_err(to_js_error)?;

    FoundInfo::from(&result).to_js()
}

/// Check whether `nonce` satisfies the request.
#[wasm_bindgen]
pub fn verify_nonce(prefix: &str, required_zeros: i32, nonce: u64) -> Result<bool, JsValue> {
    let request = build_request(prefix, required_zeros)?;
    Ok(pow_core::verify(request.prefix(), request.required_zeros(), nonce))
}

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
