//! Browser-side tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use pow_wasm::searcher::{search_blocking, verify_nonce, Searcher};
use pow_wasm::state::{BatchResultInfo, FoundInfo, SearchStats};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn batch(searcher: &mut Searcher, size: u32) -> BatchResultInfo {
    serde_wasm_bindgen::from_value(searcher.search_batch(size).unwrap()).unwrap()
}

#[wasm_bindgen_test]
fn batches_find_reference_nonce() {
    let mut searcher = Searcher::new("abc", 1).unwrap();
    searcher.start();

    let mut batches = 0;
    let info = loop {
        let info = batch(&mut searcher, 10);
        batches += 1;
        if info.found {
            break info;
        }
    };

    assert_eq!(batches, 3);
    assert_eq!(info.nonce, Some(26));
    assert_eq!(
        info.hash.as_deref(),
        Some("0d56d5ce616422904a584cf3735a45ae611817d96c4717b17369ef6778025848")
    );
    assert!(!searcher.is_searching());

    let found: FoundInfo = serde_wasm_bindgen::from_value(searcher.result().unwrap()).unwrap();
    assert_eq!(found.nonce, 26);
    assert_eq!(found.attempts, 27);

    let stats: SearchStats = serde_wasm_bindgen::from_value(searcher.get_stats().unwrap()).unwrap();
    assert_eq!(stats.total_hashes, 27);
    assert!(stats.found);

    assert!(searcher.search_batch(10).is_err(), "finished searches stay finished");
}

#[wasm_bindgen_test]
fn stop_cancels_next_batch() {
    let mut searcher = Searcher::new("abc", 64).unwrap();
    searcher.start();
    batch(&mut searcher, 100);

    searcher.stop();
    let info = batch(&mut searcher, 100);
    assert!(info.cancelled);
    assert_eq!(info.hashes_computed, 0);

    // Resuming continues where the search stopped
    searcher.start();
    let info = batch(&mut searcher, 100);
    assert!(!info.cancelled);
    let stats: SearchStats = serde_wasm_bindgen::from_value(searcher.get_stats().unwrap()).unwrap();
    assert_eq!(stats.next_nonce, 200);
}

#[wasm_bindgen_test]
fn invalid_zero_counts_are_rejected() {
    assert!(Searcher::new("abc", 65).is_err());
    assert!(Searcher::new("abc", -1).is_err());
}

#[wasm_bindgen_test]
fn blocking_search_reports_progress() {
    let progress = js_sys::Array::new();
    let push = js_sys::Function::new_with_args("n", "this.push(n)");
    let callback = push.bind(&progress);

    let config = js_sys::JSON::parse(r#"{"progressIntervalAttempts": 100}"#).unwrap();
    let found = search_blocking("abc", 3, config, Some(callback)).unwrap();
    let found: FoundInfo = serde_wasm_bindgen::from_value(found).unwrap();

    assert_eq!(found.nonce, 1322);
    assert_eq!(progress.length(), 13);
    assert_eq!(progress.get(0), JsValue::from_f64(100.0));
}

#[wasm_bindgen_test]
fn verify_nonce_checks_digest() {
    assert!(verify_nonce("abc", 1, 26).unwrap());
    assert!(!verify_nonce("abc", 1, 25).unwrap());
    assert!(verify_nonce("abc", 65, 26).is_err());
}
