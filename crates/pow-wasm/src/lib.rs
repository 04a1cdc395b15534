//! WebAssembly bindings for the zero-prefix nonce search.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Searching cooperatively in batches between event loop turns
//! - Running a blocking search with a progress callback
//! - Verifying claimed solutions
//! - Search statistics and hash rate display

use wasm_bindgen::prelude::*;

pub mod searcher;
pub mod state;

// Re-export main types for JS access
pub use searcher::Searcher;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
