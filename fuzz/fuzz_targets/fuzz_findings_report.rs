//! Fuzz target for scan report parsing.
//!
//! Goal: a truncated or hostile report must surface as an error, never a panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_findings_report
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = stigguard_store::parse_findings(text);
    }
});
