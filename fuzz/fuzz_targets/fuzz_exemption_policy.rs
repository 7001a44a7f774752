//! Fuzz target for exemption file parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exemption_policy
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = stigguard_store::parse_exemptions(text);
    }
});
