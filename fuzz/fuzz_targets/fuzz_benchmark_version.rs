//! Fuzz target for benchmark version ordering.
//!
//! `BenchmarkVersion` ordering must stay total for arbitrary catalog strings.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::cmp::Ordering;
use stigguard_types::BenchmarkVersion;

fuzz_target!(|input: (&str, &str)| {
    let a = BenchmarkVersion::parse(input.0);
    let b = BenchmarkVersion::parse(input.1);
    assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    assert_eq!(a.cmp(&a), Ordering::Equal);
});
