//! Pure benchmark resolution and gate evaluation (no IO).
//!
//! Input: a target descriptor plus a catalog snapshot, or a findings list plus an
//! exemption policy. Output: a pinned selection or a gate decision. Persisting the
//! selection and reading the artifacts is the caller's job.

#![forbid(unsafe_code)]

pub mod error;
pub mod fingerprint;
pub mod gate;
pub mod policy;
pub mod resolver;
pub mod strategies;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use error::ResolveError;
pub use gate::evaluate;
pub use resolver::{resolve, Resolution};
