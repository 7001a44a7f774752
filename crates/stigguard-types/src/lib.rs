//! Stable DTOs and IDs used across the stigguard workspace.
//!
//! This crate is intentionally boring:
//! - the run's target descriptor and the catalog entries it is matched against
//! - the pinned selection record persisted between pipeline phases
//! - scan findings, exemption policy, and the gate decision
//! - stable string IDs for error kinds and schemas

#![forbid(unsafe_code)]

pub mod catalog;
pub mod date;
pub mod decision;
pub mod exemption;
pub mod finding;
pub mod ids;
pub mod selection;
pub mod target;
pub mod version;

pub use catalog::{BenchmarkDescriptor, ReleaseType};
pub use date::{format_iso_date, parse_iso_date};
pub use decision::{
    AppliedExemption, GateDecision, GateMode, GateReport, ToolMeta, SCHEMA_GATE_REPORT_V1,
};
pub use exemption::{ExemptionEntry, ExemptionPolicy};
pub use finding::{Finding, FindingStatus, SeverityCategory};
pub use selection::{BenchmarkSelection, MatchStrategy, SCHEMA_SELECTION_V1};
pub use target::TargetDescriptor;
pub use version::BenchmarkVersion;
