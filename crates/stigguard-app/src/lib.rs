//! Use case orchestration for stigguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, store,
//! settings, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing, output files, and exit codes.

#![forbid(unsafe_code)]

mod config;
mod errors;
mod gate;
mod render;
mod resolve;

pub use config::load_config;
pub use errors::error_code;
pub use gate::{GateInput, GateOutput, decision_exit_code, input_error_report, run_gate};
pub use render::{
    parse_gate_report, render_annotations, render_markdown, serialize_report, to_renderable,
};
pub use resolve::{ResolveInput, ResolveOutput, run_resolve, run_selection};
