//! Capability probes against an Ollama-compatible chat endpoint.
//!
//! Four independent probes per model: plain generation, tool
//! invocation, schema-constrained output, and a two-phase combination
//! of the latter two (gather data via tools, then synthesize a
//! schema-conforming answer). Probes never abort the suite; every model
//! run yields a full `ModelReport`.

mod aggregator;
mod prober;
pub mod schemas;

pub use aggregator::ResultAggregator;
pub use prober::CapabilityProber;

pub use probe_core::{ModelReport, ProbeOutcome};
