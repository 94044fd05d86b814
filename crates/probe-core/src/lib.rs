//! Shared wire and report types for the capability probes.
//!
//! Everything here is plain data: the chat message shapes exchanged with
//! an Ollama-compatible endpoint, the tool-call structures the model may
//! return, and the per-probe / per-model outcome types the suite
//! accumulates.

pub mod message;
pub mod report;
pub mod tools;

pub use message::{ChatMessage, Role};
pub use report::{ModelReport, ProbeOutcome};
pub use tools::{FunctionCall, FunctionSchema, ToolCall, ToolSchema};
