//! Simulated domain tools and the tool-call dispatch boundary.
//!
//! Tools implement the `Tool` trait and are registered once at startup
//! in a `ToolRegistry`. `dispatch_tool_call` is the containment
//! boundary for everything a model-issued tool call can get wrong:
//! undecodable arguments, unknown tool names, and executor failures are
//! all folded into the serialized result payload instead of propagating.

mod dispatcher;
mod error;
mod registry;
pub mod tools;

pub use dispatcher::{dispatch_tool_call, ToolExecution};
pub use error::ToolError;
pub use registry::{RegistryError, SharedTool, Tool, ToolRegistry};
pub use tools::{
    builtin_registry, CalculatorTool, FlightSearchTool, VisaRequirementsTool, WeatherTool,
};
