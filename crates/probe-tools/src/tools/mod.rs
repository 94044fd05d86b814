//! The simulated domain tools the probes advertise to the model.
//!
//! Each tool returns randomized or canned data; only the declared
//! input/output shape matters to the dispatcher and the probes.

mod calculator;
mod flights;
mod visa;
mod weather;

pub use calculator::CalculatorTool;
pub use flights::FlightSearchTool;
pub use visa::VisaRequirementsTool;
pub use weather::WeatherTool;

use crate::{RegistryError, ToolRegistry};

/// Registry preloaded with all four simulated tools.
pub fn builtin_registry() -> Result<ToolRegistry, RegistryError> {
    let registry = ToolRegistry::new();
    registry.register(WeatherTool)?;
    registry.register(CalculatorTool)?;
    registry.register(FlightSearchTool)?;
    registry.register(VisaRequirementsTool)?;
    Ok(registry)
}
