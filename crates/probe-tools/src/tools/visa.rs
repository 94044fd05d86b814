use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Tool, ToolError};

// country, citizenship, requirement
const VISA_RULES: &[(&str, &str, &str)] = &[
    ("France", "US", "Visa-free 90d"),
    ("France", "TR", "Visa required"),
    ("Italy", "US", "Visa-free 90d"),
    ("Italy", "TR", "Visa required"),
    ("Germany", "US", "Visa-free 90d"),
    ("Germany", "TR", "Visa required"),
];

const UNKNOWN_REQUIREMENT: &str = "Unknown, check embassy.";

/// Simulated visa requirement lookup over a small static table.
pub struct VisaRequirementsTool;

#[derive(Debug, Deserialize)]
struct VisaArgs {
    country: String,
    citizenship: String,
}

#[async_trait]
impl Tool for VisaRequirementsTool {
    fn name(&self) -> &str {
        "check_visa_requirements"
    }

    fn description(&self) -> &str {
        "Check visa requirements for a destination country and citizenship."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "country": {"type": "string", "description": "Destination country"},
                "citizenship": {"type": "string", "description": "Traveller's citizenship code"}
            },
            "required": ["country", "citizenship"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: VisaArgs = serde_json::from_value(args)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        let requirement = VISA_RULES
            .iter()
            .find(|(country, citizenship, _)| {
                *country == args.country && *citizenship == args.citizenship
            })
            .map(|(_, _, requirement)| *requirement)
            .unwrap_or(UNKNOWN_REQUIREMENT);

        Ok(json!({
            "country": args.country,
            "citizenship": args.citizenship,
            "requirement": requirement,
        }))
    }
}
