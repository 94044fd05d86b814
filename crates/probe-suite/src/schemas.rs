//! Output schemas the probes ask the server to constrain answers to.
//!
//! These are opaque contracts handed to the transport; the probes only
//! ever check that the final content is syntactically valid JSON, never
//! that it structurally conforms to these documents.

use serde_json::{json, Value};

/// Small user profile, used by the schema-only probe.
pub fn user_info_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "integer"},
            "is_active": {"type": "boolean", "default": true},
            "hobbies": {
                "type": ["array", "null"],
                "items": {"type": "string"}
            }
        },
        "required": ["name", "age"]
    })
}

/// Travel recommendation, used as the combined probe's final answer
/// shape.
pub fn travel_recommendation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "destination": {"type": "string"},
            "budget": {"type": "number"},
            "duration_days": {"type": "integer"},
            "activities": {
                "type": "array",
                "items": {"type": "string"}
            },
            "best_season": {"type": "string"}
        },
        "required": ["destination", "budget", "duration_days", "activities", "best_season"]
    })
}
