use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Tool, ToolError};

const CONDITIONS: &[&str] = &["Sunny", "Cloudy", "Rainy", "Snowy", "Windy"];

/// Simulated weather lookup returning randomized readings.
pub struct WeatherTool;

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    city: String,
    #[serde(default = "default_units")]
    units: String,
}

fn default_units() -> String {
    "metric".to_string()
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a city."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {"type": "string", "description": "City name"},
                "units": {
                    "type": "string",
                    "enum": ["metric", "imperial"],
                    "default": "metric"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: WeatherArgs = serde_json::from_value(args)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        let mut rng = rand::thread_rng();
        let temperature = rng.gen_range(-10..=35);
        let conditions = CONDITIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or("Sunny");
        let unit = if args.units == "metric" { "°C" } else { "°F" };

        Ok(json!({
            "city": args.city,
            "temperature": temperature,
            "unit": unit,
            "conditions": conditions,
            "humidity": rng.gen_range(30..=90),
            "wind_speed": rng.gen_range(0..=30),
        }))
    }
}
