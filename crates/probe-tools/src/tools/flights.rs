use async_trait::async_trait;
use chrono::{Duration, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Tool, ToolError};

const CARRIERS: &[&str] = &["BA", "LH", "TK"];

/// Simulated flight search returning one to three generated itineraries.
pub struct FlightSearchTool;

#[derive(Debug, Deserialize)]
struct FlightSearchArgs {
    from_city: String,
    to_city: String,
    #[serde(default)]
    date: Option<String>,
}

#[async_trait]
impl Tool for FlightSearchTool {
    fn name(&self) -> &str {
        "search_flights"
    }

    fn description(&self) -> &str {
        "Find flights between two cities."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "from_city": {"type": "string", "description": "Departure city"},
                "to_city": {"type": "string", "description": "Arrival city"},
                "date": {
                    "type": "string",
                    "description": "Travel date (YYYY-MM-DD); defaults to tomorrow"
                }
            },
            "required": ["from_city", "to_city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: FlightSearchArgs = serde_json::from_value(args)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        let date = args.date.filter(|date| !date.is_empty()).unwrap_or_else(|| {
            (Local::now() + Duration::days(1))
                .format("%Y-%m-%d")
                .to_string()
        });

        let mut rng = rand::thread_rng();
        let count = rng.gen_range(1..=3);
        let flights: Vec<Value> = (0..count)
            .map(|_| {
                let departure_hour = rng.gen_range(6..=20);
                let duration_hours = rng.gen_range(1..=8);
                let carrier = CARRIERS.choose(&mut rng).copied().unwrap_or("BA");
                let price = (rng.gen_range(150.0..800.0) * 100.0_f64).round() / 100.0;
                json!({
                    "flight_number": format!("{carrier}{}", rng.gen_range(100..=999)),
                    "from": args.from_city,
                    "to": args.to_city,
                    "date": date,
                    "departure_time": format!("{departure_hour:02}:{:02}", rng.gen_range(0..60)),
                    "arrival_time": format!(
                        "{:02}:{:02}",
                        (departure_hour + duration_hours) % 24,
                        rng.gen_range(0..60)
                    ),
                    "duration": format!("{duration_hours}h"),
                    "price": price,
                    "currency": "USD",
                })
            })
            .collect();

        Ok(json!({
            "from": args.from_city,
            "to": args.to_city,
            "date": date,
            "flights": flights,
        }))
    }
}
