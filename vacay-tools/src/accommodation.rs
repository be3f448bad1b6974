//! get_accommodation_details tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::base::{parse_args, to_tool_output, Result, Tool};
use crate::models::AccommodationResponse;
use crate::source::{AccommodationQuery, BookingSource};

#[derive(Debug, Deserialize)]
struct AccommodationArgs {
    checkin_date: String,
    length_of_stay: u32,
    #[serde(default)]
    number_of_guests: Option<u32>,
    #[serde(default)]
    destination: Option<String>,
}

/// Properties and room types for a check-in date and stay length
pub struct AccommodationTool {
    source: Arc<dyn BookingSource>,
}

impl AccommodationTool {
    pub fn new(source: Arc<dyn BookingSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for AccommodationTool {
    fn name(&self) -> &str {
        "get_accommodation_details"
    }

    fn description(&self) -> &str {
        "Get accommodation details for a specific check-in date and length of stay."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "checkin_date": {"type": "string", "description": "Check-in date, YYYY-MM-DD"},
                "length_of_stay": {"type": "integer", "minimum": 1, "description": "Length of stay in nights"},
                "number_of_guests": {"type": "integer", "minimum": 1, "description": "Number of guests, if known"},
                "destination": {"type": "string", "description": "Confirmed destination, if known"}
            },
            "required": ["checkin_date", "length_of_stay"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: AccommodationArgs = parse_args(args)?;
        let query = AccommodationQuery {
            checkin_date: args.checkin_date,
            length_of_stay: args.length_of_stay,
            number_of_guests: args.number_of_guests,
            destination: args.destination,
        };

        let accommodations = self.source.accommodations(&query).await?;
        info!("Returning {} accommodation options", accommodations.len());
        to_tool_output(&AccommodationResponse { accommodations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_source;

    #[tokio::test]
    async fn test_matching_accommodations() {
        let (_dir, source) = sample_source();
        let output = AccommodationTool::new(source)
            .execute(json!({"checkin_date": "2026-03-10", "length_of_stay": 2}))
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        let names: Vec<&str> = value["accommodations"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|a| a["AccommodationName"].as_str())
            .collect();
        assert_eq!(names, vec!["Westgate Vacation Villas", "Westgate Lakes Resort"]);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_list() {
        let (_dir, source) = sample_source();
        let output = AccommodationTool::new(source)
            .execute(json!({"checkin_date": "2026-07-04", "length_of_stay": 3}))
            .await
            .unwrap();
        assert_eq!(output, r#"{"accommodations":[]}"#);
    }
}
