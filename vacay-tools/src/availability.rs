//! Availability tools: get_availability and get_availability_summary

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::base::{parse_args, to_tool_output, Result, Tool, ToolError};
use crate::source::{AvailabilityQuery, BookingSource};

pub const NO_AVAILABILITY: &str = "No availability data available.";

#[derive(Debug, Deserialize)]
struct AvailabilityArgs {
    number_of_guests: u32,
    search_start_date: String,
    search_end_date: String,
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    length_of_stay: Option<u32>,
}

/// Search bookable stay windows inside a date range
pub struct AvailabilityTool {
    source: Arc<dyn BookingSource>,
}

impl AvailabilityTool {
    pub fn new(source: Arc<dyn BookingSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for AvailabilityTool {
    fn name(&self) -> &str {
        "get_availability"
    }

    fn description(&self) -> &str {
        "Get available stay windows and tour dates between two dates for a number of guests."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "number_of_guests": {"type": "integer", "minimum": 1, "description": "Number of guests"},
                "search_start_date": {"type": "string", "description": "Start of the search window, YYYY-MM-DD"},
                "search_end_date": {"type": "string", "description": "End of the search window, YYYY-MM-DD"},
                "destination": {"type": "string", "description": "Confirmed destination, if known"},
                "length_of_stay": {"type": "integer", "minimum": 1, "description": "Nights, if known"}
            },
            "required": ["number_of_guests", "search_start_date", "search_end_date"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: AvailabilityArgs = parse_args(args)?;
        if args.number_of_guests == 0 {
            return Err(ToolError::InvalidParams(
                "number_of_guests must be at least 1".to_string(),
            ));
        }
        if args.search_start_date > args.search_end_date {
            return Err(ToolError::InvalidParams(
                "search_start_date is after search_end_date".to_string(),
            ));
        }

        let query = AvailabilityQuery {
            number_of_guests: args.number_of_guests,
            search_start_date: args.search_start_date,
            search_end_date: args.search_end_date,
            destination: args.destination,
            length_of_stay: args.length_of_stay,
        };
        match self.source.availability(&query).await? {
            Some(availability) => to_tool_output(&availability),
            None => Ok(NO_AVAILABILITY.to_string()),
        }
    }
}

/// All bookable stay windows with their tour dates and times
pub struct AvailabilitySummaryTool {
    source: Arc<dyn BookingSource>,
}

impl AvailabilitySummaryTool {
    pub fn new(source: Arc<dyn BookingSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for AvailabilitySummaryTool {
    fn name(&self) -> &str {
        "get_availability_summary"
    }

    fn description(&self) -> &str {
        "Get the availability summary: every stay window with its tour dates and times."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        match self.source.availability_summary().await? {
            Some(availability) => to_tool_output(&availability),
            None => Ok(NO_AVAILABILITY.to_string()),
        }
    }
}
