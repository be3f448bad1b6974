//! record_booking_selection tool

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::base::{parse_args, Result, Tool, ToolError};

/// The user's final choices, as passed to `record_booking_selection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
}

impl BookingSelection {
    pub fn from_args(args: Value) -> Result<Self> {
        let selection: Self = parse_args(args)?;
        if selection.is_empty() {
            return Err(ToolError::InvalidParams(
                "at least one of tour_date, tour_time, accommodation, room_type is required"
                    .to_string(),
            ));
        }
        Ok(selection)
    }

    pub fn is_empty(&self) -> bool {
        self.tour_date.is_none()
            && self.tour_time.is_none()
            && self.accommodation.is_none()
            && self.room_type.is_none()
    }

    fn describe(&self) -> String {
        [
            ("tour date", &self.tour_date),
            ("tour time", &self.tour_time),
            ("accommodation", &self.accommodation),
            ("room type", &self.room_type),
        ]
        .iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{} {}", label, v)))
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Acknowledge the user's choices; the agent keeps them in its booking state
pub struct RecordSelectionTool;

#[async_trait]
impl Tool for RecordSelectionTool {
    fn name(&self) -> &str {
        "record_booking_selection"
    }

    fn description(&self) -> &str {
        "Record the tour date and time, accommodation and room type the user has confirmed."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "tour_date": {"type": "string", "description": "Confirmed tour date, YYYY-MM-DD"},
                "tour_time": {"type": "string", "description": "Confirmed tour time"},
                "accommodation": {"type": "string", "description": "Selected accommodation name"},
                "room_type": {"type": "string", "description": "Selected room type"}
            },
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let selection = BookingSelection::from_args(args)?;
        Ok(format!("Recorded selection: {}.", selection.describe()))
    }
}
