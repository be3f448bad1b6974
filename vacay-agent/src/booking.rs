//! Booking fields collected over a conversation

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use vacay_tools::{zip_code_accepted, BookingSelection};

/// What the user has told us (and the tools have confirmed) so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingState {
    pub destination: Option<String>,
    pub zip_code: Option<String>,
    pub number_of_guests: Option<u32>,
    pub search_start_date: Option<String>,
    pub search_end_date: Option<String>,
    pub checkin_date: Option<String>,
    pub length_of_stay: Option<u32>,
    pub tour_date: Option<String>,
    pub tour_time: Option<String>,
    pub accommodation: Option<String>,
    pub room_type: Option<String>,
}

fn str_arg(args: &HashMap<String, Value>, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn u32_arg(args: &HashMap<String, Value>, key: &str) -> Option<u32> {
    args.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

impl BookingState {
    /// Fold a completed tool call into the state.
    ///
    /// Calls whose result is an error string are ignored.
    pub fn absorb(&mut self, tool: &str, args: &HashMap<String, Value>, result: &str) {
        if result.starts_with("Error") {
            return;
        }

        match tool {
            "verify_zip_code" => {
                if zip_code_accepted(result) {
                    self.destination = str_arg(args, "confirmed_user_destination").or(self.destination.take());
                    self.zip_code = str_arg(args, "user_input_zipcode").or(self.zip_code.take());
                }
            }
            "get_availability" => {
                self.number_of_guests = u32_arg(args, "number_of_guests").or(self.number_of_guests);
                self.search_start_date =
                    str_arg(args, "search_start_date").or(self.search_start_date.take());
                self.search_end_date =
                    str_arg(args, "search_end_date").or(self.search_end_date.take());
            }
            "get_accommodation_details" => {
                self.checkin_date = str_arg(args, "checkin_date").or(self.checkin_date.take());
                self.length_of_stay = u32_arg(args, "length_of_stay").or(self.length_of_stay);
            }
            "record_booking_selection" => {
                let raw = Value::Object(args.clone().into_iter().collect());
                if let Ok(selection) = BookingSelection::from_args(raw) {
                    self.apply_selection(selection);
                }
            }
            _ => {}
        }
    }

    fn apply_selection(&mut self, selection: BookingSelection) {
        if selection.tour_date.is_some() {
            self.tour_date = selection.tour_date;
        }
        if selection.tour_time.is_some() {
            self.tour_time = selection.tour_time;
        }
        if selection.accommodation.is_some() {
            self.accommodation = selection.accommodation;
        }
        if selection.room_type.is_some() {
            self.room_type = selection.room_type;
        }
    }

    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("Destination", self.destination.clone()),
            ("Verified zip code", self.zip_code.clone()),
            ("Guests", self.number_of_guests.map(|n| n.to_string())),
            ("Search start date", self.search_start_date.clone()),
            ("Search end date", self.search_end_date.clone()),
            ("Check-in date", self.checkin_date.clone()),
            ("Nights", self.length_of_stay.map(|n| n.to_string())),
            ("Tour date", self.tour_date.clone()),
            ("Tour time", self.tour_time.clone()),
            ("Accommodation", self.accommodation.clone()),
            ("Room type", self.room_type.clone()),
        ]
    }

    /// Labels of the fields still unknown
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(label, _)| label)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Bullet list of the known fields, for the system prompt
    pub fn summary(&self) -> String {
        let known: Vec<String> = self
            .fields()
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| format!("- {}: {}", label, v)))
            .collect();
        if known.is_empty() {
            "Nothing collected yet.".to_string()
        } else {
            known.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_zip_verification_only_counts_when_valid() {
        let mut state = BookingState::default();
        let call = args(json!({"confirmed_user_destination": "Orlando", "user_input_zipcode": "32801"}));

        state.absorb(
            "verify_zip_code",
            &call,
            "The zip code 32801 is not valid for Orlando. Please provide a different zip code.",
        );
        assert_eq!(state.zip_code, None);

        let call = args(json!({"confirmed_user_destination": "Orlando", "user_input_zipcode": "10001"}));
        state.absorb(
            "verify_zip_code",
            &call,
            "The zip code 10001 is valid for Orlando. Let's continue with your vacation booking.",
        );
        assert_eq!(state.destination.as_deref(), Some("Orlando"));
        assert_eq!(state.zip_code.as_deref(), Some("10001"));
    }

    #[test]
    fn test_error_results_ignored() {
        let mut state = BookingState::default();
        state.absorb(
            "get_availability",
            &args(json!({"number_of_guests": 2, "search_start_date": "2026-03-01", "search_end_date": "2026-03-31"})),
            "Error executing get_availability: Invalid parameters: bad",
        );
        assert_eq!(state, BookingState::default());
    }

    #[test]
    fn test_collects_dates_and_selection() {
        let mut state = BookingState::default();
        state.absorb(
            "get_availability",
            &args(json!({"number_of_guests": 4, "search_start_date": "2026-03-01", "search_end_date": "2026-03-31"})),
            "{}",
        );
        state.absorb(
            "get_accommodation_details",
            &args(json!({"checkin_date": "2026-03-10", "length_of_stay": 3})),
            "{\"accommodations\":[]}",
        );
        state.absorb(
            "record_booking_selection",
            &args(json!({"accommodation": "Westgate Vacation Villas", "room_type": "1BR"})),
            "Recorded selection.",
        );
        state.absorb(
            "record_booking_selection",
            &args(json!({"tour_date": "2026-03-11"})),
            "Recorded selection.",
        );

        assert_eq!(state.number_of_guests, Some(4));
        assert_eq!(state.length_of_stay, Some(3));
        assert_eq!(state.accommodation.as_deref(), Some("Westgate Vacation Villas"));
        assert_eq!(state.tour_date.as_deref(), Some("2026-03-11"));
        assert!(state.missing().contains(&"Tour time"));
        assert!(!state.is_complete());

        let summary = state.summary();
        assert!(summary.contains("- Guests: 4"));
        assert!(summary.contains("- Room type: 1BR"));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(BookingState::default().summary(), "Nothing collected yet.");
    }
}
