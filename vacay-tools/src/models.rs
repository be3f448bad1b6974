//! Booking API data models
//!
//! Field names follow the booking API's camelCase JSON.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::base::{Result, ToolError};

/// A vacation package offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub campaign_id: String,
    pub package_id: String,
    pub package_expiration: String,
    pub accommodation_type: String,
    pub package_name: String,
    #[serde(default)]
    pub destination: Vec<PackageDestination>,
}

/// One destination a package can be redeemed at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDestination {
    #[serde(default)]
    pub destination: String,
    /// Zip codes whose residents do not qualify for this destination
    #[serde(default)]
    pub nq_zip_codes: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Package {
    /// Name of the first listed destination, if any
    pub fn primary_destination(&self) -> Option<&str> {
        self.destination
            .iter()
            .map(|d| d.destination.as_str())
            .find(|name| !name.is_empty())
    }

    /// Case-insensitive destination lookup
    pub fn find_destination(&self, name: &str) -> Option<&PackageDestination> {
        let wanted = name.trim();
        self.destination
            .iter()
            .find(|d| !d.destination.is_empty() && d.destination.eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub tour_id: i64,
    pub number_available: i64,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDate {
    pub tour_date: String,
    #[serde(default)]
    pub tours: Vec<Tour>,
}

/// A bookable stay window with the tours offered inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDateRange {
    pub first_night: String,
    pub last_night: String,
    #[serde(default)]
    pub tour_dates: Vec<TourDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub campaign: String,
    #[serde(default)]
    pub available_dates: Vec<AvailableDateRange>,
}

impl Availability {
    /// Keep only the ranges that fall entirely inside `[start, end]`.
    ///
    /// Dates are ISO `YYYY-MM-DD` strings, so lexicographic order is
    /// chronological order.
    pub fn within(&self, start: &str, end: &str) -> Availability {
        Availability {
            destination: self.destination.clone(),
            campaign: self.campaign.clone(),
            available_dates: self
                .available_dates
                .iter()
                .filter(|range| range.first_night.as_str() >= start && range.last_night.as_str() <= end)
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub property_room_type_id: i64,
    pub room_type_code: String,
    pub description: String,
    pub occupancy: u32,
}

/// A property offering a stay starting on `first_night`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub first_night: String,
    pub last_night: String,
    pub property_code: String,
    #[serde(rename = "AccommodationName", alias = "name")]
    pub accommodation_name: String,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
}

impl Accommodation {
    /// Whether this stay starts on `checkin` and lasts at least `nights` nights
    pub fn covers(&self, checkin: &str, nights: u32) -> Result<bool> {
        if self.first_night != checkin {
            return Ok(false);
        }
        let expected_last = last_night_for(checkin, nights)?;
        Ok(self.last_night >= expected_last)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationResponse {
    pub accommodations: Vec<Accommodation>,
}

/// Last night of a stay of `nights` nights starting on `checkin`
pub fn last_night_for(checkin: &str, nights: u32) -> Result<String> {
    let start = NaiveDate::parse_from_str(checkin, "%Y-%m-%d").map_err(|e| {
        ToolError::InvalidParams(format!("checkin_date '{}' is not YYYY-MM-DD: {}", checkin, e))
    })?;
    let last = if nights == 0 {
        start.checked_sub_days(Days::new(1))
    } else {
        start.checked_add_days(Days::new(u64::from(nights) - 1))
    }
    .ok_or_else(|| ToolError::InvalidParams("length_of_stay out of range".to_string()))?;
    Ok(last.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn range(first: &str, last: &str) -> AvailableDateRange {
        AvailableDateRange {
            first_night: first.to_string(),
            last_night: last.to_string(),
            tour_dates: Vec::new(),
        }
    }

    #[test]
    fn test_package_destination_lookup_ignores_case() {
        let package: Package = serde_json::from_value(json!({
            "campaignId": "C1",
            "packageId": "P1",
            "packageExpiration": "2026-12-31",
            "accommodationType": "Resort",
            "packageName": "Sunshine Getaway",
            "destination": [
                {"destination": "Orlando", "nqZipCodes": ["32801"], "resortCount": 3}
            ]
        }))
        .unwrap();

        assert_eq!(package.primary_destination(), Some("Orlando"));
        let found = package.find_destination("  orLANDO ").unwrap();
        assert_eq!(found.nq_zip_codes, vec!["32801".to_string()]);
        assert_eq!(found.extra["resortCount"], 3);
        assert!(package.find_destination("Las Vegas").is_none());
    }

    #[test]
    fn test_availability_within_keeps_contained_ranges() {
        let availability = Availability {
            destination: "Orlando".to_string(),
            campaign: "C1".to_string(),
            available_dates: vec![
                range("2026-03-01", "2026-03-04"),
                range("2026-03-10", "2026-03-13"),
                range("2026-03-29", "2026-04-02"),
            ],
        };

        let filtered = availability.within("2026-03-01", "2026-03-31");
        assert_eq!(filtered.available_dates.len(), 2);
        assert_eq!(filtered.destination, "Orlando");
    }

    #[test]
    fn test_accommodation_name_alias() {
        let accommodation: Accommodation = serde_json::from_value(json!({
            "firstNight": "2026-03-10",
            "lastNight": "2026-03-13",
            "propertyCode": "WGV",
            "name": "Westgate Vacation Villas",
            "roomTypes": []
        }))
        .unwrap();
        assert_eq!(accommodation.accommodation_name, "Westgate Vacation Villas");

        let value = serde_json::to_value(&accommodation).unwrap();
        assert_eq!(value["AccommodationName"], "Westgate Vacation Villas");
    }

    #[test]
    fn test_accommodation_covers_length_of_stay() {
        let accommodation = Accommodation {
            first_night: "2026-03-10".to_string(),
            last_night: "2026-03-12".to_string(),
            property_code: "WGV".to_string(),
            accommodation_name: "Westgate".to_string(),
            room_types: Vec::new(),
        };

        assert!(accommodation.covers("2026-03-10", 3).unwrap());
        assert!(!accommodation.covers("2026-03-10", 4).unwrap());
        assert!(!accommodation.covers("2026-03-11", 1).unwrap());
        assert!(accommodation.covers("2026-03-10", 0).unwrap());
    }

    #[test]
    fn test_last_night_rejects_bad_dates() {
        assert_eq!(last_night_for("2026-02-27", 3).unwrap(), "2026-03-01");
        assert!(last_night_for("03/10/2026", 3).is_err());
    }
}
