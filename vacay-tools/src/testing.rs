//! Fixtures shared by the tool tests

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use crate::sample::{SampleDataSource, ACCOMMODATION_FILE, AVAILABILITY_FILE, PACKAGE_FILE};
use crate::source::BookingSource;

pub(crate) fn write_sample_data(dir: &Path) {
    std::fs::write(
        dir.join(PACKAGE_FILE),
        json!({
            "campaignId": "CMP-100",
            "packageId": "PKG-42",
            "packageExpiration": "2026-12-31",
            "accommodationType": "Resort",
            "packageName": "Sunshine Getaway",
            "destination": [
                {"destination": "Orlando", "nqZipCodes": ["32801", "32803"]},
                {"destination": "Las Vegas", "nqZipCodes": []}
            ]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.join(AVAILABILITY_FILE),
        json!({
            "destination": "Orlando",
            "campaign": "CMP-100",
            "availableDates": [
                {"firstNight": "2026-03-10", "lastNight": "2026-03-13", "tourDates": [
                    {"tourDate": "2026-03-11", "tours": [{"tourId": 7, "numberAvailable": 4, "time": "09:00"}]}
                ]},
                {"firstNight": "2026-04-01", "lastNight": "2026-04-04", "tourDates": []}
            ]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.join(ACCOMMODATION_FILE),
        json!([
            {"firstNight": "2026-03-10", "lastNight": "2026-03-13", "propertyCode": "WGV",
             "name": "Westgate Vacation Villas",
             "roomTypes": [{"propertyRoomTypeId": 1, "roomTypeCode": "1BR", "description": "One bedroom villa", "occupancy": 4}]},
            {"firstNight": "2026-03-10", "lastNight": "2026-03-11", "propertyCode": "WLR",
             "name": "Westgate Lakes Resort", "roomTypes": []}
        ])
        .to_string(),
    )
    .unwrap();
}

/// A sample source backed by a fresh temp dir; keep the dir alive
pub(crate) fn sample_source() -> (TempDir, Arc<dyn BookingSource>) {
    let temp_dir = TempDir::new().unwrap();
    write_sample_data(temp_dir.path());
    let source = SampleDataSource::load(temp_dir.path().to_path_buf());
    (temp_dir, Arc::new(source))
}
