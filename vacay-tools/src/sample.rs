//! Booking data served from JSON files on disk

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::base::Result;
use crate::models::{Accommodation, Availability, Package};
use crate::source::{AccommodationQuery, AvailabilityQuery, BookingSource};

pub const PACKAGE_FILE: &str = "PackageDetails.json";
pub const AVAILABILITY_FILE: &str = "availabilities.json";
pub const ACCOMMODATION_FILE: &str = "accommodations.json";

/// Sample data loaded once from a directory
///
/// Missing or malformed files are logged and behave as "no data".
#[derive(Debug, Clone, Default)]
pub struct SampleDataSource {
    data_dir: PathBuf,
    package: Option<Package>,
    availability: Option<Availability>,
    accommodations: Option<Vec<Accommodation>>,
}

impl SampleDataSource {
    pub fn load(data_dir: PathBuf) -> Self {
        let package = load_json::<Package>(&data_dir.join(PACKAGE_FILE));
        let availability = load_json::<Availability>(&data_dir.join(AVAILABILITY_FILE));
        let accommodations = load_json::<Vec<Accommodation>>(&data_dir.join(ACCOMMODATION_FILE));

        if let Some(package) = &package {
            info!("Loaded package {} ({})", package.package_id, package.package_name);
        }
        if let Some(accommodations) = &accommodations {
            info!("Loaded {} accommodation offers", accommodations.len());
        }

        Self {
            data_dir,
            package,
            availability,
            accommodations,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

#[async_trait]
impl BookingSource for SampleDataSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn package(&self) -> Result<Option<Package>> {
        if self.package.is_none() {
            warn!("No package data loaded");
        }
        Ok(self.package.clone())
    }

    async fn availability(&self, query: &AvailabilityQuery) -> Result<Option<Availability>> {
        let Some(availability) = &self.availability else {
            warn!("No availability data loaded");
            return Ok(None);
        };
        let filtered = availability.within(&query.search_start_date, &query.search_end_date);
        info!(
            "Availability search {}..{} matched {} date ranges",
            query.search_start_date,
            query.search_end_date,
            filtered.available_dates.len()
        );
        Ok(Some(filtered))
    }

    async fn availability_summary(&self) -> Result<Option<Availability>> {
        if self.availability.is_none() {
            warn!("No availability data loaded");
        }
        Ok(self.availability.clone())
    }

    async fn accommodations(&self, query: &AccommodationQuery) -> Result<Vec<Accommodation>> {
        let Some(accommodations) = &self.accommodations else {
            warn!("No accommodation data loaded");
            return Ok(Vec::new());
        };

        let mut matching = Vec::new();
        for accommodation in accommodations {
            if accommodation.covers(&query.checkin_date, query.length_of_stay)? {
                matching.push(accommodation.clone());
            }
        }
        info!(
            "Accommodation search from {} for {} nights matched {} properties",
            query.checkin_date,
            query.length_of_stay,
            matching.len()
        );
        Ok(matching)
    }
}
