//! Where booking data comes from

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use vacay_core::config::BookingConfig;

use crate::base::{Result, ToolError};
use crate::models::{Accommodation, Availability, Package};
use crate::remote::BookingApiClient;
use crate::sample::SampleDataSource;

/// Parameters of an availability search
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub number_of_guests: u32,
    pub search_start_date: String,
    pub search_end_date: String,
    /// Falls back to the package's first destination
    pub destination: Option<String>,
    pub length_of_stay: Option<u32>,
}

/// Parameters of an accommodation search
#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationQuery {
    pub checkin_date: String,
    pub length_of_stay: u32,
    pub number_of_guests: Option<u32>,
    pub destination: Option<String>,
}

/// Read access to package, availability and accommodation data
///
/// `Ok(None)` means the source has no data for the request; errors are
/// reserved for failures talking to the source.
#[async_trait]
pub trait BookingSource: Send + Sync {
    fn name(&self) -> &str;

    async fn package(&self) -> Result<Option<Package>>;

    async fn availability(&self, query: &AvailabilityQuery) -> Result<Option<Availability>>;

    /// Every bookable range, without a date filter
    async fn availability_summary(&self) -> Result<Option<Availability>>;

    async fn accommodations(&self, query: &AccommodationQuery) -> Result<Vec<Accommodation>>;
}

/// Build the source selected by `booking.source`
pub fn source_from_config(config: &BookingConfig) -> Result<Arc<dyn BookingSource>> {
    let source: Arc<dyn BookingSource> = match config.source.as_str() {
        "sample" => Arc::new(SampleDataSource::load(PathBuf::from(&config.data_dir))),
        "remote" => Arc::new(BookingApiClient::new(
            &config.api_base,
            &config.package_id,
            &config.environment,
            Duration::from_secs(config.timeout_secs),
        )?),
        other => {
            return Err(ToolError::InvalidParams(format!(
                "unknown booking source '{}'",
                other
            )))
        }
    };
    info!("Using {} booking source", source.name());
    Ok(source)
}
