//! Booking REST API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::base::{Result, ToolError};
use crate::models::{Accommodation, Availability, Package};
use crate::source::{AccommodationQuery, AvailabilityQuery, BookingSource};

const ORDERS_PATH: &str = "/consumerweb/vacationPackages/orders";

/// Length of stay used for availability searches that do not name one
const DEFAULT_LENGTH_OF_STAY: u32 = 3;

/// Client for the vacation package orders API
///
/// The package is fetched once and reused to fill in the campaign,
/// destination and accommodation type that the other endpoints require.
pub struct BookingApiClient {
    client: Client,
    base_url: String,
    package_id: String,
    environment: String,
    package: OnceCell<Package>,
}

impl BookingApiClient {
    pub fn new(
        base_url: &str,
        package_id: &str,
        environment: &str,
        timeout: Duration,
    ) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(ToolError::InvalidParams(
                "booking API base URL is empty".to_string(),
            ));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            package_id: package_id.to_string(),
            environment: environment.to_string(),
            package: OnceCell::new(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}{}", self.base_url, ORDERS_PATH, path))
            .header("X-Env", &self.environment)
            .header(header::ACCEPT, "application/json")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ToolError::ExecutionFailed(format!(
                "booking API returned HTTP {}: {}",
                status, body
            )));
        }
        Ok(response.json().await?)
    }

    async fn cached_package(&self) -> Result<&Package> {
        self.package
            .get_or_try_init(|| async {
                info!("Fetching package {}", self.package_id);
                self.send::<Package>(self.get("").query(&[("packageId", self.package_id.as_str())]))
                    .await
            })
            .await
    }

    fn destination_for<'a>(package: &'a Package, requested: Option<&'a str>) -> Result<&'a str> {
        requested
            .filter(|d| !d.trim().is_empty())
            .or_else(|| package.primary_destination())
            .ok_or_else(|| {
                ToolError::ExecutionFailed("package has no destination".to_string())
            })
    }
}

#[async_trait]
impl BookingSource for BookingApiClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn package(&self) -> Result<Option<Package>> {
        Ok(Some(self.cached_package().await?.clone()))
    }

    async fn availability(&self, query: &AvailabilityQuery) -> Result<Option<Availability>> {
        let package = self.cached_package().await?;
        let destination = Self::destination_for(package, query.destination.as_deref())?;
        let length_of_stay = query
            .length_of_stay
            .unwrap_or(DEFAULT_LENGTH_OF_STAY)
            .to_string();
        let guests = query.number_of_guests.to_string();

        debug!(
            "GET availabilities for {} guests {}..{}",
            query.number_of_guests, query.search_start_date, query.search_end_date
        );
        let request = self.get("/availabilities").query(&[
            ("packageId", self.package_id.as_str()),
            ("destination", destination),
            ("lengthOfStay", length_of_stay.as_str()),
            // parameter name as spelled by the API
            ("campaignIntitiativeId", package.campaign_id.as_str()),
            ("accommodationType", package.accommodation_type.as_str()),
            ("numberOfGuests", guests.as_str()),
            ("searchStartDate", query.search_start_date.as_str()),
            ("searchEndDate", query.search_end_date.as_str()),
        ]);
        Ok(Some(self.send(request).await?))
    }

    async fn availability_summary(&self) -> Result<Option<Availability>> {
        Err(ToolError::ExecutionFailed(
            "the booking API needs search dates; use get_availability instead".to_string(),
        ))
    }

    async fn accommodations(&self, query: &AccommodationQuery) -> Result<Vec<Accommodation>> {
        let package = self.cached_package().await?;
        let destination = Self::destination_for(package, query.destination.as_deref())?;
        let guests = query.number_of_guests.unwrap_or(2).to_string();
        let length_of_stay = query.length_of_stay.to_string();

        let request = self.get("/accommodations").query(&[
            ("campaignInitiativeId", package.campaign_id.as_str()),
            ("accommodationType", package.accommodation_type.as_str()),
            ("lengthOfStay", length_of_stay.as_str()),
            ("numberOfGuests", guests.as_str()),
            ("destination", destination),
            ("checkinDate", query.checkin_date.as_str()),
        ]);
        self.send(request).await
    }
}
