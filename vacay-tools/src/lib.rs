//! Booking data sources and agent tools for vacay
//!
//! This crate provides the tool registry, the booking data models and sources,
//! and the tools the vacation agent can call.

pub mod accommodation;
pub mod availability;
pub mod base;
pub mod models;
pub mod package;
pub mod registry;
pub mod remote;
pub mod sample;
pub mod selection;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use accommodation::AccommodationTool;
pub use availability::{AvailabilitySummaryTool, AvailabilityTool};
pub use base::{Tool, ToolError};
pub use package::{zip_code_accepted, PackageSummaryTool, VerifyZipCodeTool};
pub use registry::ToolRegistry;
pub use remote::BookingApiClient;
pub use sample::SampleDataSource;
pub use selection::{BookingSelection, RecordSelectionTool};
pub use source::{source_from_config, AccommodationQuery, AvailabilityQuery, BookingSource};

/// Registry holding every booking tool, backed by `source`
pub fn booking_tools(source: Arc<dyn BookingSource>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(PackageSummaryTool::new(source.clone())));
    registry.register(Arc::new(VerifyZipCodeTool::new(source.clone())));
    registry.register(Arc::new(AvailabilityTool::new(source.clone())));
    registry.register(Arc::new(AvailabilitySummaryTool::new(source.clone())));
    registry.register(Arc::new(AccommodationTool::new(source)));
    registry.register(Arc::new(RecordSelectionTool));
    registry
}
