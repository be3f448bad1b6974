//! Package tools: get_package_summary and verify_zip_code

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::base::{parse_args, to_tool_output, Result, Tool};
use crate::source::BookingSource;

pub const NO_PACKAGE: &str = "No package data available.";

/// Return the current vacation package
pub struct PackageSummaryTool {
    source: Arc<dyn BookingSource>,
}

impl PackageSummaryTool {
    pub fn new(source: Arc<dyn BookingSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for PackageSummaryTool {
    fn name(&self) -> &str {
        "get_package_summary"
    }

    fn description(&self) -> &str {
        "Get the vacation package details: name, expiration, accommodation type and destinations."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        match self.source.package().await? {
            Some(package) => {
                info!("Returning package {}", package.package_name);
                to_tool_output(&package)
            }
            None => Ok(NO_PACKAGE.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ZipCodeArgs {
    confirmed_user_destination: String,
    user_input_zipcode: String,
}

/// Check a zip code against the destination's non-qualified list
pub struct VerifyZipCodeTool {
    source: Arc<dyn BookingSource>,
}

impl VerifyZipCodeTool {
    pub fn new(source: Arc<dyn BookingSource>) -> Self {
        Self { source }
    }
}

/// Whether a `verify_zip_code` result accepted the zip code
pub fn zip_code_accepted(result: &str) -> bool {
    result.contains(" is valid for ")
}

#[async_trait]
impl Tool for VerifyZipCodeTool {
    fn name(&self) -> &str {
        "verify_zip_code"
    }

    fn description(&self) -> &str {
        "Verify that a user's zip code qualifies for the destination they confirmed."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "confirmed_user_destination": {
                    "type": "string",
                    "description": "Destination name the user confirmed"
                },
                "user_input_zipcode": {
                    "type": "string",
                    "description": "Zip code provided by the user"
                }
            },
            "required": ["confirmed_user_destination", "user_input_zipcode"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: ZipCodeArgs = parse_args(args)?;
        let zip = args.user_input_zipcode.trim();
        info!(
            "Verifying zip code {} for destination {}",
            zip, args.confirmed_user_destination
        );

        let Some(package) = self.source.package().await? else {
            return Ok(format!("Unable to verify zip code: {}", NO_PACKAGE));
        };

        let Some(destination) = package.find_destination(&args.confirmed_user_destination) else {
            return Ok(format!(
                "Unable to verify zip code: Destination '{}' not found in available packages.",
                args.confirmed_user_destination.trim().to_uppercase()
            ));
        };

        let name = &destination.destination;
        if destination.nq_zip_codes.iter().any(|nq| nq == zip) {
            info!("Zip code {} does not qualify for {}", zip, name);
            Ok(format!(
                "The zip code {} is not valid for {}. Please provide a different zip code.",
                zip, name
            ))
        } else {
            Ok(format!(
                "The zip code {} is valid for {}. Let's continue with your vacation booking.",
                zip, name
            ))
        }
    }
}
