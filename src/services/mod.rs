//! Backend services used by the console.

pub mod location;

use std::sync::Arc;

use crate::config::{ServiceConfig, ServiceMode};
use crate::error::Result;

pub use location::{HttpLocationService, LocationService, MockLocationService};

/// Build the location service selected in config.
pub fn build_location_service(config: &ServiceConfig) -> Result<Arc<dyn LocationService>> {
    match config.mode {
        ServiceMode::Mock => {
            tracing::info!("Using in-memory station service");
            Ok(Arc::new(MockLocationService::seeded()))
        }
        ServiceMode::Http => {
            tracing::info!("Using station service at {}", config.base_url);
            Ok(Arc::new(HttpLocationService::new(&config.base_url, config.timeout_secs)?))
        }
    }
}
