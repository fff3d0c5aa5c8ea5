//! Error types for quakescan

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuakescanError {
    // Query input errors
    #[error("Invalid coordinate: ({lat}, {lon}). Latitude must be in [-90, 90], longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Invalid radius: {radius_km} km. Radius must be positive and finite")]
    InvalidRadius { radius_km: f64 },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, QuakescanError>;
