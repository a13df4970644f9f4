use serde::{Deserialize, Serialize};

use crate::pricing::{GeoPoint, PricingError, RateSchedule};

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub schedule: RateSchedule,
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Named pickup/dropoff point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub county: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: &str, county: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            county: county.to_string(),
            latitude,
            longitude,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Error types for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    FileAccess(std::io::Error),
    Parse(String),
    Serialize(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileAccess(e) => write!(f, "Failed to access configuration file: {}", e),
            ConfigError::Parse(msg) => write!(f, "Configuration file is corrupted: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Failed to serialize configuration: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::FileAccess(error)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::Parse(format!("TOML error: {}", error))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(error: toml::ser::Error) -> Self {
        ConfigError::Serialize(error.to_string())
    }
}

impl From<PricingError> for ConfigError {
    fn from(error: PricingError) -> Self {
        ConfigError::Invalid(error.to_string())
    }
}
