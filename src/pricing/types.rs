use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Parcel category offered to senders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParcelType {
    Documents,
    Small,
    Medium,
    Large,
}

impl ParcelType {
    pub const ALL: [ParcelType; 4] = [
        ParcelType::Documents,
        ParcelType::Small,
        ParcelType::Medium,
        ParcelType::Large,
    ];

    /// Catalog key as used in config files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ParcelType::Documents => "documents",
            ParcelType::Small => "small",
            ParcelType::Medium => "medium",
            ParcelType::Large => "large",
        }
    }
}

impl fmt::Display for ParcelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ParcelType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParcelType::ALL
            .iter()
            .copied()
            .find(|t| t.key() == s)
            .ok_or_else(|| PricingError::InvalidParcelType(s.to_string()))
    }
}

impl TryFrom<String> for ParcelType {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParcelType> for String {
    fn from(value: ParcelType) -> Self {
        value.key().to_string()
    }
}

/// Catalog entry for one parcel type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelTypeDefinition {
    /// Weight included in the base price (kg)
    pub max_weight: f64,
    /// Flat price up to `max_weight`
    pub base_price: f64,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

/// One band of the progressive distance schedule, bounds inclusive (km)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    pub min: f64,
    /// `None` marks the open-ended last band
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Charge per km inside this band
    pub rate: f64,
}

impl DistanceTier {
    pub fn new(min: f64, max: Option<f64>, rate: f64) -> Self {
        Self { min, max, rate }
    }

    /// Kilometres this band can absorb. Bounds are inclusive, hence the +1.
    pub fn span(&self) -> f64 {
        match self.max {
            Some(max) => max - self.min + 1.0,
            None => f64::INFINITY,
        }
    }
}

/// Everything the engine needs to price a delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Currency code used in explanation lines
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Currency per kg above a parcel type's allowance
    pub weight_penalty_rate: f64,
    pub parcel_types: BTreeMap<ParcelType, ParcelTypeDefinition>,
    pub distance_tiers: Vec<DistanceTier>,
}

fn default_currency() -> String {
    "KES".to_string()
}

/// Itemised result of one pricing query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub weight_charge: f64,
    pub distance_charge: f64,
    /// Sum of the components rounded to a whole currency unit
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<String>>,
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A single pricing request, as read from batch input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub parcel_type: String,
    pub weight: f64,
    pub distance: f64,
}

/// A priced request, stamped so the shown price can be charged unchanged
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub parcel_type: ParcelType,
    pub weight: f64,
    pub distance: f64,
    pub breakdown: PriceBreakdown,
    pub quoted_at: DateTime<Utc>,
}

/// Error types for pricing operations
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    InvalidParcelType(String),
    InvalidSchedule(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidParcelType(key) => write!(f, "Invalid parcel type: {}", key),
            PricingError::InvalidSchedule(msg) => write!(f, "Invalid rate schedule: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_type_parse() {
        assert_eq!("small".parse::<ParcelType>(), Ok(ParcelType::Small));
        assert_eq!("large".parse::<ParcelType>(), Ok(ParcelType::Large));
        assert_eq!(
            "invalid_type".parse::<ParcelType>(),
            Err(PricingError::InvalidParcelType("invalid_type".to_string()))
        );
        // Keys are exact, no case folding
        assert!("Small".parse::<ParcelType>().is_err());
    }

    #[test]
    fn test_tier_span() {
        assert_eq!(DistanceTier::new(0.0, Some(20.0), 0.0).span(), 21.0);
        assert_eq!(DistanceTier::new(21.0, Some(50.0), 10.0).span(), 30.0);
        assert!(DistanceTier::new(501.0, None, 3.0).span().is_infinite());
    }

    #[test]
    fn test_error_display() {
        let err = PricingError::InvalidParcelType("crate".to_string());
        assert_eq!(err.to_string(), "Invalid parcel type: crate");
    }
}
