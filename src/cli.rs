use clap::Parser;
use std::path::PathBuf;

use serde_json::json;

use crate::config::Config;
use crate::pricing::{estimate_distance, quote_batch, GeoPoint, QuoteRequest, RateSchedule};

#[derive(Parser, Debug)]
#[command(name = "parcelfare")]
#[command(version, about = "Delivery pricing for traveler-carried parcels")]
pub struct Cli {
    /// Parcel type (documents, small, medium, large)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub parcel_type: Option<String>,

    /// Parcel weight in kilograms
    #[arg(short = 'w', long = "weight", value_name = "KG", allow_negative_numbers = true)]
    pub weight: Option<f64>,

    /// Trip distance in kilometres
    #[arg(short = 'd', long = "distance", value_name = "KM", allow_negative_numbers = true)]
    pub distance: Option<f64>,

    /// Pickup point: location name or "lat,lon"
    #[arg(long = "from", value_name = "PLACE", allow_hyphen_values = true)]
    pub from: Option<String>,

    /// Dropoff point: location name or "lat,lon"
    #[arg(long = "to", value_name = "PLACE", allow_hyphen_values = true)]
    pub to: Option<String>,

    /// Print the quote as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Read a JSON array of requests from stdin and quote them all
    #[arg(long = "batch")]
    pub batch: bool,

    /// List parcel types and their allowances
    #[arg(long = "list-types")]
    pub list_types: bool,

    /// List configured locations
    #[arg(long = "list-locations")]
    pub list_locations: bool,

    /// Use this config file instead of the default
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validated inputs for a single quote
    pub fn quote_input(&self, config: &Config) -> Result<QuoteInput, InputError> {
        let parcel_type = self
            .parcel_type
            .clone()
            .ok_or(InputError::Missing("--type"))?;

        let weight = self.weight.ok_or(InputError::Missing("--weight"))?;
        validate_weight(weight)?;

        let distance = match (self.distance, &self.from, &self.to) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(InputError::Conflict);
            }
            (Some(distance), None, None) => {
                validate_distance(distance)?;
                distance
            }
            (None, Some(from), Some(to)) => {
                let pickup = resolve_point(from, config)?;
                let dropoff = resolve_point(to, config)?;
                estimate_distance(pickup, dropoff) as f64
            }
            (None, Some(_), None) => return Err(InputError::Missing("--to")),
            (None, None, Some(_)) => return Err(InputError::Missing("--from")),
            (None, None, None) => return Err(InputError::Missing("--distance or --from/--to")),
        };

        Ok(QuoteInput {
            parcel_type,
            weight,
            distance,
        })
    }
}

/// Quote parameters after presentation-level validation
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteInput {
    pub parcel_type: String,
    pub weight: f64,
    pub distance: f64,
}

/// Error types for command-line input
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    Missing(&'static str),
    Conflict,
    InvalidWeight(f64),
    InvalidDistance(f64),
    UnknownLocation(String),
    InvalidCoordinates(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Missing(arg) => write!(f, "Missing required argument: {}", arg),
            InputError::Conflict => write!(f, "Use either --distance or --from/--to, not both"),
            InputError::InvalidWeight(w) => write!(f, "Weight must be greater than 0, got {}", w),
            InputError::InvalidDistance(d) => write!(f, "Distance must be 0 or more, got {}", d),
            InputError::UnknownLocation(name) => write!(f, "Unknown location: {}", name),
            InputError::InvalidCoordinates(input) => {
                write!(f, "Invalid coordinates '{}', expected lat,lon", input)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Weight must be a finite number above zero
pub fn validate_weight(weight: f64) -> Result<(), InputError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(InputError::InvalidWeight(weight));
    }
    Ok(())
}

/// Distance must be a finite number, zero allowed
pub fn validate_distance(distance: f64) -> Result<(), InputError> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(InputError::InvalidDistance(distance));
    }
    Ok(())
}

/// Same checks as a single quote, applied to one batch element
pub fn validate_request(request: &QuoteRequest) -> Result<(), InputError> {
    validate_weight(request.weight)?;
    validate_distance(request.distance)
}

/// Quote a batch read from stdin. Each element becomes `{"ok": quote}` or
/// `{"error": message}`, in input order; rejected requests are never priced.
pub fn batch_output(schedule: &RateSchedule, requests: &[QuoteRequest]) -> Vec<serde_json::Value> {
    let checks: Vec<Result<(), InputError>> = requests.iter().map(validate_request).collect();

    let accepted: Vec<QuoteRequest> = requests
        .iter()
        .zip(&checks)
        .filter(|(_, check)| check.is_ok())
        .map(|(request, _)| request.clone())
        .collect();
    let mut priced = quote_batch(schedule, &accepted).into_iter();

    checks
        .into_iter()
        .map(|check| match check.map(|_| priced.next()) {
            Err(e) => json!({ "error": e.to_string() }),
            Ok(Some(Ok(quote))) => json!({ "ok": quote }),
            Ok(Some(Err(e))) => json!({ "error": e.to_string() }),
            Ok(None) => json!({ "error": "request was not priced" }),
        })
        .collect()
}

/// Resolve a configured location name or "lat,lon" to a point. Names win,
/// so a location whose name contains a comma still resolves.
pub fn resolve_point(input: &str, config: &Config) -> Result<GeoPoint, InputError> {
    if let Some(location) = config.find_location(input) {
        return Ok(location.point());
    }

    let Some((lat_str, lon_str)) = input.split_once(',') else {
        return Err(InputError::UnknownLocation(input.to_string()));
    };

    let latitude: f64 = lat_str
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidCoordinates(input.to_string()))?;
    let longitude: f64 = lon_str
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidCoordinates(input.to_string()))?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(InputError::InvalidCoordinates(input.to_string()));
    }

    Ok(GeoPoint::new(latitude, longitude))
}
