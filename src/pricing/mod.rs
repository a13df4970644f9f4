pub mod calculator;
pub mod catalog;
pub mod distance;
pub mod quote;
pub mod types;

pub use calculator::{compute_price, price_breakdown};
pub use catalog::WEIGHT_PENALTY_RATE;
pub use distance::estimate_distance;
pub use quote::{quote, quote_batch};
pub use types::{
    DistanceTier, GeoPoint, ParcelType, ParcelTypeDefinition, PriceBreakdown, PricingError, Quote,
    QuoteRequest, RateSchedule,
};
