use chrono::Utc;
use rayon::prelude::*;

use super::calculator::calculate;
use super::{ParcelType, PricingError, Quote, QuoteRequest, RateSchedule};
use crate::debug_println;

/// Price a single request with explanation lines and stamp it
pub fn quote(schedule: &RateSchedule, request: &QuoteRequest) -> Result<Quote, PricingError> {
    let parcel_type: ParcelType = request.parcel_type.parse()?;
    let breakdown = calculate(
        schedule,
        parcel_type,
        request.weight,
        request.distance,
        true,
    )?;

    Ok(Quote {
        parcel_type,
        weight: request.weight,
        distance: request.distance,
        breakdown,
        quoted_at: Utc::now(),
    })
}

/// Price many requests in parallel. Output order matches input order and
/// a bad request only fails its own slot.
pub fn quote_batch(
    schedule: &RateSchedule,
    requests: &[QuoteRequest],
) -> Vec<Result<Quote, PricingError>> {
    debug_println!("Quoting batch of {} requests", requests.len());

    requests
        .par_iter()
        .map(|request| quote(schedule, request))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(parcel_type: &str, weight: f64, distance: f64) -> QuoteRequest {
        QuoteRequest {
            parcel_type: parcel_type.to_string(),
            weight,
            distance,
        }
    }

    #[test]
    fn test_quote_carries_request_and_explanation() {
        let before = Utc::now();
        let q = quote(RateSchedule::default_schedule(), &request("small", 7.0, 10.0)).unwrap();
        assert_eq!(q.parcel_type, ParcelType::Small);
        assert_eq!(q.breakdown.total, 280);
        assert_eq!(q.breakdown.explanation.as_ref().map(|l| l.len()), Some(2));
        assert!(q.quoted_at >= before && q.quoted_at <= Utc::now());
    }

    #[test]
    fn test_quote_batch_preserves_order_and_errors() {
        let requests = vec![
            request("small", 3.0, 10.0),
            request("invalid_type", 1.0, 10.0),
            request("medium", 10.0, 150.0),
            request("documents", 0.5, 480.0),
        ];

        let results = quote_batch(RateSchedule::default_schedule(), &requests);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().breakdown.total, 200);
        assert_eq!(
            results[1].as_ref().unwrap_err(),
            &PricingError::InvalidParcelType("invalid_type".to_string())
        );
        assert_eq!(results[2].as_ref().unwrap().breakdown.total, 1244);
        assert_eq!(results[3].as_ref().unwrap().breakdown.total, 2616);
    }

    #[test]
    fn test_concurrent_callers_agree() {
        let schedule = RateSchedule::default_schedule();
        let totals: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| quote(schedule, &request("large", 40.0, 720.0))))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap().breakdown.total)
                .collect()
        });
        assert!(totals.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_quote_serializes_to_json() {
        let q = quote(RateSchedule::default_schedule(), &request("medium", 10.0, 150.0)).unwrap();
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["parcel_type"], "medium");
        assert_eq!(value["breakdown"]["total"], 1244);
        assert!(value["quoted_at"].is_string());
    }
}
