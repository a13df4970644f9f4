use crate::pricing::{DistanceTier, ParcelType, PriceBreakdown, PricingError, RateSchedule};

/// Price a delivery without explanation lines.
///
/// Weight and distance are taken as given: rejecting negative or zero
/// weight is the caller's job. Only an unknown parcel type fails.
pub fn compute_price(
    schedule: &RateSchedule,
    parcel_type: &str,
    weight: f64,
    distance: f64,
) -> Result<PriceBreakdown, PricingError> {
    let parcel_type: ParcelType = parcel_type.parse()?;
    calculate(schedule, parcel_type, weight, distance, false)
}

/// Same computation as [`compute_price`], with one display line per
/// non-zero component.
pub fn price_breakdown(
    schedule: &RateSchedule,
    parcel_type: &str,
    weight: f64,
    distance: f64,
) -> Result<PriceBreakdown, PricingError> {
    let parcel_type: ParcelType = parcel_type.parse()?;
    calculate(schedule, parcel_type, weight, distance, true)
}

/// Typed entry point shared by both public functions and the quote layer
pub fn calculate(
    schedule: &RateSchedule,
    parcel_type: ParcelType,
    weight: f64,
    distance: f64,
    explain: bool,
) -> Result<PriceBreakdown, PricingError> {
    let definition = schedule.definition(parcel_type)?;

    let base_price = definition.base_price;
    let excess_weight = (weight - definition.max_weight).max(0.0);
    let weight_charge = excess_weight * schedule.weight_penalty_rate;
    let distance_charge = distance_charge(&schedule.distance_tiers, distance);

    let total = round_half_up(base_price + weight_charge + distance_charge);

    let explanation = explain.then(|| {
        let mut lines = vec![format!(
            "Base price ({}): {} {}",
            definition.label,
            schedule.currency,
            display_number(base_price)
        )];
        if weight_charge > 0.0 {
            lines.push(format!(
                "Weight excess ({}kg): {} {}",
                display_number(excess_weight),
                schedule.currency,
                display_number(weight_charge)
            ));
        }
        if distance_charge > 0.0 {
            lines.push(format!(
                "Distance ({}km): {} {}",
                display_number(distance),
                schedule.currency,
                display_number(distance_charge)
            ));
        }
        lines
    });

    Ok(PriceBreakdown {
        base_price,
        weight_charge,
        distance_charge,
        total,
        explanation,
    })
}

/// Progressive marginal-rate walk over the tier table.
///
/// Each band absorbs up to `max - min + 1` km of what is left of the trip,
/// and only bills it when the whole trip reaches past the band's `min`.
/// Whatever exceeds the last finite band is billed at the open band's rate.
pub fn distance_charge(tiers: &[DistanceTier], distance: f64) -> f64 {
    let mut charge = 0.0;
    let mut remaining = distance;

    for tier in tiers {
        if remaining <= 0.0 {
            break;
        }

        let in_range = remaining.min(tier.span());

        if distance > tier.min {
            charge += in_range * tier.rate;
        }

        remaining -= in_range;
    }

    charge
}

/// Round to the nearest whole unit, halves going up.
///
/// The cast saturates: amounts beyond `u64::MAX` (including infinity) give
/// `u64::MAX` and NaN gives 0. Callers reject non-finite weight and distance
/// before pricing, so neither shows up in a real quote.
pub fn round_half_up(amount: f64) -> u64 {
    (amount + 0.5).floor().max(0.0) as u64
}

/// Format an amount for display: integers without decimals, otherwise at
/// most two decimals with trailing zeros dropped
pub fn display_number(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
