use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use super::{DistanceTier, ParcelType, ParcelTypeDefinition, PricingError, RateSchedule};

/// KES per kg above a parcel type's included weight
pub const WEIGHT_PENALTY_RATE: f64 = 40.0;

/// Built-in schedule, shared by every caller that does not load its own
static DEFAULT_SCHEDULE: Lazy<RateSchedule> = Lazy::new(RateSchedule::builtin);

impl RateSchedule {
    /// Shared reference to the built-in schedule
    pub fn default_schedule() -> &'static RateSchedule {
        &DEFAULT_SCHEDULE
    }

    /// Built-in catalog, tier table and penalty rate
    pub fn builtin() -> RateSchedule {
        let mut parcel_types = BTreeMap::new();

        parcel_types.insert(
            ParcelType::Documents,
            ParcelTypeDefinition {
                max_weight: 1.0,
                base_price: 200.0,
                label: "Documents".to_string(),
                description: "Papers, letters, small documents".to_string(),
            },
        );

        parcel_types.insert(
            ParcelType::Small,
            ParcelTypeDefinition {
                max_weight: 5.0,
                base_price: 200.0,
                label: "Small Box (<5kg)".to_string(),
                description: "Small packages, electronics".to_string(),
            },
        );

        parcel_types.insert(
            ParcelType::Medium,
            ParcelTypeDefinition {
                max_weight: 15.0,
                base_price: 250.0,
                label: "Medium Box (5-15kg)".to_string(),
                description: "Clothing, books, medium items".to_string(),
            },
        );

        parcel_types.insert(
            ParcelType::Large,
            ParcelTypeDefinition {
                max_weight: 30.0,
                base_price: 350.0,
                label: "Large Box (15-30kg)".to_string(),
                description: "Appliances, bulk items".to_string(),
            },
        );

        RateSchedule {
            currency: "KES".to_string(),
            weight_penalty_rate: WEIGHT_PENALTY_RATE,
            parcel_types,
            distance_tiers: vec![
                DistanceTier::new(0.0, Some(20.0), 0.0), // covered by base price
                DistanceTier::new(21.0, Some(50.0), 10.0),
                DistanceTier::new(51.0, Some(100.0), 8.0),
                DistanceTier::new(101.0, Some(200.0), 6.0),
                DistanceTier::new(201.0, Some(500.0), 4.0),
                DistanceTier::new(501.0, None, 3.0),
            ],
        }
    }

    /// Look up the catalog entry for a parcel type
    pub fn definition(&self, parcel_type: ParcelType) -> Result<&ParcelTypeDefinition, PricingError> {
        self.parcel_types
            .get(&parcel_type)
            .ok_or_else(|| PricingError::InvalidParcelType(parcel_type.key().to_string()))
    }

    /// Validate catalog and tier table
    pub fn validate(&self) -> Result<(), PricingError> {
        let invalid =
            |msg: String| -> Result<(), PricingError> { Err(PricingError::InvalidSchedule(msg)) };

        if !self.weight_penalty_rate.is_finite() || self.weight_penalty_rate < 0.0 {
            return invalid(format!(
                "weight penalty rate must be non-negative, got {}",
                self.weight_penalty_rate
            ));
        }

        for parcel_type in ParcelType::ALL {
            let Some(def) = self.parcel_types.get(&parcel_type) else {
                return invalid(format!("missing catalog entry for '{}'", parcel_type));
            };
            if !(def.max_weight.is_finite() && def.max_weight > 0.0) {
                return invalid(format!("'{}' max_weight must be positive", parcel_type));
            }
            if !(def.base_price.is_finite() && def.base_price > 0.0) {
                return invalid(format!("'{}' base_price must be positive", parcel_type));
            }
        }

        let Some(first) = self.distance_tiers.first() else {
            return invalid("no distance tiers configured".to_string());
        };
        if first.min != 0.0 {
            return invalid(format!("first tier must start at 0 km, got {}", first.min));
        }

        let last_index = self.distance_tiers.len() - 1;
        for (i, tier) in self.distance_tiers.iter().enumerate() {
            if !tier.rate.is_finite() || tier.rate < 0.0 {
                return invalid(format!("tier {} has negative rate {}", i, tier.rate));
            }
            match tier.max {
                Some(max) if max < tier.min => {
                    return invalid(format!("tier {} max {} is below min {}", i, max, tier.min));
                }
                None if i != last_index => {
                    return invalid(format!("tier {} is open-ended but not last", i));
                }
                _ => {}
            }
            if let Some(next) = self.distance_tiers.get(i + 1) {
                // Open-ended tiers only appear last, checked above
                let expected = tier.max.map(|max| max + 1.0);
                if expected != Some(next.min) {
                    return invalid(format!(
                        "tier {} starts at {} but previous tier ends at {:?}",
                        i + 1,
                        next.min,
                        tier.max
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schedule_is_valid() {
        let schedule = RateSchedule::builtin();
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.parcel_types.len(), 4);
        assert_eq!(schedule.distance_tiers.len(), 6);
        assert_eq!(schedule.distance_tiers[0].rate, 0.0);
        assert_eq!(schedule.distance_tiers[5].max, None);
    }

    #[test]
    fn test_default_schedule_is_shared() {
        let a = RateSchedule::default_schedule();
        let b = RateSchedule::default_schedule();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &RateSchedule::builtin());
    }

    #[test]
    fn test_definition_lookup() {
        let schedule = RateSchedule::builtin();
        let medium = schedule.definition(ParcelType::Medium).unwrap();
        assert_eq!(medium.max_weight, 15.0);
        assert_eq!(medium.base_price, 250.0);

        let mut partial = schedule.clone();
        partial.parcel_types.remove(&ParcelType::Large);
        assert_eq!(
            partial.definition(ParcelType::Large),
            Err(PricingError::InvalidParcelType("large".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_gap_between_tiers() {
        let mut schedule = RateSchedule::builtin();
        schedule.distance_tiers[2].min = 60.0;
        assert!(matches!(
            schedule.validate(),
            Err(PricingError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_validate_rejects_open_tier_in_middle() {
        let mut schedule = RateSchedule::builtin();
        schedule.distance_tiers[3].max = None;
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_entry_and_bad_prices() {
        let mut schedule = RateSchedule::builtin();
        schedule.parcel_types.remove(&ParcelType::Documents);
        assert!(schedule.validate().is_err());

        let mut schedule = RateSchedule::builtin();
        if let Some(def) = schedule.parcel_types.get_mut(&ParcelType::Small) {
            def.base_price = 0.0;
        }
        assert!(schedule.validate().is_err());

        let mut schedule = RateSchedule::builtin();
        schedule.weight_penalty_rate = -1.0;
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_and_offset_tables() {
        let mut schedule = RateSchedule::builtin();
        schedule.distance_tiers.clear();
        assert!(schedule.validate().is_err());

        let mut schedule = RateSchedule::builtin();
        schedule.distance_tiers[0].min = 1.0;
        assert!(schedule.validate().is_err());
    }
}
