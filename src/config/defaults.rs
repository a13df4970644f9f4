use super::types::{Config, Location};
use crate::pricing::RateSchedule;

/// Pickup and dropoff points available out of the box
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("Nairobi CBD", "Nairobi", -1.2921, 36.8219),
        Location::new("Mombasa Town", "Mombasa", -4.0435, 39.6682),
        Location::new("Westlands", "Nairobi", -1.2676, 36.8108),
        Location::new("Kisumu City", "Kisumu", -0.0917, 34.7680),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schedule: RateSchedule::builtin(),
            locations: default_locations(),
        }
    }
}
