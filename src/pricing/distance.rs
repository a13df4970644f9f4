use super::GeoPoint;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points (haversine), rounded to the
/// nearest whole kilometre
pub fn estimate_distance(pickup: GeoPoint, dropoff: GeoPoint) -> u64 {
    let d_lat = (dropoff.latitude - pickup.latitude).to_radians();
    let d_lon = (dropoff.longitude - pickup.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + pickup.latitude.to_radians().cos()
            * dropoff.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c).round() as u64
}
