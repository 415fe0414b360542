//! Great-circle proximity ranking over a bundled city catalog.

use serde::Serialize;

use crate::model::Coordinates;

pub mod cache;
pub mod catalog;

pub use cache::NearbyCache;
pub use catalog::CATALOG;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const DEFAULT_RADIUS_KM: f64 = 100.0;
pub const MAX_RESULTS: usize = 10;

/// A named catalog location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub name: &'static str,
    pub country: &'static str,
    pub state: Option<&'static str>,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPoint {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub distance_km: f64,
}

/// Haversine distance in kilometers.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair outside [0, 1] near poles and antipodes
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Catalog cities within `radius_km` of `origin`, nearest first.
pub fn find_nearby(origin: Coordinates, radius_km: f64) -> Vec<RankedPoint> {
    find_nearby_in(CATALOG, origin, radius_km)
}

/// Rank `catalog` entries around `origin`.
///
/// An entry at exactly the origin is not "nearby" and is skipped. Ties keep
/// catalog order. At most [`MAX_RESULTS`] entries are returned.
pub fn find_nearby_in(catalog: &[GeoPoint], origin: Coordinates, radius_km: f64) -> Vec<RankedPoint> {
    let mut ranked: Vec<RankedPoint> = catalog
        .iter()
        .map(|point| RankedPoint {
            point: *point,
            distance_km: haversine_km(origin, point.coordinates()),
        })
        .filter(|r| r.distance_km > 0.0 && r.distance_km <= radius_km)
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(MAX_RESULTS);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(name: &'static str, latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint { name, country: "XX", state: None, latitude, longitude }
    }

    fn by_name(name: &str) -> GeoPoint {
        *CATALOG.iter().find(|p| p.name == name).expect("city must be in catalog")
    }

    const LONDON: Coordinates = Coordinates { lat: 51.5074, lon: -0.1278 };

    #[test]
    fn known_distances() {
        let paris = by_name("Paris").coordinates();
        assert_relative_eq!(haversine_km(LONDON, paris), 343.5, epsilon = 1.5);

        let new_york = by_name("New York").coordinates();
        assert_relative_eq!(haversine_km(LONDON, new_york), 5570.0, epsilon = 10.0);
    }

    #[test]
    fn distance_is_symmetric_and_zero_at_origin() {
        let berlin = by_name("Berlin").coordinates();
        assert_relative_eq!(haversine_km(LONDON, berlin), haversine_km(berlin, LONDON));
        assert_eq!(haversine_km(LONDON, LONDON), 0.0);
    }

    #[test]
    fn longitude_wraparound_takes_short_way() {
        let catalog = [point("East", 0.0, -179.9)];
        let result = find_nearby_in(&catalog, Coordinates::new(0.0, 179.9), 100.0);

        assert_eq!(result.len(), 1);
        // 0.2 degrees of arc on the equator
        assert_relative_eq!(result[0].distance_km, 22.24, epsilon = 0.05);
    }

    #[test]
    fn poles_produce_finite_distances() {
        for lat in [90.0, -90.0] {
            let pole = Coordinates::new(lat, 0.0);
            for entry in CATALOG {
                let d = haversine_km(pole, entry.coordinates());
                assert!(d.is_finite() && d >= 0.0, "{} from {lat}: {d}", entry.name);
            }

            let result = find_nearby(pole, 25_000.0);
            assert_eq!(result.len(), MAX_RESULTS);
            assert!(result.iter().all(|r| r.distance_km.is_finite()));
        }
    }

    #[test]
    fn antipodes_do_not_produce_nan() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert_relative_eq!(d, std::f64::consts::PI * EARTH_RADIUS_KM, epsilon = 1e-6);
    }

    #[test]
    fn origin_on_catalog_entry_is_excluded() {
        let result = find_nearby(LONDON, 1000.0);
        assert!(result.iter().all(|r| r.point.name != "London"));
    }

    #[test]
    fn results_from_london_follow_catalog_distances() {
        let result = find_nearby(LONDON, 1000.0);
        let names: Vec<&str> = result.iter().map(|r| r.point.name).collect();

        let brussels = names.iter().position(|n| *n == "Brussels").unwrap();
        let paris = names.iter().position(|n| *n == "Paris").unwrap();
        assert!(brussels < paris, "{names:?}");
        assert_eq!(names[0], "Birmingham");

        let subset = [by_name("Berlin"), by_name("Paris"), by_name("Brussels")];
        let ranked: Vec<&str> = find_nearby_in(&subset, LONDON, 1000.0)
            .iter()
            .map(|r| r.point.name)
            .collect();
        assert_eq!(ranked, vec!["Brussels", "Paris", "Berlin"]);
    }

    #[test]
    fn nothing_near_london_within_default_radius() {
        assert!(find_nearby(LONDON, DEFAULT_RADIUS_KM).is_empty());
    }

    #[test]
    fn radius_filters_and_limit_applies() {
        let catalog: Vec<GeoPoint> = (1..=15).map(|i| point("Step", 0.0, f64::from(i) * 0.1)).collect();
        let origin = Coordinates::new(0.0, 0.0);

        let all = find_nearby_in(&catalog, origin, 1000.0);
        assert_eq!(all.len(), MAX_RESULTS);
        assert_relative_eq!(all[0].distance_km, 11.12, epsilon = 0.01);

        let close = find_nearby_in(&catalog, origin, 35.0);
        assert_eq!(close.len(), 3);
        assert!(close.iter().all(|r| r.distance_km <= 35.0));
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = [
            point("North", 1.0, 0.0),
            point("East", 0.0, 1.0),
            point("South", -1.0, 0.0),
            point("Near", 0.0, 0.5),
        ];
        let result = find_nearby_in(&catalog, Coordinates::new(0.0, 0.0), 500.0);
        let names: Vec<&str> = result.iter().map(|r| r.point.name).collect();
        assert_eq!(names, vec!["Near", "North", "East", "South"]);
    }

    #[test]
    fn results_respect_invariants_across_the_globe() {
        let radius = 1500.0;
        for lat_step in 0..=12 {
            for lon_step in 0..=12 {
                let origin = Coordinates::new(-90.0 + 15.0 * f64::from(lat_step), -180.0 + 30.0 * f64::from(lon_step));
                let result = find_nearby(origin, radius);

                assert!(result.len() <= MAX_RESULTS);
                for r in &result {
                    assert!(r.distance_km.is_finite());
                    assert!(r.distance_km > 0.0 && r.distance_km <= radius);
                }
                assert!(result.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
            }
        }
    }
}
