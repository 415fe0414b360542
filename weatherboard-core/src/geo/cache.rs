//! Caller-owned, time-boxed cache around [`find_nearby`](super::find_nearby).
//!
//! TTL: 30 minutes. A lookup hits only if both coordinates are within 0.01
//! degrees of the cached origin and the radius is unchanged.

use chrono::{DateTime, Duration, Utc};

use super::{RankedPoint, find_nearby};
use crate::model::Coordinates;

pub const DEFAULT_TTL_MINUTES: i64 = 30;
pub const DEFAULT_EPSILON_DEG: f64 = 0.01;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<RankedPoint>,
    timestamp: DateTime<Utc>,
    coordinates: Coordinates,
    radius_km: f64,
}

#[derive(Debug, Clone)]
pub struct NearbyCache {
    entry: Option<CacheEntry>,
    ttl: Duration,
    epsilon: f64,
}

impl Default for NearbyCache {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES), DEFAULT_EPSILON_DEG)
    }
}

impl NearbyCache {
    pub fn new(ttl: Duration, epsilon: f64) -> Self {
        Self { entry: None, ttl, epsilon }
    }

    /// Cached result for `origin`, if still fresh at `now`.
    pub fn get(&self, origin: Coordinates, radius_km: f64, now: DateTime<Utc>) -> Option<&[RankedPoint]> {
        let entry = self.entry.as_ref()?;

        let fresh = now - entry.timestamp < self.ttl;
        let same_place = (entry.coordinates.lat - origin.lat).abs() < self.epsilon
            && (entry.coordinates.lon - origin.lon).abs() < self.epsilon;
        let same_radius = entry.radius_km == radius_km;

        (fresh && same_place && same_radius).then_some(entry.data.as_slice())
    }

    /// Replace the cached entry.
    pub fn put(&mut self, origin: Coordinates, radius_km: f64, data: Vec<RankedPoint>, now: DateTime<Utc>) {
        self.entry = Some(CacheEntry {
            data,
            timestamp: now,
            coordinates: origin,
            radius_km,
        });
    }

    /// Return the cached ranking, or rank the catalog and remember the result.
    pub fn get_or_compute(&mut self, origin: Coordinates, radius_km: f64, now: DateTime<Utc>) -> Vec<RankedPoint> {
        if let Some(hit) = self.get(origin, radius_km, now) {
            tracing::debug!(%origin, radius_km, "nearby cache hit");
            return hit.to_vec();
        }

        let ranked = find_nearby(origin, radius_km);
        self.put(origin, radius_km, ranked.clone(), now);
        ranked
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
