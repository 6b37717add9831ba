//! Delivery pricing and geofencing.
//!
//! Pricing is a pure computation over a measured distance and the cart's
//! total weight. Resolving a free-text address into a coordinate is an
//! external collaborator's job; [`distance_between`] is provided for
//! callers that already hold two coordinates.

use serde::Deserialize;

/// Mean Earth radius in metres, used for great-circle distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Delivery pricing parameters and the delivery zone.
///
/// All fields are configurable through `config.toml`; the defaults match
/// the storefront's published pricing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeliveryPricing {
    /// Euros charged per kilometre
    pub per_km_rate: f64,
    /// Minimum delivery fee in euros
    pub minimum_fee: f64,
    /// Weight in kilograms carried without surcharge
    pub free_weight_kg: f64,
    /// Euros charged per kilogram above the free threshold
    pub per_kg_surcharge: f64,
    /// Radius of the delivery zone in metres
    pub zone_radius_m: f64,
    /// Pickup point the zone and all distances are measured from
    pub origin: Coordinate,
}

impl Default for DeliveryPricing {
    fn default() -> Self {
        Self {
            per_km_rate: 2.0,
            minimum_fee: 5.0,
            free_weight_kg: 5.0,
            per_kg_surcharge: 1.0,
            zone_radius_m: 20_000.0,
            // The bakery's pickup point in Itäkeskus, Turku
            origin: Coordinate {
                lat: 60.442_764,
                lng: 22.359_507,
            },
        }
    }
}

impl DeliveryPricing {
    /// Computes the delivery cost in whole euros for an order travelling
    /// `distance_m` metres and weighing `weight_kg` kilograms.
    ///
    /// The distance charge is floored at the minimum fee; weight above
    /// the free threshold adds a per-kilogram surcharge; the sum is
    /// rounded up to the next whole euro.
    #[must_use]
    pub fn cost(&self, distance_m: f64, weight_kg: f64) -> f64 {
        let distance_km = distance_m / 1000.0;
        let base = f64::max(self.minimum_fee, distance_km * self.per_km_rate);
        let surcharge = f64::max(0.0, weight_kg - self.free_weight_kg) * self.per_kg_surcharge;
        (base + surcharge).ceil()
    }

    /// Whether an address at `distance_m` metres from the origin is
    /// eligible for delivery.
    #[must_use]
    pub fn within_zone(&self, distance_m: f64) -> bool {
        distance_m <= self.zone_radius_m
    }
}

/// Great-circle (haversine) distance between two coordinates in metres.
#[must_use]
pub fn distance_between(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
