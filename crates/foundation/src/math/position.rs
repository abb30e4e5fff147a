//! `GeoPosition`: the degrees/meters shape every annotation record uses.
//!
//! Conversions out of Cartesian space round to a fixed precision so values
//! compare stably after a round trip: 7 decimals for longitude/latitude,
//! 2 decimals for altitude.

use serde::{Deserialize, Serialize};

use super::{Ecef, Geodetic, ecef_to_geodetic, geodetic_to_ecef};

pub const LON_LAT_DECIMALS: i32 = 7;
pub const ALTITUDE_DECIMALS: i32 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl GeoPosition {
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }

    pub fn from_geodetic(geo: Geodetic) -> Self {
        Self::new(geo.lon_deg(), geo.lat_deg(), geo.alt_m).rounded()
    }

    pub fn to_geodetic(self) -> Geodetic {
        Geodetic::from_degrees(self.longitude, self.latitude, self.altitude)
    }

    /// Converts a world point, `None` when it has no geodetic position.
    pub fn from_cartesian(ecef: Ecef) -> Option<Self> {
        ecef_to_geodetic(ecef).map(Self::from_geodetic)
    }

    pub fn to_cartesian(self) -> Ecef {
        geodetic_to_ecef(self.to_geodetic())
    }

    pub fn rounded(self) -> Self {
        Self::new(
            round_to(self.longitude, LON_LAT_DECIMALS),
            round_to(self.latitude, LON_LAT_DECIMALS),
            round_to(self.altitude, ALTITUDE_DECIMALS),
        )
    }

    pub fn with_altitude(self, altitude: f64) -> Self {
        Self { altitude, ..self }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Fixed-precision text, `0` for missing, zero or non-finite values.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format!("{v:.decimals$}"),
        _ => "0".to_string(),
    }
}

/// `num / total` as a percentage rounded to two decimals.
pub fn percentage(num: f64, total: f64) -> f64 {
    if num == 0.0 || total == 0.0 {
        return 0.0;
    }
    (num / total * 10_000.0).round() / 100.0
}
