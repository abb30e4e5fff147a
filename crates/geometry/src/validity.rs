use std::sync::LazyLock;

use foundation::math::GeoPosition;
use regex::Regex;

static LONGITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:(?:0?\d{1,2}|1[0-7]\d)(?:\.\d+)?|180(?:\.0+)?)$")
        .expect("longitude pattern")
});

static LATITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:[0-8]?\d(?:\.\d+)?|90(?:\.0+)?)$").expect("latitude pattern")
});

/// Validation knobs for device-reported positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValidityRules {
    /// Devices report `(0, 0)` before they have a fix; treat it as valid so
    /// "unset" positions pass through to the caller.
    pub origin_is_valid: bool,
}

impl Default for ValidityRules {
    fn default() -> Self {
        Self {
            origin_is_valid: true,
        }
    }
}

pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && LONGITUDE_RE.is_match(&lon.to_string())
}

pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && LATITUDE_RE.is_match(&lat.to_string())
}

/// Decimal-format check of longitude in [-180, 180] and latitude in [-90, 90].
/// Altitude is not checked.
pub fn is_valid_position(pos: &GeoPosition, rules: ValidityRules) -> bool {
    if rules.origin_is_valid && pos.longitude == 0.0 && pos.latitude == 0.0 {
        return true;
    }
    is_valid_longitude(pos.longitude) && is_valid_latitude(pos.latitude)
}
