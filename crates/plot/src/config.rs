//! Session configuration: JSON file plus `PLOT_*` environment overrides.

use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use geometry::ValidityRules;
use scene::picking::PickPolicy;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

/// Backend endpoints, relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub base_url: String,
    pub area_draw: String,
    pub plot_details: String,
    pub no_fly_zones: String,
    pub no_fly_zone_check: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            area_draw: "/plot/areaDraw".to_string(),
            plot_details: "/plot/details".to_string(),
            no_fly_zones: "/noFlyZone/list".to_string(),
            no_fly_zone_check: "/noFlyZone/checkByDrawArea".to_string(),
        }
    }
}

impl Endpoints {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub refresh_debounce_ms: u64,
    /// Depth picks on flat entities below this altitude fall back to terrain.
    pub terrain_entity_altitude: f64,
    /// Accept `(0, 0)` as a valid position.
    pub origin_is_valid: bool,
    /// Interpolation steps per edge when sampling terrain under a highlight.
    pub interpolation_steps: usize,
    pub highlight_wall_height_m: f64,
    /// Rings with more vertices are not highlighted at all.
    pub highlight_max_vertices: usize,
    /// Rings with more vertices get a flat highlight instead of a sampled one.
    pub terrain_highlight_max_vertices: usize,
    pub scenic_wall_height_m: f64,
    pub label_display_distance_m: f64,
    pub range_radius_m: f64,
    pub no_fly_radius_m: f64,
    pub decode_chunk_size: usize,
    pub bezier_samples: usize,
    pub no_fly_class_value: i64,
    pub flood_rise_m_per_frame: f64,
    /// Approximate number of terrain samples taken for a flood analysis.
    pub flood_grid_points: usize,
    pub fly_to_duration_s: f64,
    pub endpoints: Endpoints,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            refresh_debounce_ms: 400,
            terrain_entity_altitude: -100.0,
            origin_is_valid: true,
            interpolation_steps: 100,
            highlight_wall_height_m: 10.0,
            highlight_max_vertices: 100,
            terrain_highlight_max_vertices: 10,
            scenic_wall_height_m: 20.0,
            label_display_distance_m: 50_000.0,
            range_radius_m: 3000.0,
            no_fly_radius_m: 50_000.0,
            decode_chunk_size: 10,
            bezier_samples: 20,
            no_fly_class_value: 9,
            flood_rise_m_per_frame: 0.5,
            flood_grid_points: 10_000,
            fly_to_duration_s: 1.0,
            endpoints: Endpoints::default(),
        }
    }
}

impl PlotConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }

    /// Applies `PLOT_*` overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| env::var(key).ok())
    }

    /// Applies `PLOT_*` overrides from `lookup`. A value that does not
    /// parse is logged and the current setting kept.
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str, slot: &mut dyn Override| {
            if let Some(raw) = lookup(key)
                && !slot.parse_into(raw.trim())
            {
                warn!(key, value = %raw, "ignoring unparseable config override");
            }
        };

        set("PLOT_REFRESH_DEBOUNCE_MS", &mut self.refresh_debounce_ms);
        set("PLOT_TERRAIN_ENTITY_ALTITUDE", &mut self.terrain_entity_altitude);
        set("PLOT_ORIGIN_IS_VALID", &mut self.origin_is_valid);
        set("PLOT_INTERPOLATION_STEPS", &mut self.interpolation_steps);
        set("PLOT_HIGHLIGHT_WALL_HEIGHT_M", &mut self.highlight_wall_height_m);
        set("PLOT_HIGHLIGHT_MAX_VERTICES", &mut self.highlight_max_vertices);
        set(
            "PLOT_TERRAIN_HIGHLIGHT_MAX_VERTICES",
            &mut self.terrain_highlight_max_vertices,
        );
        set("PLOT_SCENIC_WALL_HEIGHT_M", &mut self.scenic_wall_height_m);
        set("PLOT_LABEL_DISPLAY_DISTANCE_M", &mut self.label_display_distance_m);
        set("PLOT_RANGE_RADIUS_M", &mut self.range_radius_m);
        set("PLOT_NO_FLY_RADIUS_M", &mut self.no_fly_radius_m);
        set("PLOT_DECODE_CHUNK_SIZE", &mut self.decode_chunk_size);
        set("PLOT_BEZIER_SAMPLES", &mut self.bezier_samples);
        set("PLOT_NO_FLY_CLASS_VALUE", &mut self.no_fly_class_value);
        set("PLOT_FLOOD_RISE_M_PER_FRAME", &mut self.flood_rise_m_per_frame);
        set("PLOT_FLOOD_GRID_POINTS", &mut self.flood_grid_points);
        set("PLOT_FLY_TO_DURATION_S", &mut self.fly_to_duration_s);
        if let Some(url) = lookup("PLOT_BASE_URL") {
            self.endpoints.base_url = url;
        }
        self
    }

    pub fn refresh_delay_s(&self) -> f64 {
        self.refresh_debounce_ms as f64 / 1000.0
    }

    pub fn pick_policy(&self) -> PickPolicy {
        PickPolicy {
            terrain_entity_altitude: self.terrain_entity_altitude,
        }
    }

    pub fn validity_rules(&self) -> ValidityRules {
        ValidityRules {
            origin_is_valid: self.origin_is_valid,
        }
    }
}

/// A config field that can be replaced from its text form.
trait Override {
    /// Returns false, leaving the value untouched, when `raw` does not parse.
    fn parse_into(&mut self, raw: &str) -> bool;
}

impl<T: FromStr> Override for T {
    fn parse_into(&mut self, raw: &str) -> bool {
        match raw.parse() {
            Ok(value) => {
                *self = value;
                true
            }
            Err(_) => false,
        }
    }
}
