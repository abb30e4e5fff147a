use foundation::math::Ecef;

use crate::components::Color;

/// Water-fill animation: the extruded height rises by `step_m` per frame
/// until it reaches `target_m`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloodExtrusion {
    pub current_m: f64,
    pub target_m: f64,
    pub step_m: f64,
}

impl FloodExtrusion {
    pub fn new(from_m: f64, target_m: f64, step_m: f64) -> Self {
        Self {
            current_m: from_m.min(target_m),
            target_m,
            step_m,
        }
    }

    /// Advances one frame and returns the new height.
    pub fn advance(&mut self) -> f64 {
        self.current_m = (self.current_m + self.step_m).min(self.target_m);
        self.current_m
    }

    pub fn is_done(&self) -> bool {
        self.current_m >= self.target_m
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGraphic {
    pub hierarchy: Vec<Ecef>,
    pub color: Color,
    pub z_index: i32,
    pub per_position_height: bool,
    pub extrusion: Option<FloodExtrusion>,
    pub show: bool,
}

impl PolygonGraphic {
    pub fn filled(hierarchy: Vec<Ecef>, color: Color, z_index: i32) -> Self {
        Self {
            hierarchy,
            color,
            z_index,
            per_position_height: false,
            extrusion: None,
            show: true,
        }
    }
}
