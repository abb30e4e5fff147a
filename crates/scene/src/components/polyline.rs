use foundation::math::Ecef;

use crate::components::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineGraphic {
    pub positions: Vec<Ecef>,
    pub color: Color,
    pub width: f32,
    /// Drawn dashed where the line is hidden behind terrain.
    pub dashed_when_occluded: bool,
    pub show: bool,
}

impl PolylineGraphic {
    pub fn solid(positions: Vec<Ecef>, color: Color, width: f32) -> Self {
        Self {
            positions,
            color,
            width,
            dashed_when_occluded: true,
            show: true,
        }
    }
}
