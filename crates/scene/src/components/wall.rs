use foundation::math::{Ecef, GeoPosition};

use crate::components::Color;

/// Vertical curtain along a path: for every path vertex the wall spans from
/// `minimum_heights[i]` to `maximum_heights[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGraphic {
    /// Longitude/latitude of each wall column; the altitude is ignored.
    pub path: Vec<GeoPosition>,
    pub minimum_heights: Vec<f64>,
    pub maximum_heights: Vec<f64>,
    pub color: Color,
    /// Animated trail texture scrolling along the wall.
    pub trail_image: Option<String>,
    pub trail_duration_ms: u32,
    pub show: bool,
}

impl WallGraphic {
    /// Wall whose top sits `height` meters above its bottom.
    pub fn with_height(path: Vec<GeoPosition>, minimum_heights: Vec<f64>, height: f64, color: Color) -> Self {
        let maximum_heights = minimum_heights.iter().map(|h| h + height).collect();
        Self {
            path,
            minimum_heights,
            maximum_heights,
            color,
            trail_image: None,
            trail_duration_ms: 1000,
            show: true,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.path.len() == self.minimum_heights.len()
            && self.path.len() == self.maximum_heights.len()
    }

    /// World-space corners (bottom and top of every column).
    pub fn corners(&self) -> Vec<Ecef> {
        let mut out = Vec::with_capacity(self.path.len() * 2);
        for (i, p) in self.path.iter().enumerate() {
            let (Some(lo), Some(hi)) = (self.minimum_heights.get(i), self.maximum_heights.get(i))
            else {
                continue;
            };
            out.push(p.with_altitude(*lo).to_cartesian());
            out.push(p.with_altitude(*hi).to_cartesian());
        }
        out
    }
}
