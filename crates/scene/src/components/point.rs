use crate::components::{Color, DistanceDisplay, NearFarScalar};

#[derive(Debug, Clone, PartialEq)]
pub struct PointGraphic {
    pub color: Color,
    pub pixel_size: f32,
    pub outline_color: Color,
    pub outline_width: f32,
    pub display: DistanceDisplay,
    pub scale_by_distance: NearFarScalar,
    pub show: bool,
}

impl PointGraphic {
    pub fn marker(color: Color, display: DistanceDisplay) -> Self {
        Self {
            color,
            pixel_size: 14.0,
            outline_color: Color::WHITE,
            outline_width: 2.0,
            display,
            scale_by_distance: NearFarScalar::new(1.0e2, 1.0, 0.7e4, 0.8),
            show: true,
        }
    }
}
