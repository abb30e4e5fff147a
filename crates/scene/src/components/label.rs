use crate::components::{Color, DistanceDisplay, NearFarScalar};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelStyle {
    Fill,
    FillAndOutline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelGraphic {
    pub text: String,
    pub font: String,
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_width: f32,
    pub style: LabelStyle,
    /// Always drawn on top of terrain and models.
    pub disable_depth_test: bool,
    pub display: DistanceDisplay,
    pub scale_by_distance: NearFarScalar,
    pub show: bool,
}

impl LabelGraphic {
    pub const DEFAULT_FONT: &'static str = "30px sans-serif";

    /// White text with a black outline, the annotation default.
    pub fn outlined(text: impl Into<String>, display: DistanceDisplay) -> Self {
        Self {
            text: text.into(),
            font: Self::DEFAULT_FONT.to_string(),
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            outline_width: 2.0,
            style: LabelStyle::FillAndOutline,
            disable_depth_test: true,
            display,
            scale_by_distance: NearFarScalar::new(1.0e2, 0.6, 0.7e4, 0.5),
            show: true,
        }
    }

    /// Plain filled text without outline.
    pub fn filled(text: impl Into<String>, fill_color: Color, display: DistanceDisplay) -> Self {
        Self {
            fill_color,
            outline_width: 0.0,
            style: LabelStyle::Fill,
            ..Self::outlined(text, display)
        }
    }

    /// Font size in pixels parsed from the CSS font shorthand.
    pub fn font_size_px(&self) -> Option<f32> {
        self.font
            .split_whitespace()
            .find_map(|part| part.strip_suffix("px")?.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelGraphic, LabelStyle};
    use crate::components::{Color, DistanceDisplay};

    #[test]
    fn outlined_defaults() {
        let label = LabelGraphic::outlined("A", DistanceDisplay::up_to(50_000.0));
        assert_eq!(label.style, LabelStyle::FillAndOutline);
        assert_eq!(label.font_size_px(), Some(30.0));
        assert!(label.disable_depth_test);
    }

    #[test]
    fn filled_drops_outline() {
        let label = LabelGraphic::filled("B", Color::RED, DistanceDisplay::up_to(1.0));
        assert_eq!(label.outline_width, 0.0);
        assert_eq!(label.fill_color, Color::RED);
    }
}
