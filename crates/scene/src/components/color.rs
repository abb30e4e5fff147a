/// Linear RGBA color, components in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(1.0, 1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`.
    pub fn from_css(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::from_bytes(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Some(Self::from_bytes(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::from_bytes(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::from_bytes(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `from_css`, falling back to `default` for missing or malformed input.
    pub fn from_css_or(value: Option<&str>, default: Color) -> Self {
        value.and_then(Self::from_css).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::from_css("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_css("#000000"), Some(Color::BLACK));
        assert_eq!(Color::from_css("#ff000080"), Some(Color::from_bytes(255, 0, 0, 128)));
        assert_eq!(Color::from_css("#17E980").map(|c| c.a), Some(1.0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Color::from_css("fff"), None);
        assert_eq!(Color::from_css("#ggg"), None);
        assert_eq!(Color::from_css("#12345"), None);
        assert_eq!(Color::from_css_or(Some("red"), Color::RED), Color::RED);
        assert_eq!(Color::from_css_or(None, Color::WHITE.with_alpha(0.6)).a, 0.6);
    }
}
