//! Label text for annotation graphics.

use foundation::math::{GeoPosition, format_number};

/// Square meters per mu.
const M2_PER_MU: f64 = 666.6667;
const TEXT_LINE_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum LabelContent<'a> {
    /// Name, plus coordinates when the point is selected.
    Point {
        name: &'a str,
        position: Option<GeoPosition>,
    },
    /// Name and total length (m), or a single segment length (m).
    Polyline {
        name: &'a str,
        total: Option<f64>,
        segment: Option<f64>,
    },
    Polygon {
        name: &'a str,
        area: Option<f64>,
    },
    Text {
        name: &'a str,
    },
}

fn name_line(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("{name}\n")
    }
}

fn length_text(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{}km", format_number(Some(meters / 1000.0), 1))
    } else {
        format!("{meters}m")
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

pub fn format_graphic_label_text(content: &LabelContent<'_>) -> String {
    match content {
        LabelContent::Point { name, position } => {
            let mut text = name_line(name);
            if let Some(p) = position {
                if p.longitude != 0.0 {
                    text.push_str(&format!("Lon: {}\n", format_number(Some(p.longitude), 7)));
                }
                if p.latitude != 0.0 {
                    text.push_str(&format!("Lat: {}\n", format_number(Some(p.latitude), 7)));
                }
                text.push_str(&format!("Alt: {}m", format_number(Some(p.altitude), 1)));
            }
            text
        }
        LabelContent::Polyline {
            name,
            total,
            segment,
        } => {
            let mut text = name_line(name);
            if let Some(total) = nonzero(*total) {
                text.push_str(&format!("Total: {}", length_text(total)));
            }
            if let Some(segment) = nonzero(*segment) {
                text.push_str(&length_text(segment));
            }
            text
        }
        LabelContent::Polygon { name, area } => {
            format!("{}{}", name_line(name), area_conversion(*area))
        }
        LabelContent::Text { name } => slice_text(name, TEXT_LINE_CHARS).join("\n"),
    }
}

/// Area as mu plus km² (from 0.1 km²) or m². Empty for missing or zero area.
pub fn area_conversion(area_m2: Option<f64>) -> String {
    let Some(area) = nonzero(area_m2) else {
        return String::new();
    };
    let mu = format!("{}mu", format_number(Some(area / M2_PER_MU), 2));
    let km2 = format_number(Some(area / 1.0e6), 2);
    if km2.parse::<f64>().is_ok_and(|v| v >= 0.1) {
        format!("{mu}\n{km2}km²")
    } else {
        format!("{mu}\n{}m²", format_number(Some(area), 2))
    }
}

/// Splits `text` into chunks of at most `chars` characters.
pub fn slice_text(text: &str, chars: usize) -> Vec<String> {
    let chars = chars.max(1);
    let all: Vec<char> = text.chars().collect();
    all.chunks(chars).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::{LabelContent, area_conversion, format_graphic_label_text, slice_text};
    use foundation::math::GeoPosition;
    use pretty_assertions::assert_eq;

    #[test]
    fn point_labels() {
        let plain = LabelContent::Point {
            name: "Gate",
            position: None,
        };
        assert_eq!(format_graphic_label_text(&plain), "Gate\n");

        let detailed = LabelContent::Point {
            name: "Gate",
            position: Some(GeoPosition::new(117.1234567, 39.5, 12.34)),
        };
        assert_eq!(
            format_graphic_label_text(&detailed),
            "Gate\nLon: 117.1234567\nLat: 39.5000000\nAlt: 12.3m"
        );

        let zero_alt = LabelContent::Point {
            name: "",
            position: Some(GeoPosition::new(1.0, 2.0, 0.0)),
        };
        assert_eq!(
            format_graphic_label_text(&zero_alt),
            "Lon: 1.0000000\nLat: 2.0000000\nAlt: 0m"
        );
    }

    #[test]
    fn polyline_labels_switch_to_km() {
        let short = LabelContent::Polyline {
            name: "Road",
            total: Some(523.5),
            segment: None,
        };
        assert_eq!(format_graphic_label_text(&short), "Road\nTotal: 523.5m");

        let long = LabelContent::Polyline {
            name: "",
            total: None,
            segment: Some(1234.0),
        };
        assert_eq!(format_graphic_label_text(&long), "1.2km");

        let empty = LabelContent::Polyline {
            name: "",
            total: Some(0.0),
            segment: None,
        };
        assert_eq!(format_graphic_label_text(&empty), "");
    }

    #[test]
    fn polygon_area_units() {
        assert_eq!(area_conversion(None), "");
        assert_eq!(area_conversion(Some(1000.0)), "1.50mu\n1000.00m²");
        assert_eq!(area_conversion(Some(250_000.0)), "375.00mu\n0.25km²");
        let text = format_graphic_label_text(&LabelContent::Polygon {
            name: "Lake",
            area: Some(1000.0),
        });
        assert_eq!(text, "Lake\n1.50mu\n1000.00m²");
    }

    #[test]
    fn text_labels_wrap_every_ten_chars() {
        let text = format_graphic_label_text(&LabelContent::Text {
            name: "abcdefghijklmnopqrstuvw",
        });
        assert_eq!(text, "abcdefghij\nklmnopqrst\nuvw");
        assert_eq!(slice_text("", 10), Vec::<String>::new());
        assert_eq!(slice_text("水库管理站北门", 3), vec!["水库管", "理站北", "门"]);
    }
}
