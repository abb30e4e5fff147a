use std::fmt;

use crate::record::PlotId;

/// What a rendered graphic is, carried explicitly instead of being inferred
/// from its key string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GraphicKind {
    Point,
    /// Polyline name/total label anchored at the line's centre.
    PolylineLabel,
    /// Segment `i` of a polyline, with its own distance label.
    PolylineSegment(usize),
    Polygon,
    ScenicSpotWall,
    Text,
    Highlight,
}

impl GraphicKind {
    fn suffix(&self) -> String {
        match self {
            GraphicKind::Point => "plotPoint".to_string(),
            GraphicKind::PolylineLabel => "plotPolyline".to_string(),
            GraphicKind::PolylineSegment(i) => format!("plotPolyline_{i}"),
            GraphicKind::Polygon => "plotPolygon".to_string(),
            GraphicKind::ScenicSpotWall => "scenicSpotPlotWall".to_string(),
            GraphicKind::Text => "plotText".to_string(),
            GraphicKind::Highlight => "plotHighlightGraphic".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GraphicTag {
    pub plot: PlotId,
    pub kind: GraphicKind,
}

impl GraphicTag {
    pub fn new(plot: PlotId, kind: GraphicKind) -> Self {
        Self { plot, kind }
    }

    /// Entity key, `${id}_${kind}`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.plot, self.kind.suffix())
    }

    /// Inverse of `key`, for ids handed back by an external picker.
    pub fn parse(key: &str) -> Option<Self> {
        let (id, rest) = key.split_once('_')?;
        let plot = PlotId(id.parse().ok()?);
        let kind = match rest {
            "plotPoint" => GraphicKind::Point,
            "plotPolyline" => GraphicKind::PolylineLabel,
            "plotPolygon" => GraphicKind::Polygon,
            "scenicSpotPlotWall" => GraphicKind::ScenicSpotWall,
            "plotText" => GraphicKind::Text,
            "plotHighlightGraphic" => GraphicKind::Highlight,
            other => {
                let index = other.strip_prefix("plotPolyline_")?.parse().ok()?;
                GraphicKind::PolylineSegment(index)
            }
        };
        Some(Self { plot, kind })
    }
}

impl fmt::Display for GraphicTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphicKind, GraphicTag};
    use crate::record::PlotId;

    #[test]
    fn keys_follow_id_kind_layout() {
        let tag = GraphicTag::new(PlotId(42), GraphicKind::PolylineSegment(3));
        assert_eq!(tag.key(), "42_plotPolyline_3");
        assert_eq!(GraphicTag::new(PlotId(5), GraphicKind::Point).to_string(), "5_plotPoint");
    }

    #[test]
    fn parse_inverts_key() {
        for kind in [
            GraphicKind::Point,
            GraphicKind::PolylineLabel,
            GraphicKind::PolylineSegment(0),
            GraphicKind::Polygon,
            GraphicKind::ScenicSpotWall,
            GraphicKind::Text,
            GraphicKind::Highlight,
        ] {
            let tag = GraphicTag::new(PlotId(9), kind);
            assert_eq!(GraphicTag::parse(&tag.key()), Some(tag));
        }
    }

    #[test]
    fn parse_rejects_foreign_keys() {
        assert_eq!(GraphicTag::parse("plotGraphicBaseEntity"), None);
        assert_eq!(GraphicTag::parse("12_somethingElse"), None);
        assert_eq!(GraphicTag::parse("12_plotPolyline_x"), None);
        assert_eq!(GraphicTag::parse("x_plotPoint"), None);
    }
}
