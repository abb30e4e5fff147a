use foundation::math::GeoPosition;
use geo::{Distance, Geodesic, Point};

/// How segment lengths are measured.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DistanceMode {
    /// Along the WGS84 ellipsoid surface, ignoring altitude.
    #[default]
    Geodesic,
    /// Straight line through world space, altitude included.
    Cartesian,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub start: GeoPosition,
    pub end: GeoPosition,
    pub center: GeoPosition,
    /// Meters, never negative.
    pub distance: f64,
}

pub fn distance(a: GeoPosition, b: GeoPosition, mode: DistanceMode) -> f64 {
    let d = match mode {
        DistanceMode::Geodesic => Geodesic.distance(
            Point::new(a.longitude, a.latitude),
            Point::new(b.longitude, b.latitude),
        ),
        DistanceMode::Cartesian => a.to_cartesian().distance(b.to_cartesian()),
    };
    if d.is_finite() { d.abs() } else { 0.0 }
}

/// Surface midpoint: horizontal position from the world-space chord midpoint,
/// altitude averaged between the ends.
pub fn midpoint(a: GeoPosition, b: GeoPosition) -> GeoPosition {
    let chord_mid = a.to_cartesian().lerp(b.to_cartesian(), 0.5);
    let altitude = (a.altitude + b.altitude) * 0.5;
    match GeoPosition::from_cartesian(chord_mid) {
        Some(p) => p.with_altitude(altitude).rounded(),
        // Antipodal ends: the chord passes through the centre.
        None => GeoPosition::new(a.longitude, a.latitude, altitude),
    }
}

/// Adjacent pairs `[p0,p1], [p1,p2], ...` with midpoint and length.
pub fn segments(points: &[GeoPosition], mode: DistanceMode) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| Segment {
            start: pair[0],
            end: pair[1],
            center: midpoint(pair[0], pair[1]),
            distance: distance(pair[0], pair[1], mode),
        })
        .collect()
}

pub fn polyline_length(points: &[GeoPosition], mode: DistanceMode) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(pair[0], pair[1], mode))
        .sum()
}

/// Straight world-space interpolation from `a` to `b`: the two ends plus
/// `steps - 1` evenly spaced interior points (`steps + 1` points in total).
pub fn interpolate_edge(a: GeoPosition, b: GeoPosition, steps: usize) -> Vec<GeoPosition> {
    let steps = steps.max(1);
    let start = a.to_cartesian();
    let end = b.to_cartesian();

    let mut out = Vec::with_capacity(steps + 1);
    out.push(a);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        if let Some(p) = GeoPosition::from_cartesian(start.lerp(end, t)) {
            out.push(p);
        }
    }
    out.push(b);
    out
}

/// Closed list of edges `[v0,v1], ..., [vn-1,v0]` for a vertex ring.
pub fn ring_edges(vertices: &[GeoPosition]) -> Vec<(GeoPosition, GeoPosition)> {
    let mut edges: Vec<(GeoPosition, GeoPosition)> =
        vertices.windows(2).map(|pair| (pair[0], pair[1])).collect();
    if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
        edges.push((*last, *first));
    }
    edges
}
