use foundation::math::{GeoPosition, Vec3};
use geo::{Centroid, Coord, GeodesicArea, LineString, Polygon};

/// Closed rings need at least a triangle plus the repeated first point.
pub const MIN_CLOSED_RING_LEN: usize = 4;

/// A ring is usable when it has at least four points and is explicitly closed.
pub fn is_closed_ring(ring: &[GeoPosition]) -> bool {
    ring.len() >= MIN_CLOSED_RING_LEN
        && ring
            .first()
            .zip(ring.last())
            .is_some_and(|(a, b)| a.longitude == b.longitude && a.latitude == b.latitude)
}

/// Appends the first vertex when the ring is open. Empty input stays empty.
pub fn close_ring(vertices: &[GeoPosition]) -> Vec<GeoPosition> {
    let mut ring = vertices.to_vec();
    if let (Some(first), Some(last)) = (vertices.first(), vertices.last())
        && (first.longitude != last.longitude || first.latitude != last.latitude)
    {
        ring.push(*first);
    }
    ring
}

fn to_polygon(ring: &[GeoPosition]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring
        .iter()
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Geodesic area (square meters) of a closed lon/lat ring, `0.0` for
/// degenerate input.
pub fn polygon_area(ring: &[GeoPosition]) -> f64 {
    if !is_closed_ring(ring) {
        return 0.0;
    }
    let area = to_polygon(ring).geodesic_area_unsigned();
    if area.is_finite() { area } else { 0.0 }
}

/// Planar centroid of a closed lon/lat ring. The altitude is the mean vertex
/// altitude (closing point excluded).
pub fn polygon_centroid(ring: &[GeoPosition]) -> Option<GeoPosition> {
    if !is_closed_ring(ring) {
        return None;
    }
    let point = to_polygon(ring).centroid()?;
    let vertices = &ring[..ring.len() - 1];
    let altitude = vertices.iter().map(|p| p.altitude).sum::<f64>() / vertices.len() as f64;
    Some(GeoPosition::new(point.x(), point.y(), altitude).rounded())
}

/// Area of a world-space triangle (square meters).
pub fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    (b - a).cross(c - a).length() * 0.5
}

/// Lon/lat bounding box `(west, south, east, north)` of the vertices.
pub fn bbox(vertices: &[GeoPosition]) -> Option<[f64; 4]> {
    let first = vertices.first()?;
    let mut out = [first.longitude, first.latitude, first.longitude, first.latitude];
    for p in &vertices[1..] {
        out[0] = out[0].min(p.longitude);
        out[1] = out[1].min(p.latitude);
        out[2] = out[2].max(p.longitude);
        out[3] = out[3].max(p.latitude);
    }
    Some(out)
}
