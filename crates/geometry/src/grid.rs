use foundation::math::GeoPosition;

/// Mean earth radius used for grid spacing (meters).
const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Regular lon/lat grid inside `bbox = [west, south, east, north]` with
/// roughly `cell_m` meters between neighbours. The grid is centred in the
/// box; an empty or inverted box, or a non-positive spacing, yields nothing.
pub fn point_grid(bbox: [f64; 4], cell_m: f64) -> Vec<GeoPosition> {
    let [west, south, east, north] = bbox;
    if cell_m.is_nan() || cell_m <= 0.0 || east < west || north < south {
        return Vec::new();
    }

    let mid_lat = ((south + north) * 0.5).to_radians();
    let dlat = (cell_m / MEAN_EARTH_RADIUS_M).to_degrees();
    let dlon = dlat / mid_lat.cos().max(1e-9);

    let cols = ((east - west) / dlon).floor() as usize + 1;
    let rows = ((north - south) / dlat).floor() as usize + 1;
    let pad_lon = (east - west - (cols - 1) as f64 * dlon) * 0.5;
    let pad_lat = (north - south - (rows - 1) as f64 * dlat) * 0.5;

    let mut out = Vec::with_capacity(cols * rows);
    for c in 0..cols {
        for r in 0..rows {
            out.push(GeoPosition::new(
                west + pad_lon + c as f64 * dlon,
                south + pad_lat + r as f64 * dlat,
                0.0,
            ));
        }
    }
    out
}

/// Spacing that puts about `target` points into a box of `area_m2`.
pub fn cell_side_for(area_m2: f64, target: usize) -> f64 {
    if area_m2 <= 0.0 || target == 0 {
        return 0.0;
    }
    (area_m2 / target as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::{cell_side_for, point_grid};

    #[test]
    fn grid_stays_inside_box() {
        let bbox = [117.0, 39.0, 117.01, 39.01];
        let pts = point_grid(bbox, 100.0);
        assert!(!pts.is_empty());
        assert!(pts.iter().all(|p| {
            p.longitude >= bbox[0] && p.longitude <= bbox[2] && p.latitude >= bbox[1] && p.latitude <= bbox[3]
        }));
        // About 860 m x 1110 m at 100 m spacing.
        assert!(pts.len() > 60 && pts.len() < 150, "{}", pts.len());
    }

    #[test]
    fn degenerate_boxes() {
        assert!(point_grid([1.0, 1.0, 0.0, 2.0], 10.0).is_empty());
        assert!(point_grid([0.0, 0.0, 1.0, 1.0], 0.0).is_empty());
        assert_eq!(point_grid([5.0, 5.0, 5.0, 5.0], 10.0).len(), 1);
    }

    #[test]
    fn cell_side_targets_point_count() {
        assert_eq!(cell_side_for(1.0e8, 10_000), 100.0);
        assert_eq!(cell_side_for(0.0, 10_000), 0.0);
    }
}
