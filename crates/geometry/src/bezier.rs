use foundation::math::{GeoPosition, Vec3};

pub const DEFAULT_BEZIER_SAMPLES: usize = 20;

/// Cubic bezier through four control points picked from `points` at the
/// quartile indices `0, len/4, len/2, len-1`.
///
/// Produces `count` evenly spaced samples with `t = i / (count - 1)`, so the
/// first and last samples coincide with the first and last input points.
/// Inputs with fewer than two points are returned unchanged.
pub fn bezier(points: &[Vec3], count: usize) -> Vec<Vec3> {
    let len = points.len();
    if len < 2 || count == 0 {
        return points.to_vec();
    }
    if count == 1 {
        return vec![points[0]];
    }

    let p0 = points[0];
    let p1 = points[len / 4];
    let p2 = points[len / 2];
    let p3 = points[len - 1];

    let last = (count - 1) as f64;
    (0..count)
        .map(|i| {
            // Pin the ends exactly instead of relying on the basis sum.
            if i == 0 {
                return p0;
            }
            if i == count - 1 {
                return p3;
            }
            cubic(p0, p1, p2, p3, i as f64 / last)
        })
        .collect()
}

fn cubic(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f64) -> Vec3 {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    p0.scale(b0) + p1.scale(b1) + p2.scale(b2) + p3.scale(b3)
}

/// Bezier smoothing of a geodetic path, interpolated in world space.
pub fn bezier_positions(points: &[GeoPosition], count: usize) -> Vec<GeoPosition> {
    let world: Vec<Vec3> = points.iter().map(|p| p.to_cartesian().to_vec3()).collect();
    bezier(&world, count)
        .into_iter()
        .filter_map(|v| GeoPosition::from_cartesian(v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BEZIER_SAMPLES, bezier, bezier_positions};
    use foundation::math::{GeoPosition, Vec3};

    fn controls() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 2.0, 1.0),
            Vec3::new(4.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn produces_requested_count_with_pinned_ends() {
        let pts = controls();
        let out = bezier(&pts, DEFAULT_BEZIER_SAMPLES);
        assert_eq!(out.len(), 20);
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[19], pts[3]);
    }

    #[test]
    fn midpoint_matches_closed_form() {
        let pts = controls();
        let out = bezier(&pts, 3);
        // t = 0.5: (p0 + 3 p1 + 3 p2 + p3) / 8
        let expected = Vec3::new(
            (0.0 + 3.0 + 9.0 + 4.0) / 8.0,
            (0.0 + 6.0 + 6.0 + 0.0) / 8.0,
            (0.0 + 0.0 + 3.0 + 1.0) / 8.0,
        );
        assert!((out[1] - expected).length() < 1e-12);
    }

    #[test]
    fn uses_quartile_control_points_for_long_inputs() {
        let pts: Vec<Vec3> = (0..9).map(|i| Vec3::new(i as f64, 0.0, 0.0)).collect();
        let out = bezier(&pts, 5);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[4], pts[8]);
        // Control points 0, 2, 4, 8 are collinear, so every sample stays on the axis.
        assert!(out.iter().all(|p| p.y == 0.0 && p.z == 0.0));
    }

    #[test]
    fn short_inputs_pass_through() {
        assert!(bezier(&[], 20).is_empty());
        let one = [Vec3::new(1.0, 1.0, 1.0)];
        assert_eq!(bezier(&one, 20), one.to_vec());
    }

    #[test]
    fn geodetic_path_keeps_endpoints() {
        let path = [
            GeoPosition::new(117.0, 39.0, 10.0),
            GeoPosition::new(117.01, 39.01, 10.0),
            GeoPosition::new(117.02, 39.0, 10.0),
            GeoPosition::new(117.03, 39.02, 10.0),
        ];
        let out = bezier_positions(&path, 20);
        assert_eq!(out.len(), 20);
        assert!((out[0].longitude - 117.0).abs() < 1e-7);
        assert!((out[19].latitude - 39.02).abs() < 1e-7);
    }
}
