/// Camera-distance range (meters) in which a graphic is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistanceDisplay {
    pub near: f64,
    pub far: f64,
}

impl DistanceDisplay {
    pub fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }

    pub fn up_to(far: f64) -> Self {
        Self::new(0.0, far)
    }

    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.near && distance <= self.far
    }
}

/// Linear scale interpolation between two camera distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NearFarScalar {
    pub near: f64,
    pub near_value: f64,
    pub far: f64,
    pub far_value: f64,
}

impl NearFarScalar {
    pub fn new(near: f64, near_value: f64, far: f64, far_value: f64) -> Self {
        Self {
            near,
            near_value,
            far,
            far_value,
        }
    }

    pub fn value_at(&self, distance: f64) -> f64 {
        if self.far <= self.near {
            return self.near_value;
        }
        let t = ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0);
        self.near_value + (self.far_value - self.near_value) * t
    }
}

#[cfg(test)]
mod tests {
    use super::{DistanceDisplay, NearFarScalar};

    #[test]
    fn distance_display_range() {
        let d = DistanceDisplay::up_to(50_000.0);
        assert!(d.contains(0.0));
        assert!(d.contains(50_000.0));
        assert!(!d.contains(50_001.0));
    }

    #[test]
    fn scalar_clamps_outside_range() {
        let s = NearFarScalar::new(100.0, 0.6, 7000.0, 0.5);
        assert_eq!(s.value_at(0.0), 0.6);
        assert_eq!(s.value_at(1e9), 0.5);
        assert!((s.value_at(3550.0) - 0.55).abs() < 1e-12);
    }
}
