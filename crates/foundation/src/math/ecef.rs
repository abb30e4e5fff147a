use super::Vec3;

/// Earth-centered, Earth-fixed Cartesian coordinates (meters).
///
/// This is the "world" space of the globe: every rendered entity position is
/// an `Ecef` value.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ecef {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn magnitude(self) -> f64 {
        self.to_vec3().length()
    }

    /// Straight-line distance through space (not along the surface).
    pub fn distance(self, other: Ecef) -> f64 {
        self.to_vec3().distance(other.to_vec3())
    }

    pub fn lerp(self, other: Ecef, t: f64) -> Ecef {
        self.to_vec3().lerp(other.to_vec3(), t).into()
    }
}

impl From<Vec3> for Ecef {
    fn from(v: Vec3) -> Self {
        Ecef::new(v.x, v.y, v.z)
    }
}

impl From<Ecef> for Vec3 {
    fn from(e: Ecef) -> Self {
        e.to_vec3()
    }
}
