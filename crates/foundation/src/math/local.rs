use super::{Ecef, Geodetic, Vec3, geodetic_to_ecef};

/// Local East-North-Up tangent frame anchored at a geodetic origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnuFrame {
    pub origin: Ecef,
    pub east: Vec3,
    pub north: Vec3,
    pub up: Vec3,
}

impl EnuFrame {
    pub fn at(origin: Geodetic) -> Self {
        let (sin_lat, cos_lat) = origin.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = origin.lon_rad.sin_cos();

        Self {
            origin: geodetic_to_ecef(origin),
            east: Vec3::new(-sin_lon, cos_lon, 0.0),
            north: Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            up: Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        }
    }

    /// Local offset (east, north, up) of a world point.
    pub fn to_local(&self, point: Ecef) -> Vec3 {
        let d = point.to_vec3() - self.origin.to_vec3();
        Vec3::new(d.dot(self.east), d.dot(self.north), d.dot(self.up))
    }

    pub fn to_world(&self, local: Vec3) -> Ecef {
        let offset = self.east.scale(local.x) + self.north.scale(local.y) + self.up.scale(local.z);
        (self.origin.to_vec3() + offset).into()
    }
}
