use foundation::math::{Ecef, EnuFrame, GeoPosition, Vec2, Vec3};

use crate::picking::Ray;

/// Perspective camera over the globe. Screen coordinates are CSS pixels with
/// the origin at the top-left corner of the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Ecef,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub fov_y_rad: f64,
    pub viewport: Vec2,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub const DEFAULT_FOV_Y_RAD: f64 = std::f64::consts::FRAC_PI_3;

    /// `None` when `eye == target` or `up_hint` is parallel to the view
    /// direction.
    pub fn look_at(eye: Ecef, target: Ecef, up_hint: Vec3, viewport: Vec2) -> Option<Self> {
        let forward = (target.to_vec3() - eye.to_vec3()).normalized()?;
        let right = forward.cross(up_hint).normalized()?;
        let up = right.cross(forward);
        Some(Self {
            position: eye,
            forward,
            up,
            right,
            fov_y_rad: Self::DEFAULT_FOV_Y_RAD,
            viewport,
            near: 0.1,
            far: 1.0e10,
        })
    }

    /// Looking straight down on `target` from `height_m` above it, north up.
    pub fn above(target: GeoPosition, height_m: f64, viewport: Vec2) -> Self {
        let frame = EnuFrame::at(target.to_geodetic());
        let position = frame.to_world(Vec3::new(0.0, 0.0, height_m));
        let forward = -frame.up;
        Self {
            position,
            forward,
            up: frame.north,
            right: forward.cross(frame.north),
            fov_y_rad: Self::DEFAULT_FOV_Y_RAD,
            viewport,
            near: 0.1,
            far: 1.0e10,
        }
    }

    fn aspect(&self) -> f64 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.viewport.x * 0.5, self.viewport.y * 0.5)
    }

    /// Ray from the eye through a screen pixel.
    pub fn pick_ray(&self, screen: Vec2) -> Option<Ray> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let tan = (self.fov_y_rad * 0.5).tan();
        let ndc_x = 2.0 * screen.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / self.viewport.y;
        let dir = self.forward
            + self.right.scale(ndc_x * tan * self.aspect())
            + self.up.scale(ndc_y * tan);
        Some(Ray::new(self.position.to_vec3(), dir.normalized()?))
    }

    /// Screen pixel of a world point; `None` behind the camera or outside the
    /// near/far range. Points beyond the viewport edges still project.
    pub fn project(&self, point: Ecef) -> Option<Vec2> {
        let d = point.to_vec3() - self.position.to_vec3();
        let z = d.dot(self.forward);
        if z <= self.near || z > self.far {
            return None;
        }
        let tan = (self.fov_y_rad * 0.5).tan();
        let ndc_x = d.dot(self.right) / (z * tan * self.aspect());
        let ndc_y = d.dot(self.up) / (z * tan);
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc_y) * 0.5 * self.viewport.y,
        ))
    }

    pub fn distance_to(&self, point: Ecef) -> f64 {
        self.position.distance(point)
    }
}
