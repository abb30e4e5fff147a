//! Screen-space conversions on top of the camera and the picker.

use foundation::math::{Ecef, GeoPosition, Vec2};

use crate::camera::Camera;
use crate::picking::{PickPolicy, ScenePicker, screen_to_3d};

/// Window pixel of a world point, `None` when it is not in front of the camera.
pub fn cartesian_to_screen(camera: &Camera, point: Ecef) -> Option<Vec2> {
    camera.project(point)
}

pub fn geo_to_screen(camera: &Camera, position: GeoPosition) -> Option<Vec2> {
    cartesian_to_screen(camera, position.to_cartesian())
}

/// Screen pixel to geodetic position via `screen_to_3d`, rounded like every
/// other Cartesian-to-geodetic conversion.
pub fn screen_to_geo<P: ScenePicker + ?Sized>(
    picker: &P,
    screen: Vec2,
    policy: PickPolicy,
) -> Option<GeoPosition> {
    screen_to_3d(picker, screen, policy)
        .and_then(|pick| GeoPosition::from_cartesian(pick.earth_position))
}

#[cfg(test)]
mod tests {
    use super::{geo_to_screen, screen_to_geo};
    use crate::World;
    use crate::camera::Camera;
    use crate::picking::{Ellipsoid, GlobeScene, PickPolicy};
    use foundation::math::{GeoPosition, Vec2};

    #[test]
    fn screen_round_trip_on_the_ellipsoid() {
        let world = World::new();
        let camera = Camera::above(GeoPosition::new(117.0, 39.0, 0.0), 3000.0, Vec2::new(1024.0, 768.0));
        let scene = GlobeScene::new(&world, &camera, &Ellipsoid);

        let ground = GeoPosition::new(117.002, 39.001, 0.0);
        let screen = geo_to_screen(&camera, ground).expect("on screen");
        let back = screen_to_geo(&scene, screen, PickPolicy::default()).expect("picked");
        assert!((back.longitude - ground.longitude).abs() < 1e-6);
        assert!((back.latitude - ground.latitude).abs() < 1e-6);
        assert!(back.altitude.abs() < 0.05);
    }

    #[test]
    fn sky_pixels_have_no_position() {
        let world = World::new();
        let eye = GeoPosition::new(0.0, 0.0, 1000.0).to_cartesian();
        let target = GeoPosition::new(0.0, 0.0, 1.0e7).to_cartesian();
        let camera = Camera::look_at(eye, target, foundation::math::Vec3::new(0.0, 0.0, 1.0), Vec2::new(800.0, 600.0))
            .expect("camera");
        let scene = GlobeScene::new(&world, &camera, &Ellipsoid);
        assert!(screen_to_geo(&scene, camera.center(), PickPolicy::default()).is_none());
    }
}
