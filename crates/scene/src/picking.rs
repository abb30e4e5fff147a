use foundation::bounds::Aabb3;
use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{Ecef, GeoPosition, Vec2, Vec3, WGS84_A, WGS84_B};

use crate::World;
use crate::camera::Camera;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

/// What sits under a screen pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickedObject {
    /// A flat annotation (point, label, line, polygon, wall).
    Entity(EntityId),
    /// A 3D model.
    Model(EntityId),
}

impl PickedObject {
    pub fn entity(&self) -> EntityId {
        match self {
            PickedObject::Entity(id) | PickedObject::Model(id) => *id,
        }
    }
}

/// Height of the terrain surface above the ellipsoid, in meters.
pub trait TerrainHeights {
    fn height_at(&self, longitude: f64, latitude: f64) -> Option<f64>;
}

/// Flat terrain at the ellipsoid surface.
#[derive(Debug, Copy, Clone, Default)]
pub struct Ellipsoid;

impl TerrainHeights for Ellipsoid {
    fn height_at(&self, _longitude: f64, _latitude: f64) -> Option<f64> {
        Some(0.0)
    }
}

/// Scene-level picking capabilities of a globe viewer.
pub trait ScenePicker {
    /// Camera ray through a screen pixel.
    fn pick_ray(&self, screen: Vec2) -> Option<Ray>;
    /// Intersection of a ray with the terrain surface.
    fn globe_pick(&self, ray: &Ray) -> Option<Ecef>;
    /// First ground or model intersection along a ray.
    fn pick_from_ray(&self, ray: &Ray) -> Option<Ecef>;
    /// Intersection of the pixel's ray with the bare ellipsoid.
    fn pick_ellipsoid(&self, screen: Vec2) -> Option<Ecef>;
    /// Depth-buffer position under a pixel: nearest rendered surface.
    fn pick_position(&self, screen: Vec2) -> Option<Ecef>;
    fn pick_object(&self, screen: Vec2) -> Option<PickedObject>;
}

/// Disambiguation rules for `screen_to_3d`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickPolicy {
    /// Depth picks on a flat entity below this altitude are treated as bogus
    /// (terrain-draped entities) and replaced by the terrain intersection.
    pub terrain_entity_altitude: f64,
}

impl PickPolicy {
    pub const DEFAULT_TERRAIN_ENTITY_ALTITUDE: f64 = -100.0;
}

impl Default for PickPolicy {
    fn default() -> Self {
        Self {
            terrain_entity_altitude: Self::DEFAULT_TERRAIN_ENTITY_ALTITUDE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenPick {
    /// Ground/model hit along the pick ray, or the ellipsoid approximation.
    pub ray_position: Option<Ecef>,
    pub earth_position: Ecef,
    pub picked: Option<PickedObject>,
}

/// Resolves a screen pixel to a world position. `None` when the pixel's ray
/// misses the globe.
pub fn screen_to_3d<P: ScenePicker + ?Sized>(
    picker: &P,
    screen: Vec2,
    policy: PickPolicy,
) -> Option<ScreenPick> {
    let ray = picker.pick_ray(screen)?;
    let terrain = picker.globe_pick(&ray)?;

    let ray_position = picker
        .pick_from_ray(&ray)
        .or_else(|| picker.pick_ellipsoid(screen));

    let picked = picker.pick_object(screen);
    let earth_position = match (picker.pick_position(screen), picked) {
        (Some(depth), Some(PickedObject::Entity(_))) => {
            let below = GeoPosition::from_cartesian(depth)
                .is_none_or(|p| p.altitude < policy.terrain_entity_altitude);
            if below { terrain } else { depth }
        }
        (Some(depth), Some(PickedObject::Model(_))) => depth,
        _ => terrain,
    };

    Some(ScreenPick {
        ray_position,
        earth_position,
        picked,
    })
}

/// Nearest positive intersection with an origin-centred ellipsoid.
pub fn ray_ellipsoid(ray: &Ray, radii: Vec3) -> Option<f64> {
    let inv = Vec3::new(1.0 / radii.x, 1.0 / radii.y, 1.0 / radii.z);
    let o = Vec3::new(ray.origin.x * inv.x, ray.origin.y * inv.y, ray.origin.z * inv.z);
    let d = Vec3::new(ray.dir.x * inv.x, ray.dir.y * inv.y, ray.dir.z * inv.z);

    let a = d.dot(d);
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - 1.0;
    let disc = b * b - 4.0 * a * c;
    if a <= 0.0 || disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let t0 = (-b - sqrt) / (2.0 * a);
    let t1 = (-b + sqrt) / (2.0 * a);
    [t0, t1].into_iter().find(|t| *t >= 0.0)
}

fn wgs84_radii(height: f64) -> Vec3 {
    Vec3::new(WGS84_A + height, WGS84_A + height, WGS84_B + height)
}

/// Slab test; returns the entry distance along a normalized ray.
fn ray_aabb_hit_t(ray: &Ray, bounds: Aabb3, mut t_min: f64, mut t_max: f64) -> Option<f64> {
    let origin = ray.origin.to_array();
    let dir = ray.dir.to_array();
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (min, max) = (bounds.min[axis], bounds.max[axis]);

        if d.abs() < 1e-12 {
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min - o) * inv;
        let mut t2 = (max - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntityHit {
    pub entity: EntityId,
    pub is_model: bool,
    pub distance: f64,
}

/// Picking over a `World` seen through a `Camera`, with terrain heights from
/// `terrain`.
pub struct GlobeScene<'a, T: TerrainHeights + ?Sized> {
    pub world: &'a World,
    pub camera: &'a Camera,
    pub terrain: &'a T,
    /// Padding (meters) around entity bounds; points and labels have no
    /// extent of their own.
    pub pick_tolerance_m: f64,
}

impl<'a, T: TerrainHeights + ?Sized> GlobeScene<'a, T> {
    pub const DEFAULT_PICK_TOLERANCE_M: f64 = 5.0;

    pub fn new(world: &'a World, camera: &'a Camera, terrain: &'a T) -> Self {
        Self {
            world,
            camera,
            terrain,
            pick_tolerance_m: Self::DEFAULT_PICK_TOLERANCE_M,
        }
    }

    /// Nearest shown entity along the ray. Equal distances go to the lower
    /// entity index.
    pub fn pick_entity(&self, ray: &Ray, models_only: bool) -> Option<EntityHit> {
        let mut best: Option<EntityHit> = None;
        for (id, entity) in self.world.iter() {
            if models_only && !entity.is_model() {
                continue;
            }
            if !self.world.is_showing(id) {
                continue;
            }
            let Some(bounds) = self.world.bounds(id) else {
                continue;
            };
            let Some(t) = ray_aabb_hit_t(ray, bounds.padded(self.pick_tolerance_m), 0.0, f64::MAX)
            else {
                continue;
            };
            let hit = EntityHit {
                entity: id,
                is_model: entity.is_model(),
                distance: t,
            };
            best = match best {
                None => Some(hit),
                Some(b) => {
                    let ord = stable_total_cmp_f64(t, b.distance)
                        .then_with(|| id.index().cmp(&b.entity.index()));
                    if ord.is_lt() { Some(hit) } else { Some(b) }
                }
            };
        }
        best
    }

    fn nearest(&self, ray: &Ray, a: Option<Ecef>, b: Option<Ecef>) -> Option<Ecef> {
        let origin: Ecef = ray.origin.into();
        match (a, b) {
            (Some(a), Some(b)) => Some(if origin.distance(a) <= origin.distance(b) { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

impl<T: TerrainHeights + ?Sized> ScenePicker for GlobeScene<'_, T> {
    fn pick_ray(&self, screen: Vec2) -> Option<Ray> {
        self.camera.pick_ray(screen)
    }

    fn globe_pick(&self, ray: &Ray) -> Option<Ecef> {
        // Refine against an ellipsoid inflated to the local terrain height.
        let mut height = 0.0;
        let mut hit = None;
        for _ in 0..4 {
            let t = ray_ellipsoid(ray, wgs84_radii(height))?;
            let point: Ecef = ray.at(t).into();
            hit = Some(point);
            let Some(geo) = GeoPosition::from_cartesian(point) else {
                break;
            };
            let next = self.terrain.height_at(geo.longitude, geo.latitude).unwrap_or(0.0);
            if (next - height).abs() < 0.01 {
                break;
            }
            height = next;
        }
        hit
    }

    fn pick_from_ray(&self, ray: &Ray) -> Option<Ecef> {
        let model = self
            .pick_entity(ray, true)
            .map(|hit| Ecef::from(ray.at(hit.distance)));
        self.nearest(ray, model, self.globe_pick(ray))
    }

    fn pick_ellipsoid(&self, screen: Vec2) -> Option<Ecef> {
        let ray = self.pick_ray(screen)?;
        let t = ray_ellipsoid(&ray, wgs84_radii(0.0))?;
        Some(ray.at(t).into())
    }

    fn pick_position(&self, screen: Vec2) -> Option<Ecef> {
        let ray = self.pick_ray(screen)?;
        let entity = self
            .pick_entity(&ray, false)
            .map(|hit| Ecef::from(ray.at(hit.distance)));
        self.nearest(&ray, entity, self.globe_pick(&ray))
    }

    fn pick_object(&self, screen: Vec2) -> Option<PickedObject> {
        let ray = self.pick_ray(screen)?;
        let hit = self.pick_entity(&ray, false)?;
        Some(if hit.is_model {
            PickedObject::Model(hit.entity)
        } else {
            PickedObject::Entity(hit.entity)
        })
    }
}
