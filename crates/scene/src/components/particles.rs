use foundation::math::Ecef;

use crate::components::Color;

/// Particle effect primitive (smoke, fire) anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    pub position: Ecef,
    pub image: String,
    pub image_size: [f32; 2],
    pub start_color: Color,
    pub end_color: Color,
    pub start_scale: f32,
    pub end_scale: f32,
    pub particle_life_s: f32,
    pub speed: f32,
    pub emitter_radius: f32,
    pub lifetime_s: f32,
    pub particle_size: f32,
    pub emission_rate: f32,
    pub show: bool,
}

impl ParticleSystem {
    /// Orange-to-smoke fire plume used for fire-point annotations.
    pub fn fire(position: Ecef) -> Self {
        Self {
            position,
            image: "./smoke.png".to_string(),
            image_size: [20.0, 20.0],
            start_color: Color::from_bytes(255, 168, 19, 255),
            end_color: Color::new(0.0, 0.0, 0.0, 0.1),
            start_scale: 2.0,
            end_scale: 5.0,
            particle_life_s: 1.0,
            speed: 5.0,
            emitter_radius: 4.0,
            lifetime_s: 16.0,
            particle_size: 57.0,
            emission_rate: 21.0,
            show: true,
        }
    }
}
