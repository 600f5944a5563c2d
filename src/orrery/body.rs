use nalgebra::Point3;

use crate::texture::TextureRef;

/// Angular speeds, in radians per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationRates {
    pub self_spin: f32,
    pub orbit_revolution: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: TextureRef,
}

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub radius: f32,
    pub orbital_distance: f32,
    pub texture: TextureRef,
    pub ring: Option<RingSpec>,
}

/// One row of the planet table.
#[derive(Debug, Clone)]
pub struct Planet {
    pub name: &'static str,
    pub body: CelestialBody,
    pub rates: RotationRates,
    /// Used in place of the texture when it can't be found.
    pub fallback_color: Point3<f32>,
}

impl Planet {
    fn new(
        name: &'static str,
        radius: f32,
        orbital_distance: f32,
        rates: (f32, f32),
        color: (f32, f32, f32),
    ) -> Self {
        Planet {
            name,
            body: CelestialBody {
                radius,
                orbital_distance,
                texture: TextureRef::new(format!("{}.jpg", name)),
                ring: None,
            },
            rates: RotationRates {
                self_spin: rates.0,
                orbit_revolution: rates.1,
            },
            fallback_color: Point3::new(color.0, color.1, color.2),
        }
    }

    fn with_ring(mut self, inner_radius: f32, outer_radius: f32, texture: &str) -> Self {
        self.body.ring = Some(RingSpec {
            inner_radius,
            outer_radius,
            texture: TextureRef::new(texture),
        });
        self
    }
}

/// The eight planets, innermost first. Sizes and distances are scene units,
/// not to scale.
pub fn planets() -> Vec<Planet> {
    vec![
        Planet::new("mercury", 1.0, 20.0, (0.004, 0.04), (0.6, 0.5, 0.4)),
        Planet::new("venus", 2.0, 27.0, (0.002, 0.015), (0.8, 0.7, 0.4)),
        Planet::new("earth", 2.2, 35.0, (0.02, 0.01), (0.3, 0.5, 0.8)),
        Planet::new("mars", 1.5, 42.0, (0.018, 0.008), (0.7, 0.3, 0.2)),
        Planet::new("jupiter", 4.5, 57.0, (0.04, 0.002), (0.7, 0.6, 0.4)),
        Planet::new("saturn", 4.0, 72.0, (0.038, 0.0009), (0.7, 0.65, 0.4)).with_ring(
            4.0,
            7.0,
            "saturnRings.png",
        ),
        Planet::new("uranus", 3.0, 100.0, (0.03, 0.0004), (0.4, 0.6, 0.7)),
        Planet::new("neptune", 3.0, 142.0, (0.032, 0.0001), (0.3, 0.4, 0.7)),
    ]
}
