//! The fixed description of the solar system scene.
//!
//! Nothing in here touches a scene graph; [OrreryLayout] is plain data that
//! the scene builder walks once at startup.

mod body;

pub use body::{planets, CelestialBody, Planet, RingSpec, RotationRates};

use nalgebra::Point3;

use crate::texture::TextureRef;

/// Width of the orbit path marker, centered on the orbital distance.
pub const ORBIT_PATH_WIDTH: f32 = 0.05;
pub const ORBIT_PATH_SEGMENTS: usize = 100;
pub const PLANET_RING_SEGMENTS: usize = 32;

/// The star sphere everything sits inside.
#[derive(Debug, Clone)]
pub struct BackdropSpec {
    pub radius: f32,
    pub texture: TextureRef,
}

#[derive(Debug, Clone)]
pub struct SunSpec {
    pub radius: f32,
    pub texture: TextureRef,
    pub self_spin: f32,
    pub fallback_color: Point3<f32>,
}

/// The scene is lit by a white point light (intensity 3, range 1000) and a
/// white ambient term of 0.1. kiss3d's default material fixes light color,
/// falloff and ambient, so the light's position is all there is to set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub point_light: Point3<f32>,
}

#[derive(Debug, Clone)]
pub struct OrreryLayout {
    pub backdrop: BackdropSpec,
    pub sun: SunSpec,
    pub planets: Vec<Planet>,
    pub lighting: Lighting,
}

impl OrreryLayout {
    pub fn solar_system() -> Self {
        OrreryLayout {
            backdrop: BackdropSpec {
                radius: 300.0,
                texture: TextureRef::new("stars.jpg"),
            },
            sun: SunSpec {
                radius: 10.0,
                texture: TextureRef::new("sun.jpg"),
                self_spin: 0.003,
                fallback_color: Point3::new(1.0, 0.8, 0.3),
            },
            planets: planets(),
            lighting: Lighting {
                point_light: Point3::origin(),
            },
        }
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn rates(&self) -> Vec<RotationRates> {
        self.planets.iter().map(|p| p.rates).collect()
    }
}
