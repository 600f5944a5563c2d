use log::{debug, info, warn};
use nalgebra::{Point3, Translation3};

use super::{BodyHandle, NodeId, Paint, SceneContext, SceneGraph, Side, Surface, TexturePolicy};
use crate::error::OrreryError;
use crate::math::geometry::{lay_flat, Annulus};
use crate::orrery::{
    BackdropSpec, CelestialBody, OrreryLayout, Planet, SunSpec, ORBIT_PATH_SEGMENTS,
    ORBIT_PATH_WIDTH, PLANET_RING_SEGMENTS,
};
use crate::texture::{TextureRef, TextureSource};

const ORBIT_PATH_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const BACKDROP_FALLBACK_COLOR: [f32; 3] = [0.02, 0.02, 0.05];

/// Handles for everything `build_layout` put in the scene.
#[derive(Debug, Clone)]
pub struct BuiltScene {
    pub backdrop: NodeId,
    pub sun: NodeId,
    pub planets: Vec<BodyHandle>,
}

impl<G, T> SceneContext<G, T>
where
    G: SceneGraph,
    T: TextureSource,
{
    /// Builds the backdrop, the sun, and every planet, in that order.
    pub fn build_layout(&mut self, layout: &OrreryLayout) -> Result<BuiltScene, OrreryError> {
        let backdrop = self.build_backdrop(&layout.backdrop)?;
        let sun = self.build_sun(&layout.sun)?;
        let planets = layout
            .planets
            .iter()
            .map(|planet| self.build_planet(planet))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Built scene with {} planets ({} top-level nodes)",
            planets.len(),
            planets.len() + 2
        );

        Ok(BuiltScene {
            backdrop,
            sun,
            planets,
        })
    }

    pub fn build_backdrop(&mut self, spec: &BackdropSpec) -> Result<NodeId, OrreryError> {
        let paint = self.paint(&spec.texture, BACKDROP_FALLBACK_COLOR.into())?;

        let root = self.graph.root();
        let sphere = self.graph.add_sphere(root, spec.radius);
        self.graph.set_surface(
            sphere,
            &Surface {
                paint,
                side: Side::Back,
            },
        );
        Ok(sphere)
    }

    pub fn build_sun(&mut self, spec: &SunSpec) -> Result<NodeId, OrreryError> {
        let paint = self.paint(&spec.texture, spec.fallback_color)?;

        let root = self.graph.root();
        let sphere = self.graph.add_sphere(root, spec.radius);
        self.graph.set_surface(
            sphere,
            &Surface {
                paint,
                side: Side::Back,
            },
        );
        Ok(sphere)
    }

    pub fn build_planet(&mut self, planet: &Planet) -> Result<BodyHandle, OrreryError> {
        let handle = self.build_body(&planet.body, planet.fallback_color)?;
        debug!("Built {} as {:?}", planet.name, handle);
        Ok(handle)
    }

    /// Builds the orbit group for one body and hangs it off the root.
    pub fn build(&mut self, body: &CelestialBody) -> Result<BodyHandle, OrreryError> {
        self.build_body(body, Point3::new(1.0, 1.0, 1.0))
    }

    fn build_body(
        &mut self,
        body: &CelestialBody,
        fallback: Point3<f32>,
    ) -> Result<BodyHandle, OrreryError> {
        // Do everything that can fail before touching the graph
        let distance = body.orbital_distance;
        let body_paint = self.paint(&body.texture, fallback)?;
        let orbit_path = Annulus::new(
            distance - ORBIT_PATH_WIDTH / 2.0,
            distance + ORBIT_PATH_WIDTH / 2.0,
            ORBIT_PATH_SEGMENTS,
        )?;
        let ring = match &body.ring {
            Some(spec) => {
                let annulus =
                    Annulus::new(spec.inner_radius, spec.outer_radius, PLANET_RING_SEGMENTS)?;
                Some((annulus, self.paint(&spec.texture, fallback)?))
            }
            None => None,
        };

        let offset = Translation3::new(distance, 0.0, 0.0);

        let root = self.graph.root();
        let orbit_group = self.graph.add_group(root);

        let self_mesh = self.graph.add_sphere(orbit_group, body.radius);
        self.graph.set_local_translation(self_mesh, offset);
        self.graph.set_surface(
            self_mesh,
            &Surface {
                paint: body_paint,
                side: Side::Front,
            },
        );

        let orbit_path_node = self.graph.add_annulus(orbit_group, &orbit_path);
        self.graph.set_local_rotation(orbit_path_node, lay_flat());
        self.graph.set_surface(
            orbit_path_node,
            &Surface {
                paint: Paint::Color(ORBIT_PATH_COLOR.into()),
                side: Side::Front,
            },
        );

        let ring = ring.map(|(annulus, paint)| {
            let node = self.graph.add_annulus(orbit_group, &annulus);
            self.graph.set_local_translation(node, offset);
            self.graph.set_local_rotation(node, lay_flat());
            self.graph.set_surface(
                node,
                &Surface {
                    paint,
                    side: Side::Double,
                },
            );
            node
        });

        Ok(BodyHandle {
            self_mesh,
            orbit_group,
            orbit_path: orbit_path_node,
            ring,
        })
    }

    fn paint(&self, texture: &TextureRef, fallback: Point3<f32>) -> Result<Paint, OrreryError> {
        match self.textures.resolve(texture) {
            Ok(texture) => Ok(Paint::Texture(texture)),
            Err(err) => match self.policy {
                TexturePolicy::Strict => Err(err.into()),
                TexturePolicy::Fallback => {
                    warn!("{}; painting it a flat color instead", err);
                    Ok(Paint::Color(fallback))
                }
            },
        }
    }
}
