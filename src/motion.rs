use log::trace;

use crate::error::OrreryError;
use crate::math::geometry::{rotation_about_vertical, wrap_angle};
use crate::orrery::{OrreryLayout, RotationRates};
use crate::scene::{BodyHandle, BuiltScene, NodeId, SceneGraph};
use crate::schedule::FrameIndex;

/// Spins planets about their own axes and swings their orbit groups around
/// the origin, a fixed angle per frame.
///
/// The only state is which frame has been applied so far. Orientations live
/// in the scene graph, and after `tick(n)` every one of them sits at
/// `n * rate`, however the frames were spaced.
#[derive(Debug, Clone)]
pub struct MotionUpdater {
    bodies: Vec<(BodyHandle, RotationRates)>,
    sun: Option<(NodeId, f32)>,
    applied: FrameIndex,
}

impl MotionUpdater {
    pub fn new(handles: &[BodyHandle], rates: &[RotationRates]) -> Result<Self, OrreryError> {
        if handles.len() != rates.len() {
            return Err(OrreryError::RateCountMismatch {
                handles: handles.len(),
                rates: rates.len(),
            });
        }

        Ok(MotionUpdater {
            bodies: handles.iter().copied().zip(rates.iter().copied()).collect(),
            sun: None,
            applied: FrameIndex::default(),
        })
    }

    pub fn for_scene(scene: &BuiltScene, layout: &OrreryLayout) -> Result<Self, OrreryError> {
        Ok(Self::new(&scene.planets, &layout.rates())?.with_sun(scene.sun, layout.sun.self_spin))
    }

    pub fn with_sun(mut self, sun: NodeId, self_spin: f32) -> Self {
        self.sun = Some((sun, self_spin));
        self
    }

    pub fn applied_frame(&self) -> FrameIndex {
        self.applied
    }

    /// Brings every body to its orientation for `frame`. Normally that's one
    /// step past the last call; skipped frames are caught up in one jump,
    /// and an earlier frame winds things back.
    ///
    /// Orientations depend on the frame index alone and are never composed
    /// onto what the graph already holds.
    pub fn tick<G: SceneGraph>(&mut self, graph: &mut G, frame: FrameIndex) {
        trace!("Advancing {:?} -> {:?}", self.applied, frame);

        let mut turn = |node: NodeId, rate: f32| {
            graph.set_local_rotation(node, rotation_about_vertical(angle_at(frame, rate)));
        };

        if let Some((sun, rate)) = self.sun {
            turn(sun, rate);
        }
        for (handle, rates) in self.bodies.iter() {
            turn(handle.self_mesh, rates.self_spin);
            turn(handle.orbit_group, rates.orbit_revolution);
        }

        self.applied = frame;
    }
}

/// Total angle turned by `frame` at `rate` radians per frame, in [0, 2pi).
/// The product is reduced in f64 so large frame counts keep their precision.
fn angle_at(frame: FrameIndex, rate: f32) -> f32 {
    wrap_angle((frame.0 as f64 * rate as f64).rem_euclid(std::f64::consts::TAU) as f32)
}
