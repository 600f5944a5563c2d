use nalgebra::{Point2, Point3, UnitQuaternion, Vector3};

use std::f32::consts::{PI, TAU};

use crate::error::OrreryError;

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

pub const MIN_ANNULUS_SEGMENTS: usize = 3;
pub const MAX_ANNULUS_SEGMENTS: usize = u16::MAX as usize / 2 - 1;

/// A flat ring in the XY plane, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annulus {
    inner_radius: f32,
    outer_radius: f32,
    segments: usize,
}

/// Triangle data for an [Annulus], laid out the way kiss3d's `Mesh::new` wants it.
#[derive(Debug, Clone)]
pub struct AnnulusMesh {
    pub coords: Vec<Point3<f32>>,
    pub faces: Vec<Point3<u16>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Point2<f32>>,
}

impl Annulus {
    pub fn new(inner_radius: f32, outer_radius: f32, segments: usize) -> Result<Self, OrreryError> {
        if !(inner_radius >= 0.0 && inner_radius < outer_radius) {
            return Err(OrreryError::InvalidRing {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        // Both circles share the u16 index space
        if !(MIN_ANNULUS_SEGMENTS..=MAX_ANNULUS_SEGMENTS).contains(&segments) {
            return Err(OrreryError::InvalidSegments {
                segments,
                min: MIN_ANNULUS_SEGMENTS,
                max: MAX_ANNULUS_SEGMENTS,
            });
        }

        Ok(Self {
            inner_radius,
            outer_radius,
            segments,
        })
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Builds the triangle mesh. The first `segments + 1` vertices trace the
    /// inner circle, the next `segments + 1` the outer one; the seam vertex is
    /// duplicated so the texture doesn't wrap backwards across it.
    pub fn mesh(&self) -> AnnulusMesh {
        let n = self.segments;
        let circle = |radius: f32| {
            path_iter_parametric(
                move |theta: f32| Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0),
                0.0,
                TAU,
                n,
            )
        };

        let coords: Vec<_> = circle(self.inner_radius)
            .chain(circle(self.outer_radius))
            .collect();

        // Planar projection, so the ring texture is laid out radially
        let uvs = coords
            .iter()
            .map(|p| {
                Point2::new(
                    (p.x / self.outer_radius + 1.0) / 2.0,
                    (p.y / self.outer_radius + 1.0) / 2.0,
                )
            })
            .collect();

        let mut faces = Vec::with_capacity(2 * n);
        for i in 0..n {
            let inner = i as u16;
            let inner_next = (i + 1) as u16;
            let outer = (n + 1 + i) as u16;
            let outer_next = (n + 2 + i) as u16;
            faces.push(Point3::new(inner, outer, outer_next));
            faces.push(Point3::new(inner, outer_next, inner_next));
        }

        AnnulusMesh {
            normals: vec![Vector3::z(); coords.len()],
            coords,
            faces,
            uvs,
        }
    }
}

/// Rotation that lays something built in the XY plane flat on the XZ plane,
/// facing up.
pub fn lay_flat() -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.5 * PI)
}

pub fn rotation_about_vertical(angle: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle)
}

/// Angle of a rotation about +y. Only meaningful when the rotation has no
/// other component.
pub fn vertical_angle(rotation: &UnitQuaternion<f32>) -> f32 {
    let q = rotation.quaternion();
    wrap_angle(2.0 * q.j.atan2(q.w))
}

/// Wraps into [0, 2pi).
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest distance between two angles around the circle, in [0, pi].
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = wrap_angle(a - b);
    d.min(TAU - d)
}
