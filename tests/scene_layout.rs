use std::collections::HashSet;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use rust_orrery::error::{OrreryError, TextureError};
use rust_orrery::gui::OrbitCamera;
use rust_orrery::orrery::{CelestialBody, OrreryLayout, RingSpec};
use rust_orrery::scene::{
    BodyHandle, MemoryScene, NodeId, Paint, SceneContext, SceneGraph, Shape, Side, TexturePolicy,
};
use rust_orrery::texture::{Texture, TextureRef, TextureSource, UncheckedTextures};

/// Pretends every texture is missing, except the ones it was told about.
struct PartialTextures {
    present: HashSet<&'static str>,
}

impl TextureSource for PartialTextures {
    fn resolve(&self, texture: &TextureRef) -> Result<Texture, TextureError> {
        let path = std::path::PathBuf::from("textures").join(texture.name());
        if self.present.contains(texture.name()) {
            Ok(Texture {
                name: texture.name().to_owned(),
                path,
            })
        } else {
            Err(TextureError::NotFound {
                name: texture.name().to_owned(),
                path,
            })
        }
    }
}

fn context(policy: TexturePolicy) -> SceneContext<MemoryScene, UncheckedTextures> {
    SceneContext::new(MemoryScene::new(), UncheckedTextures::new("textures"), policy)
}

fn count_shapes(graph: &MemoryScene, group: NodeId, pred: impl Fn(&Shape) -> bool) -> usize {
    graph
        .children(group)
        .iter()
        .filter(|&&id| pred(&graph.node(id).shape))
        .count()
}

#[test]
fn test_root_holds_backdrop_sun_and_groups() {
    let layout = OrreryLayout::solar_system();
    let mut ctx = context(TexturePolicy::Strict);
    let scene = ctx.build_layout(&layout).unwrap();
    let graph = ctx.graph();
    let root = graph.root();

    let top_level = graph.children(root);
    assert_eq!(top_level.len(), 10);
    assert_eq!(top_level[0], scene.backdrop);
    assert_eq!(top_level[1], scene.sun);
    let groups: Vec<_> = scene.planets.iter().map(|h| h.orbit_group).collect();
    assert_eq!(&top_level[2..], groups.as_slice());

    let backdrop = graph.node(scene.backdrop);
    assert_eq!(backdrop.shape, Shape::Sphere { radius: 300.0 });
    let surface = backdrop.surface.as_ref().unwrap();
    assert_eq!(surface.side, Side::Back);
    match &surface.paint {
        Paint::Texture(t) => assert_eq!(t.name, "stars.jpg"),
        other => panic!("backdrop should be textured, got {:?}", other),
    }

    assert_eq!(graph.node(scene.sun).shape, Shape::Sphere { radius: 10.0 });
    assert_relative_eq!(
        graph.world_transform(scene.sun) * Point3::origin(),
        Point3::origin()
    );
}

#[test]
fn test_every_group_has_one_sphere_and_one_path() {
    let layout = OrreryLayout::solar_system();
    let mut ctx = context(TexturePolicy::Strict);
    let scene = ctx.build_layout(&layout).unwrap();
    let graph = ctx.graph();

    for (planet, handle) in layout.planets.iter().zip(scene.planets.iter()) {
        let group = handle.orbit_group;
        let spheres = count_shapes(graph, group, |s| matches!(s, Shape::Sphere { .. }));
        let annuli = count_shapes(graph, group, |s| matches!(s, Shape::Annulus(_)));
        let expected_rings = if planet.name == "saturn" { 1 } else { 0 };

        assert_eq!(spheres, 1, "{}", planet.name);
        assert_eq!(annuli, 1 + expected_rings, "{}", planet.name);
        assert_eq!(handle.ring.is_some(), expected_rings == 1, "{}", planet.name);
        assert!(graph.children(handle.self_mesh).is_empty());

        // The planet itself sits out at its orbital distance
        let mesh = graph.node(handle.self_mesh);
        assert_eq!(mesh.parent, Some(group));
        assert_eq!(
            mesh.shape,
            Shape::Sphere {
                radius: planet.body.radius
            }
        );
        assert_relative_eq!(
            mesh.translation.vector,
            Vector3::new(planet.body.orbital_distance, 0.0, 0.0)
        );
        match &mesh.surface.as_ref().unwrap().paint {
            Paint::Texture(t) => assert_eq!(t.name, format!("{}.jpg", planet.name)),
            other => panic!("{} should be textured, got {:?}", planet.name, other),
        }

        // The orbit path is centered on the group and lies flat
        let path = graph.node(handle.orbit_path);
        match &path.shape {
            Shape::Annulus(a) => {
                let d = planet.body.orbital_distance;
                assert_relative_eq!(a.inner_radius(), d - 0.025, max_relative = 1e-6);
                assert_relative_eq!(a.outer_radius(), d + 0.025, max_relative = 1e-6);
                assert_eq!(a.segments(), 100);
            }
            other => panic!("orbit path should be an annulus, got {:?}", other),
        }
        assert_relative_eq!(path.translation.vector, Vector3::zeros());
        assert_relative_eq!(path.rotation * Vector3::z(), Vector3::y(), epsilon = 1e-6);
    }
}

#[test]
fn test_saturn_ring() {
    let layout = OrreryLayout::solar_system();
    let mut ctx = context(TexturePolicy::Strict);
    let scene = ctx.build_layout(&layout).unwrap();
    let graph = ctx.graph();

    let saturn_idx = layout
        .planets
        .iter()
        .position(|p| p.name == "saturn")
        .unwrap();
    let handle = scene.planets[saturn_idx];
    let ring = graph.node(handle.ring.unwrap());

    match &ring.shape {
        Shape::Annulus(a) => {
            assert_eq!((a.inner_radius(), a.outer_radius()), (4.0, 7.0));
            assert_eq!(a.segments(), 32);
        }
        other => panic!("ring should be an annulus, got {:?}", other),
    }
    assert_eq!(ring.parent, Some(handle.orbit_group));
    assert_relative_eq!(ring.translation.vector, Vector3::new(72.0, 0.0, 0.0));
    assert_relative_eq!(ring.rotation * Vector3::z(), Vector3::y(), epsilon = 1e-6);

    let surface = ring.surface.as_ref().unwrap();
    assert_eq!(surface.side, Side::Double);
    match &surface.paint {
        Paint::Texture(t) => assert_eq!(t.name, "saturnRings.png"),
        other => panic!("ring should be textured, got {:?}", other),
    }
}

#[test]
fn test_building_twice_gives_independent_handles() {
    let layout = OrreryLayout::solar_system();
    let mut ctx = context(TexturePolicy::Strict);
    let first = ctx.build_layout(&layout).unwrap();
    let second = ctx.build_layout(&layout).unwrap();

    let ids = |handles: &[BodyHandle]| -> HashSet<NodeId> {
        handles
            .iter()
            .flat_map(|h| {
                let mut ids = vec![h.self_mesh, h.orbit_group, h.orbit_path];
                ids.extend(h.ring);
                ids
            })
            .collect()
    };
    let a = ids(&first.planets);
    let b = ids(&second.planets);
    assert_eq!(a.len(), 8 * 3 + 1);
    assert!(a.is_disjoint(&b));
    assert_eq!(ctx.graph().children(ctx.graph().root()).len(), 20);

    // Moving one copy leaves the other alone
    let before = ctx.graph().node(second.planets[0].orbit_group).rotation;
    let turn = nalgebra::UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.0);
    ctx.graph_mut()
        .set_local_rotation(first.planets[0].orbit_group, turn);
    assert_eq!(ctx.graph().node(second.planets[0].orbit_group).rotation, before);
}

#[test]
fn test_build_single_body() {
    let mut ctx = context(TexturePolicy::Strict);
    let body = CelestialBody {
        radius: 0.5,
        orbital_distance: 12.0,
        texture: TextureRef::new("moon.jpg"),
        ring: Some(RingSpec {
            inner_radius: 0.6,
            outer_radius: 0.9,
            texture: TextureRef::new("moonRings.png"),
        }),
    };

    let handle = ctx.build(&body).unwrap();
    let graph = ctx.graph();
    assert_eq!(graph.children(graph.root()), &[handle.orbit_group]);
    assert_eq!(graph.children(handle.orbit_group).len(), 3);
}

#[test]
fn test_bad_ring_is_rejected_before_anything_is_added() {
    let mut ctx = context(TexturePolicy::Strict);
    let body = CelestialBody {
        radius: 1.0,
        orbital_distance: 12.0,
        texture: TextureRef::new("rock.jpg"),
        ring: Some(RingSpec {
            inner_radius: 3.0,
            outer_radius: 2.0,
            texture: TextureRef::new("rockRings.png"),
        }),
    };

    match ctx.build(&body) {
        Err(OrreryError::InvalidRing { inner, outer }) => assert_eq!((inner, outer), (3.0, 2.0)),
        other => panic!("expected InvalidRing, got {:?}", other),
    }
    assert_eq!(ctx.graph().len(), 1);
}

#[test]
fn test_missing_texture_strict() {
    let layout = OrreryLayout::solar_system();
    let textures = PartialTextures {
        present: ["stars.jpg", "sun.jpg", "mercury.jpg"].iter().copied().collect(),
    };
    let mut ctx = SceneContext::new(MemoryScene::new(), textures, TexturePolicy::Strict);

    match ctx.build_layout(&layout) {
        Err(OrreryError::Texture(TextureError::NotFound { name, .. })) => {
            assert_eq!(name, "venus.jpg")
        }
        other => panic!("expected a missing venus texture, got {:?}", other),
    }
}

#[test]
fn test_missing_texture_fallback() {
    let layout = OrreryLayout::solar_system();
    let textures = PartialTextures {
        present: ["stars.jpg", "sun.jpg", "saturn.jpg"].iter().copied().collect(),
    };
    let mut ctx = SceneContext::new(MemoryScene::new(), textures, TexturePolicy::Fallback);
    let scene = ctx.build_layout(&layout).unwrap();
    let graph = ctx.graph();

    for (planet, handle) in layout.planets.iter().zip(scene.planets.iter()) {
        let paint = &graph.node(handle.self_mesh).surface.as_ref().unwrap().paint;
        if planet.name == "saturn" {
            assert!(matches!(paint, Paint::Texture(_)));
            // The ring texture is missing though
            let ring = graph.node(handle.ring.unwrap());
            assert_eq!(
                ring.surface.as_ref().unwrap().paint,
                Paint::Color(planet.fallback_color)
            );
        } else {
            assert_eq!(paint, &Paint::Color(planet.fallback_color));
        }
    }
}

#[test]
fn test_resize_leaves_scene_alone() {
    let layout = OrreryLayout::solar_system();
    let mut ctx = context(TexturePolicy::Strict);
    let scene = ctx.build_layout(&layout).unwrap();
    let snapshot = ctx.graph().clone();

    let mut camera = OrbitCamera::new(1280, 720, 150.0);
    camera.resize(1024, 768);
    assert_eq!(camera.viewport(), (1024, 768));
    assert_relative_eq!(camera.aspect(), 1024.0 / 768.0);

    for handle in scene.planets.iter() {
        for &id in [handle.self_mesh, handle.orbit_group].iter() {
            assert_eq!(
                ctx.graph().world_transform(id),
                snapshot.world_transform(id)
            );
        }
    }
}
