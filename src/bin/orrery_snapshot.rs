use std::ops::ControlFlow;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use nalgebra::Point3;
use plotters::prelude::*;

use rust_orrery::config::init_logging;
use rust_orrery::math::geometry::path_iter_parametric;
use rust_orrery::motion::MotionUpdater;
use rust_orrery::orrery::OrreryLayout;
use rust_orrery::scene::{MemoryScene, SceneContext, TexturePolicy};
use rust_orrery::schedule::{FixedFrames, Scheduler};
use rust_orrery::texture::UncheckedTextures;

/// Runs the orrery without a window and plots where everything ended up,
/// looking down on the orbital plane.
#[derive(Debug, Parser)]
struct Args {
    /// Frames to advance before taking the picture.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    #[arg(long, default_value = "plots/orrery.png")]
    output: PathBuf,

    /// Side length of the square image, in pixels.
    #[arg(long, default_value_t = 800)]
    size: u32,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let layout = OrreryLayout::solar_system();
    let mut context = SceneContext::new(
        MemoryScene::new(),
        UncheckedTextures::new("textures"),
        TexturePolicy::Strict,
    );
    let scene = context.build_layout(&layout)?;
    let mut motion = MotionUpdater::for_scene(&scene, &layout)?;

    let last = FixedFrames::new(args.frames).run(|frame| {
        motion.tick(context.graph_mut(), frame);
        ControlFlow::Continue(())
    });
    info!("Advanced {} frames", last.0);

    let graph = context.into_graph();
    let positions: Vec<_> = scene
        .planets
        .iter()
        .map(|handle| graph.world_transform(handle.self_mesh) * Point3::origin())
        .collect();

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draw_snapshot(&args.output, args.size, &layout, &positions)?;
    info!("Wrote {}", args.output.display());

    Ok(())
}

fn draw_snapshot(
    path: &std::path::Path,
    size: u32,
    layout: &OrreryLayout,
    positions: &[Point3<f32>],
) -> Result<(), Box<dyn std::error::Error>> {
    let extent = layout
        .planets
        .iter()
        .map(|p| p.body.orbital_distance + p.body.radius)
        .fold(layout.sun.radius, f32::max)
        * 1.05;

    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&BLACK)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    // Seen from above, +x is right and -z is up
    let to_plot = |p: &Point3<f32>| (p.x, -p.z);
    let pixels_per_unit = size as f32 / (2.0 * extent);
    let dot = |radius: f32| ((radius * pixels_per_unit).round() as i32).max(2);

    for planet in layout.planets.iter() {
        let distance = planet.body.orbital_distance;
        let orbit = path_iter_parametric(
            |theta: f32| Point3::new(distance * theta.cos(), 0.0, distance * theta.sin()),
            0.0,
            std::f32::consts::TAU,
            180,
        );
        chart.draw_series(LineSeries::new(orbit.map(|p| to_plot(&p)), &WHITE.mix(0.3)))?;
    }

    let sun = layout.sun.fallback_color;
    chart.draw_series(std::iter::once(Circle::new(
        (0.0, 0.0),
        dot(layout.sun.radius),
        to_rgb(&sun).filled(),
    )))?;

    for (planet, position) in layout.planets.iter().zip(positions) {
        chart.draw_series(std::iter::once(Circle::new(
            to_plot(position),
            dot(planet.body.radius),
            to_rgb(&planet.fallback_color).filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn to_rgb(color: &Point3<f32>) -> RGBColor {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(channel(color.x), channel(color.y), channel(color.z))
}
