use std::ops::ControlFlow;

use clap::Parser;
use log::{error, info};

use rust_orrery::config::{init_logging, CliArgs, Config};
use rust_orrery::error::OrreryError;
use rust_orrery::gui::{KissScene, WindowScheduler};
use rust_orrery::motion::MotionUpdater;
use rust_orrery::orrery::OrreryLayout;
use rust_orrery::scene::SceneContext;
use rust_orrery::schedule::Scheduler;
use rust_orrery::texture::DirectoryTextures;

fn main() {
    let config = Config::from_args(&CliArgs::parse());
    init_logging(&config.log_level);

    if let Err(err) = run(&config) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), OrreryError> {
    let layout = OrreryLayout::solar_system();

    let mut scheduler = WindowScheduler::new(config, &layout.lighting);
    let graph = KissScene::new(scheduler.window_mut());
    let textures = DirectoryTextures::new(&config.texture_dir);
    info!("Loading textures from {}", textures.root().display());

    let mut context = SceneContext::new(graph, textures, config.texture_policy);
    let scene = context.build_layout(&layout)?;
    let mut motion = MotionUpdater::for_scene(&scene, &layout)?;

    let last = scheduler.run(|frame| {
        motion.tick(context.graph_mut(), frame);
        ControlFlow::Continue(())
    });
    info!("Stopped after {} frames", last.0);

    Ok(())
}
