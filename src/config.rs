//! Startup configuration.
//!
//! The body table is fixed in code; only presentation and asset settings
//! come from the command line.

use std::path::PathBuf;

use clap::Parser;

use crate::scene::TexturePolicy;

#[derive(Debug, Parser)]
#[command(name = "rust-orrery", about = "Spinning solar system, rendered with kiss3d")]
pub struct CliArgs {
    /// Window width, in pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height, in pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Directory holding the planet, ring, and star textures.
    #[arg(long, default_value = "textures")]
    pub textures: PathBuf,

    /// Paint bodies a flat color when their texture is missing, instead of
    /// refusing to start.
    #[arg(long)]
    pub allow_missing_textures: bool,

    /// Quit after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Framerate cap. 0 means uncapped.
    #[arg(long, default_value_t = 60)]
    pub fps: u64,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub texture_dir: PathBuf,
    pub texture_policy: TexturePolicy,
    pub frame_limit: Option<u64>,
    pub framerate_limit: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: String::from("Solar System"),
            width: 1280,
            height: 720,
            texture_dir: PathBuf::from("textures"),
            texture_policy: TexturePolicy::Strict,
            frame_limit: None,
            framerate_limit: Some(60),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    pub fn from_args(args: &CliArgs) -> Self {
        Config {
            width: args.width.max(1),
            height: args.height.max(1),
            texture_dir: args.textures.clone(),
            texture_policy: if args.allow_missing_textures {
                TexturePolicy::Fallback
            } else {
                TexturePolicy::Strict
            },
            frame_limit: args.frames,
            framerate_limit: match args.fps {
                0 => None,
                fps => Some(fps),
            },
            log_level: args.log_level.clone(),
            ..Config::default()
        }
    }
}

/// Sets up `env_logger`. `RUST_LOG` wins over the configured level.
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
