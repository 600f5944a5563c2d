pub mod config;
pub mod error;
pub mod gui;
pub mod math;
pub mod motion;
pub mod orrery;
pub mod scene;
pub mod schedule;
pub mod texture;
