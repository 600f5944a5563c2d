use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use kiss3d::light::Light;
use kiss3d::window::Window;
use log::{debug, info};

use super::camera::OrbitCamera;
use crate::config::Config;
use crate::orrery::Lighting;
use crate::schedule::{FrameIndex, Scheduler};

const CAMERA_DISTANCE: f32 = 150.0;

/// Counts rendered frames and reports the rate once per `window`.
struct FpsLog {
    since: Instant,
    frames: u32,
    window: Duration,
}

impl FpsLog {
    fn new(window: Duration) -> Self {
        FpsLog {
            since: Instant::now(),
            frames: 0,
            window,
        }
    }

    fn frame_rendered(&mut self) -> Option<f64> {
        self.frames += 1;

        let elapsed = self.since.elapsed();
        if elapsed < self.window || elapsed.is_zero() {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.since = Instant::now();
        self.frames = 0;
        Some(fps)
    }
}

/// Hands out one frame per rendered window frame, until the window is closed
/// or the frame limit runs out.
pub struct WindowScheduler {
    window: Window,
    camera: OrbitCamera,
    frame_limit: Option<u64>,
    fps: FpsLog,
}

impl WindowScheduler {
    pub fn new(config: &Config, lighting: &Lighting) -> Self {
        let mut window = Window::new_with_size(&config.title, config.width, config.height);
        window.set_framerate_limit(config.framerate_limit);
        window.set_background_color(0.0, 0.0, 0.0);

        window.set_light(Light::Absolute(lighting.point_light));
        debug!("Point light at {:?}", lighting.point_light);

        info!(
            "Opened {}x{} window \"{}\"",
            config.width, config.height, config.title
        );

        WindowScheduler {
            window,
            camera: OrbitCamera::new(config.width, config.height, CAMERA_DISTANCE),
            frame_limit: config.frame_limit,
            fps: FpsLog::new(Duration::from_secs(1)),
        }
    }

    /// For attaching scene nodes before the loop starts.
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }
}

impl Scheduler for WindowScheduler {
    fn run<F>(&mut self, mut on_frame: F) -> FrameIndex
    where
        F: FnMut(FrameIndex) -> ControlFlow<()>,
    {
        let mut frame = FrameIndex::default();
        loop {
            if let Some(limit) = self.frame_limit {
                if frame.0 >= limit {
                    info!("Reached frame limit of {}", limit);
                    break;
                }
            }

            frame = frame.next();
            if on_frame(frame).is_break() {
                break;
            }
            // Also feeds input and resize events to the camera
            if !self.window.render_with_camera(&mut self.camera) {
                info!("Window closed");
                break;
            }
            if let Some(fps) = self.fps.frame_rendered() {
                debug!("FPS: {:.0}", fps);
            }
        }
        frame
    }
}
