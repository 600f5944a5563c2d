//! Everything that needs a window: the kiss3d scene graph, the orbit camera,
//! and the render loop that drives the animation.

mod camera;
mod kiss_scene;
mod window;

pub use camera::OrbitCamera;
pub use kiss_scene::KissScene;
pub use window::WindowScheduler;
