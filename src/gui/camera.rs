use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use log::debug;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;

const KEY_ANGLE_STEP: f32 = 0.1;
const KEY_ZOOM_STEP: f32 = 1.2;

// Orbit controls in the usual three-button style: drag with the left button
// to swing around the target, drag with the right to pan the target, scroll
// to dolly in and out. Rotation and panning are damped, so a flick of the
// mouse keeps easing for a few frames after the button is released.
//
// Unlike kiss3d's ArcBall, y is up and the clipping planes are fixed, which
// is what the scene's units were picked for. The camera also remembers the
// framebuffer size so the aspect ratio follows window resizes.
pub struct OrbitCamera {
    // -- position --
    target: Point3<f32>,
    theta: f32,  // azimuthal angle, around +y, 0 on +z
    phi: f32,    // polar angle, from +y
    radius: f32, // distance from target
    // -- motion still to be applied --
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vector3<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    // -- knobs to fiddle with --
    rotate_speed: f32,
    damping: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
}

impl OrbitCamera {
    /// Looks at the origin from `distance` away along +z.
    pub fn new(width: u32, height: u32, distance: f32) -> Self {
        let znear = 1.0;
        let zfar = 1000.0;
        OrbitCamera {
            target: Point3::origin(),
            theta: 0.0,
            phi: PI / 2.0,
            radius: distance,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vector3::zeros(),
            width: width.max(1),
            height: height.max(1),
            fovy: PI / 4.0,
            znear,
            zfar,
            last_cursor_pos: Vector2::zeros(),
            rotate_speed: 1.0,
            damping: 0.05,
            scroll_ratio: 1.1,
            phi_limit: 0.001,
            radius_limits: (2.0 * znear, 0.5 * zfar),
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fovy, self.znear, self.zfar)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    /// Takes a new framebuffer size. Zero sizes (minimized windows) are
    /// ignored so the aspect ratio stays finite.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        debug!("Viewport is now {}x{} (aspect {:.3})", width, height, self.aspect());
    }

    /// Queues a rotation; it is eased in by [OrbitCamera::step].
    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.pending_theta += dtheta;
        self.pending_phi += dphi;
    }

    /// Queues a pan by a screen-space offset in pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        // World length of one pixel at the target's depth
        let pixel = 2.0 * self.radius * (self.fovy / 2.0).tan() / self.height as f32;

        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);

        self.pending_pan += (-dx * right + dy * up) * pixel;
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// Applies one frame's share of the queued motion.
    pub fn step(&mut self) {
        self.theta = (self.theta + self.pending_theta * self.damping) % (2.0 * PI);
        self.phi = nalgebra::clamp(
            self.phi + self.pending_phi * self.damping,
            self.phi_limit,
            PI - self.phi_limit,
        );
        self.target += self.pending_pan * self.damping;

        let decay = 1.0 - self.damping;
        self.pending_theta *= decay;
        self.pending_phi *= decay;
        self.pending_pan *= decay;
    }

    fn drag_angle(&self, pixels: f32) -> f32 {
        2.0 * PI * pixels / self.height as f32 * self.rotate_speed
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                let dpos = curr_pos - self.last_cursor_pos;

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Drag right == camera swings left around the target
                    self.rotate(-self.drag_angle(dpos.x), -self.drag_angle(dpos.y));
                } else if canvas.get_mouse_button(MouseButton::Button2) == Action::Press {
                    self.pan(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off > 0.0 {
                    self.zoom(self.scroll_ratio.recip());
                } else if off < 0.0 {
                    self.zoom(self.scroll_ratio)
                }
            }
            WindowEvent::FramebufferSize(w, h) => self.resize(w, h),
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, KEY_ANGLE_STEP)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(KEY_ANGLE_STEP, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(KEY_ZOOM_STEP.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.target
            + self.radius
                * Vector3::new(
                    self.phi.sin() * self.theta.sin(),
                    self.phi.cos(),
                    self.phi.sin() * self.theta.cos(),
                )
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {
        self.step();
    }

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
