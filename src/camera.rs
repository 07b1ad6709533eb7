use glam::{Mat4, Vec3};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Radians per second while an orbit key is held.
pub const CAMERA_ROTATION_SPEED: f32 = 1.8;
/// Fraction of the distance per second while a zoom key is held.
pub const CAMERA_ZOOM_SPEED: f32 = 3.0;
/// Radians per pixel of left-button drag.
pub const MOUSE_ORBIT_SPEED: f32 = 0.005;
/// Fraction of the distance per scroll line.
pub const SCROLL_ZOOM_SPEED: f32 = 0.1;
const MIN_DISTANCE: f32 = 0.5;
const MAX_PITCH: f32 = 1.5;

#[derive(Default, Clone, Copy)]
pub struct MovementState {
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub orbit_up: bool,
    pub orbit_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl MovementState {
    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32, f32) {
        (
            Self::to_direction(self.orbit_right, self.orbit_left),
            Self::to_direction(self.orbit_up, self.orbit_down),
            Self::to_direction(self.zoom_out, self.zoom_in),
        )
    }

    pub const fn is_moving(&self) -> bool {
        self.orbit_left
            || self.orbit_right
            || self.orbit_up
            || self.orbit_down
            || self.zoom_in
            || self.zoom_out
    }
}

/// Camera orbiting a fixed target, Y up.
#[derive(Clone, Copy)]
pub struct Camera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub movement: MovementState,
    pub mouse_pressed: bool,
    pub last_mouse_pos: Option<(f32, f32)>,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 4.5,
            yaw: 0.0,
            pitch: 0.35,
            fov_y: 45f32.to_radians(),
            movement: MovementState::default(),
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.target + offset * self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), 0.1, 1000.0)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Apply held keys over `delta_time` seconds. Returns true if the camera moved.
    pub fn update(&mut self, delta_time: f32) -> bool {
        if !self.movement.is_moving() {
            return false;
        }
        let (yaw, pitch, zoom) = self.movement.velocity();
        let step = CAMERA_ROTATION_SPEED * delta_time;

        self.orbit(yaw * step, pitch * step);
        self.zoom(zoom * CAMERA_ZOOM_SPEED * delta_time);
        true
    }

    fn orbit(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (1.0 + amount)).max(MIN_DISTANCE);
    }

    /// Route a window event to the camera controls. Returns true if the view
    /// changed right away; held keys take effect in [`update`](Self::update).
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_keyboard(event);
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_pressed = *state == ElementState::Pressed;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.process_cursor(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_x, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.process_scroll(lines)
            }
            WindowEvent::Focused(false) => {
                self.movement = MovementState::default();
                self.mouse_pressed = false;
                false
            }
            _ => false,
        }
    }

    /// Orbit by the cursor delta while the left button is held.
    pub fn process_cursor(&mut self, x: f32, y: f32) -> bool {
        let moved = match (self.mouse_pressed, self.last_mouse_pos) {
            (true, Some((last_x, last_y))) => {
                // Dragging right swings the camera left around the target.
                self.orbit(-(x - last_x) * MOUSE_ORBIT_SPEED, (y - last_y) * MOUSE_ORBIT_SPEED);
                true
            }
            _ => false,
        };
        self.last_mouse_pos = Some((x, y));
        moved
    }

    /// Positive lines zoom in.
    pub fn process_scroll(&mut self, lines: f32) -> bool {
        self.zoom(-lines * SCROLL_ZOOM_SPEED);
        lines != 0.0
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyA | KeyCode::ArrowLeft => self.movement.orbit_left = is_pressed,
                KeyCode::KeyD | KeyCode::ArrowRight => self.movement.orbit_right = is_pressed,
                KeyCode::KeyW | KeyCode::ArrowUp => self.movement.orbit_up = is_pressed,
                KeyCode::KeyS | KeyCode::ArrowDown => self.movement.orbit_down = is_pressed,
                KeyCode::KeyQ => self.movement.zoom_in = is_pressed,
                KeyCode::KeyE => self.movement.zoom_out = is_pressed,
                _ => {}
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
