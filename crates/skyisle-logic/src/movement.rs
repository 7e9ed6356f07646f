//! Movement & camera controller — key state to velocity, pointer deltas to
//! yaw/pitch.
//!
//! The controller never owns position. It commands a horizontal velocity
//! for an externally owned physics body and passes the body's vertical
//! velocity through unchanged, except on a grounded jump. Camera
//! orientation lives here (yaw unbounded, pitch clamped).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A movement-relevant key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Sprint,
}

/// Raw input sampled once per simulation step.
///
/// Jump requests are edge-triggered and auto-clear when consumed. Pointer
/// deltas accumulate only while look mode is active; deltas arriving while
/// inactive are discarded, not buffered.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    jump_requested: bool,
    pointer_delta: Vec2,
    look_active: bool,
}

impl InputState {
    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Back => self.back = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
            MoveKey::Sprint => self.sprint = pressed,
        }
    }

    /// Register a jump request. Stays set until the next step consumes it.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Accumulate a raw pointer delta. Discarded while look mode is off.
    pub fn push_pointer_delta(&mut self, dx: f32, dy: f32) {
        if self.look_active {
            self.pointer_delta += Vec2::new(dx, dy);
        }
    }

    /// Engage or disengage look mode (pointer-lock gained/lost). Any
    /// pending delta is dropped on disengage.
    pub fn set_look_active(&mut self, active: bool) {
        self.look_active = active;
        if !active {
            self.pointer_delta = Vec2::ZERO;
        }
    }

    pub fn look_active(&self) -> bool {
        self.look_active
    }

    /// Consume the jump edge.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Consume the accumulated pointer delta.
    pub fn take_pointer_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pointer_delta)
    }
}

/// Camera orientation. Yaw rotates about +Y and wraps freely; pitch is
/// clamped to straight up / straight down.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    /// Apply a pointer delta at the given sensitivity. Positive dx looks
    /// right (yaw decreases), positive dy looks down (pitch decreases).
    pub fn apply_look(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity)
            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    /// Full view direction including pitch. Forward is -Z at zero yaw.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }
}

/// Commanded horizontal velocity from the current key flags.
///
/// Builds a camera-relative direction (forward = -Z), rotates it by yaw
/// only so movement stays on the horizontal plane, normalizes, and scales
/// by sprint or base speed. A zero input direction yields exactly zero —
/// the zero vector is never normalized.
pub fn horizontal_velocity(input: &InputState, yaw: f32, base_speed: f32, sprint_speed: f32) -> Vec3 {
    let mut local = Vec3::ZERO;
    if input.forward {
        local.z -= 1.0;
    }
    if input.back {
        local.z += 1.0;
    }
    if input.left {
        local.x -= 1.0;
    }
    if input.right {
        local.x += 1.0;
    }
    if local == Vec3::ZERO {
        return Vec3::ZERO;
    }
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    // Rotation about +Y applied to the local direction.
    let world = Vec3::new(
        local.x * cos_yaw + local.z * sin_yaw,
        0.0,
        -local.x * sin_yaw + local.z * cos_yaw,
    );
    let speed = if input.sprint { sprint_speed } else { base_speed };
    world.normalize() * speed
}

/// Vertical velocity after considering a jump request.
///
/// The impulse fires only when the body is grounded (|v_y| within epsilon
/// of zero). Airborne requests are no-ops; the caller still consumes the
/// edge so a held key cannot fire on landing.
pub fn vertical_velocity(
    jump_requested: bool,
    current_vertical: f32,
    jump_impulse: f32,
    grounded_epsilon: f32,
) -> f32 {
    if jump_requested && current_vertical.abs() < grounded_epsilon {
        jump_impulse
    } else {
        current_vertical
    }
}
