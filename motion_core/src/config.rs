use crate::{Params, Viewport};
use glam::Vec2;

/// Motion configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bounce_speed: f32,
    pub default_sprite_size: f32,
    pub drag_friction: f32,
    pub velocity_sample: f32,
    pub float_phase_step: f32,
    pub float_phase2_step: f32,
    pub rotation_keep: f32,
    pub drag_rotation_factor: f32,
    pub long_press_ms: f64,
    pub arm_cancel_distance: f32,
    pub click_suppress_distance: f32,
    pub particle_min_size: f32,
    pub particle_max_size: f32,
    pub particle_min_rise: f32,
    pub particle_max_rise: f32,
    pub particle_sway: f32,
    pub particle_phase_step: f32,
    pub parallax_factor: f32,
    pub shade_max_opacity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounce_speed: Params::BOUNCE_SPEED,
            default_sprite_size: Params::DEFAULT_SPRITE_SIZE,
            drag_friction: Params::DRAG_FRICTION,
            velocity_sample: Params::VELOCITY_SAMPLE,
            float_phase_step: Params::FLOAT_PHASE_STEP,
            float_phase2_step: Params::FLOAT_PHASE2_STEP,
            rotation_keep: Params::ROTATION_KEEP,
            drag_rotation_factor: Params::DRAG_ROTATION_FACTOR,
            long_press_ms: Params::LONG_PRESS_MS,
            arm_cancel_distance: Params::ARM_CANCEL_DISTANCE,
            click_suppress_distance: Params::CLICK_SUPPRESS_DISTANCE,
            particle_min_size: Params::PARTICLE_MIN_SIZE,
            particle_max_size: Params::PARTICLE_MAX_SIZE,
            particle_min_rise: Params::PARTICLE_MIN_RISE,
            particle_max_rise: Params::PARTICLE_MAX_RISE,
            particle_sway: Params::PARTICLE_SWAY,
            particle_phase_step: Params::PARTICLE_PHASE_STEP,
            parallax_factor: Params::PARALLAX_FACTOR,
            shade_max_opacity: Params::SHADE_MAX_OPACITY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the default box for a size that has not been laid out yet
    pub fn sprite_size(&self, width: f32, height: f32) -> Vec2 {
        if width > 0.0 && height > 0.0 {
            Vec2::new(width, height)
        } else {
            Vec2::splat(self.default_sprite_size)
        }
    }

    /// Largest top-left position that keeps a box of `size` inside the viewport
    pub fn max_position(&self, viewport: &Viewport, size: Vec2) -> Vec2 {
        (viewport.size() - size).max(Vec2::ZERO)
    }
}

/// Per-card tuning, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardOptions {
    pub return_speed: f32,
    pub float_intensity: f32,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            return_speed: Params::RETURN_SPEED,
            float_intensity: Params::FLOAT_INTENSITY,
        }
    }
}
