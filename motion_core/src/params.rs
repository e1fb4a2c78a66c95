/// Motion tuning parameters
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Bounce sprite
    pub const BOUNCE_SPEED: f32 = 2.0; // px per tick, per axis
    pub const DEFAULT_SPRITE_SIZE: f32 = 50.0;

    // Drag card
    pub const DRAG_FRICTION: f32 = 0.95;
    pub const RETURN_SPEED: f32 = 0.03;
    pub const FLOAT_INTENSITY: f32 = 1.0;
    pub const VELOCITY_SAMPLE: f32 = 0.3;
    pub const FLOAT_PHASE_STEP: f32 = 0.02; // rad per tick
    pub const FLOAT_PHASE2_STEP: f32 = 0.015; // rad per tick
    pub const ROTATION_KEEP: f32 = 0.92;
    pub const DRAG_ROTATION_FACTOR: f32 = 0.05; // deg per px

    // Gestures
    pub const LONG_PRESS_MS: f64 = 300.0;
    pub const ARM_CANCEL_DISTANCE: f32 = 10.0;
    pub const CLICK_SUPPRESS_DISTANCE: f32 = 5.0;

    // Particles
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 6.0;
    pub const PARTICLE_MIN_RISE: f32 = 0.2;
    pub const PARTICLE_MAX_RISE: f32 = 0.8;
    pub const PARTICLE_SWAY: f32 = 0.3;
    pub const PARTICLE_PHASE_STEP: f32 = 0.01;

    // Parallax
    pub const PARALLAX_FACTOR: f32 = 0.5;
    pub const SHADE_MAX_OPACITY: f32 = 0.6;
}
