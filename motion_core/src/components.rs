use crate::{CardOptions, Config, MotionRng, Viewport};
use glam::Vec2;
use rand::Rng;

/// Sprite lifecycle: active sprites move, failed ones stay put and are not drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteStatus {
    Active,
    AssetFailed,
}

/// Bounce sprite component - the roaming mascot
#[derive(Debug, Clone, Copy)]
pub struct BounceSprite {
    pub pos: Vec2,
    pub vel: Vec2, // displacement per tick
    pub size: Vec2,
    pub status: SpriteStatus,
}

impl BounceSprite {
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel,
            size,
            status: SpriteStatus::Active,
        }
    }

    /// Random position inside the viewport, random velocity per axis
    pub fn random(viewport: &Viewport, size: Vec2, config: &Config, rng: &mut MotionRng) -> Self {
        let max = config.max_position(viewport, size);
        let pos = Vec2::new(rng.0.gen_range(0.0..=max.x), rng.0.gen_range(0.0..=max.y));
        let vel = Vec2::new(
            rng.0.gen_range(-1.0..=1.0) * config.bounce_speed,
            rng.0.gen_range(-1.0..=1.0) * config.bounce_speed,
        );
        Self::new(pos, vel, size)
    }

    pub fn is_active(&self) -> bool {
        self.status == SpriteStatus::Active
    }
}

/// One term of the ambient float: amplitude * wave(f1 * phase + f2 * phase2 + offset)
#[derive(Debug, Clone, Copy)]
struct Wave {
    amplitude: f32,
    f1: f32,
    f2: f32,
    offset: f32,
}

impl Wave {
    const fn new(amplitude: f32, f1: f32, f2: f32, offset: f32) -> Self {
        Self {
            amplitude,
            f1,
            f2,
            offset,
        }
    }

    fn arg(&self, phase: f32, phase2: f32) -> f32 {
        self.f1 * phase + self.f2 * phase2 + self.offset
    }
}

const FLOAT_X: [Wave; 3] = [
    Wave::new(8.0, 1.0, 0.0, 0.0),
    Wave::new(4.0, 0.0, 1.3, 0.5),
    Wave::new(3.0, 0.7, 1.0, 1.2),
];

const FLOAT_Y: [Wave; 3] = [
    Wave::new(7.0, 0.8, 0.0, 0.0),
    Wave::new(5.0, 0.0, 1.0, 0.8),
    Wave::new(3.0, 1.2, 0.5, 2.0),
];

/// Peak ambient displacement per axis at intensity 1
pub const FLOAT_AMPLITUDE: f32 = 15.0;

const ROTATION_AMPLITUDE: f32 = 3.0; // degrees

/// Drag card component - glass card that can be flung and springs home
#[derive(Debug, Clone, Copy)]
pub struct DragCard {
    pub offset: Vec2,
    pub velocity: Vec2,
    pub float_phase: f32,
    pub float_phase2: f32,
    pub rotation: Vec2, // (rotateX, rotateY) in degrees
    pub dragging: bool,
    pub options: CardOptions,
}

impl DragCard {
    pub fn new(options: CardOptions) -> Self {
        Self {
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            float_phase: 0.0,
            float_phase2: 0.0,
            rotation: Vec2::ZERO,
            dragging: false,
            options,
        }
    }

    /// Idle displacement layered on top of the drag offset
    pub fn ambient_offset(&self) -> Vec2 {
        let (p, q) = (self.float_phase, self.float_phase2);
        let x: f32 = FLOAT_X.iter().map(|w| w.amplitude * w.arg(p, q).sin()).sum();
        let y: f32 = FLOAT_Y.iter().map(|w| w.amplitude * w.arg(p, q).cos()).sum();
        Vec2::new(x, y) * self.options.float_intensity
    }

    /// Rotation the card relaxes toward while idle
    pub fn ambient_rotation(&self) -> Vec2 {
        Vec2::new(
            ROTATION_AMPLITUDE * (self.float_phase2 * 1.1).sin(),
            ROTATION_AMPLITUDE * (self.float_phase * 0.9).cos(),
        ) * self.options.float_intensity
    }

    /// Final translation written to the element
    pub fn rendered_offset(&self) -> Vec2 {
        self.offset + self.ambient_offset()
    }
}

/// Floating background particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub rise: f32, // px per tick, upward
    pub size: f32,
    pub phase: f32,
}

impl Particle {
    /// Seed a particle anywhere in the viewport
    pub fn random(viewport: &Viewport, config: &Config, rng: &mut MotionRng) -> Self {
        let y = rng.0.gen_range(0.0..=viewport.height.max(0.0));
        Self::seeded_at(y, viewport, config, rng)
    }

    /// Respawn just below the bottom edge with a fresh column
    pub fn recycle(&mut self, viewport: &Viewport, config: &Config, rng: &mut MotionRng) {
        *self = Self::seeded_at(viewport.height + self.size, viewport, config, rng);
    }

    fn seeded_at(y: f32, viewport: &Viewport, config: &Config, rng: &mut MotionRng) -> Self {
        Self {
            pos: Vec2::new(rng.0.gen_range(0.0..=viewport.width.max(0.0)), y),
            rise: rng.0.gen_range(config.particle_min_rise..=config.particle_max_rise),
            size: rng.0.gen_range(config.particle_min_size..=config.particle_max_size),
            phase: rng.0.gen_range(0.0..std::f32::consts::TAU),
        }
    }

    /// Twinkle between 0.2 and 0.8
    pub fn opacity(&self) -> f32 {
        0.5 + 0.3 * self.phase.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_waves_sum_to_amplitude() {
        let x: f32 = FLOAT_X.iter().map(|w| w.amplitude).sum();
        let y: f32 = FLOAT_Y.iter().map(|w| w.amplitude).sum();
        assert_eq!(x, FLOAT_AMPLITUDE);
        assert_eq!(y, FLOAT_AMPLITUDE);
    }

    #[test]
    fn test_ambient_offset_scales_with_intensity() {
        let mut card = DragCard::new(CardOptions::default());
        card.float_phase = 1.7;
        card.float_phase2 = 0.4;
        let base = card.ambient_offset();

        card.options.float_intensity = 2.0;
        let doubled = card.ambient_offset();
        assert!((doubled - base * 2.0).length() < 1e-4);

        card.options.float_intensity = 0.0;
        assert_eq!(card.ambient_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_random_sprite_inside_viewport() {
        let config = Config::new();
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = MotionRng::new(7);
        for _ in 0..200 {
            let sprite = BounceSprite::random(&viewport, Vec2::splat(50.0), &config, &mut rng);
            assert!(sprite.pos.x >= 0.0 && sprite.pos.x <= 750.0);
            assert!(sprite.pos.y >= 0.0 && sprite.pos.y <= 550.0);
            assert!(sprite.vel.x.abs() <= config.bounce_speed);
            assert!(sprite.vel.y.abs() <= config.bounce_speed);
            assert!(sprite.is_active());
        }
    }

    #[test]
    fn test_random_sprite_in_undersized_viewport() {
        let config = Config::new();
        let viewport = Viewport::new(30.0, 30.0);
        let mut rng = MotionRng::new(1);
        let sprite = BounceSprite::random(&viewport, Vec2::splat(50.0), &config, &mut rng);
        assert_eq!(sprite.pos, Vec2::ZERO);
    }

    #[test]
    fn test_particle_opacity_range() {
        let config = Config::new();
        let viewport = Viewport::new(400.0, 300.0);
        let mut rng = MotionRng::new(3);
        for _ in 0..100 {
            let p = Particle::random(&viewport, &config, &mut rng);
            let o = p.opacity();
            assert!((0.2 - 1e-6..=0.8 + 1e-6).contains(&o));
            assert!(p.size >= config.particle_min_size && p.size <= config.particle_max_size);
        }
    }
}
