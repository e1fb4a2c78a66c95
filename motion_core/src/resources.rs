use glam::Vec2;
use hecs::Entity;

/// Frame clock; motion is per tick, wall time only gates gestures
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub tick: u64,
    pub now_ms: f64,
}

impl Time {
    pub fn new(tick: u64, now_ms: f64) -> Self {
        Self { tick, now_ms }
    }
}

/// Viewport snapshot, refreshed once per tick by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Random number generator, owned by a single instance
pub struct MotionRng(pub rand::rngs::StdRng);

impl MotionRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Stream for the `index`-th instance spawned in a scene seeded with `scene_seed`
    pub fn for_instance(scene_seed: u64, index: u64) -> Self {
        // splitmix64 finalizer so neighbouring indices land far apart
        let mut z = scene_seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }
}

impl Default for MotionRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A sprite reflected off a viewport edge this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounce {
    pub sprite: Entity,
    pub axis: Axis,
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub bounces: Vec<Bounce>,
    pub particles_recycled: u32,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bounces.clear();
        self.particles_recycled = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_clear() {
        let mut world = hecs::World::new();
        let sprite = world.spawn(());
        let mut events = Events::new();
        events.bounces.push(Bounce {
            sprite,
            axis: Axis::X,
        });
        events.particles_recycled = 3;

        events.clear();

        assert!(events.bounces.is_empty());
        assert_eq!(events.particles_recycled, 0);
    }

    #[test]
    fn test_rng_is_reproducible() {
        use rand::Rng;
        let mut a = MotionRng::new(42);
        let mut b = MotionRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.0.gen::<u32>(), b.0.gen::<u32>());
        }
    }

    #[test]
    fn test_instance_streams_are_distinct() {
        use rand::Rng;
        let draw = |index| MotionRng::for_instance(77, index).0.gen::<u64>();
        assert_eq!(draw(3), draw(3));
        assert_ne!(draw(0), draw(1));
        assert_ne!(
            MotionRng::for_instance(1, 0).0.gen::<u64>(),
            MotionRng::for_instance(2, 0).0.gen::<u64>()
        );
    }
}
