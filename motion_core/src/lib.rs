pub mod components;
pub mod config;
pub mod error;
pub mod gesture;
pub mod parallax;
pub mod params;
pub mod resources;
pub mod scene;
pub mod systems;
pub mod transform;

pub use components::*;
pub use config::*;
pub use error::*;
pub use gesture::*;
pub use parallax::*;
pub use params::*;
pub use resources::*;
pub use scene::*;
pub use transform::*;

use hecs::World;
use systems::*;

/// Advance every effect by one frame
pub fn step(
    world: &mut World,
    time: &mut Time,
    viewport: &Viewport,
    config: &Config,
    events: &mut Events,
) {
    // Clear events at start of frame
    events.clear();

    // 1. Move sprites by their per-tick velocity
    move_sprites(world);

    // 2. Reflect sprites off the viewport edges
    bounce_sprites(world, viewport, config, events);

    // 3. Float phases and return-to-rest for idle cards
    advance_cards(world, config);
    expire_click_suppression(world);

    // 4. Background particles
    drift_particles(world, viewport, config, events);

    time.tick += 1;
}

/// Helper to create a bounce sprite entity
pub fn create_sprite(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, size: glam::Vec2) -> hecs::Entity {
    world.spawn((BounceSprite::new(pos, vel, size),))
}

/// Helper to create a drag card entity with its gesture tracker
pub fn create_card(world: &mut World, options: CardOptions) -> hecs::Entity {
    world.spawn((DragCard::new(options), Gesture::new()))
}

/// Helper to create a particle entity; it keeps its own RNG for recycling
pub fn create_particle(world: &mut World, particle: Particle, rng: MotionRng) -> hecs::Entity {
    world.spawn((particle, rng))
}
