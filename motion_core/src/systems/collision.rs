use crate::{Axis, Bounce, BounceSprite, Config, Events, Viewport};
use hecs::World;

/// Reflect sprites off the viewport edges, clamping them back inside
pub fn bounce_sprites(world: &mut World, viewport: &Viewport, config: &Config, events: &mut Events) {
    for (entity, sprite) in world.query_mut::<&mut BounceSprite>() {
        if !sprite.is_active() {
            continue;
        }
        let max = config.max_position(viewport, sprite.size);

        // Axes are independent so a corner hit flips both
        if reflect(&mut sprite.pos.x, &mut sprite.vel.x, max.x) {
            events.bounces.push(Bounce {
                sprite: entity,
                axis: Axis::X,
            });
        }
        if reflect(&mut sprite.pos.y, &mut sprite.vel.y, max.y) {
            events.bounces.push(Bounce {
                sprite: entity,
                axis: Axis::Y,
            });
        }
    }
}

fn reflect(pos: &mut f32, vel: &mut f32, max: f32) -> bool {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = -*vel;
        true
    } else if *pos > max {
        *pos = max;
        *vel = -*vel;
        true
    } else {
        false
    }
}
