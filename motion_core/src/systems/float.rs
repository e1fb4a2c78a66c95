use crate::{Config, DragCard, Gesture};
use hecs::World;

/// Advance float phases and, for idle cards, the return-to-rest integrator
pub fn advance_cards(world: &mut World, config: &Config) {
    for (_entity, card) in world.query_mut::<&mut DragCard>() {
        card.float_phase += config.float_phase_step;
        card.float_phase2 += config.float_phase2_step;

        if card.dragging {
            continue;
        }

        card.offset += card.velocity;
        card.velocity *= config.drag_friction;
        card.offset *= 1.0 - card.options.return_speed;

        // First-order low-pass toward the ambient wobble
        let target = card.ambient_rotation();
        card.rotation = card.rotation * config.rotation_keep + target * (1.0 - config.rotation_keep);
    }
}

/// Drop click suppressions that no click claimed during the previous frame
pub fn expire_click_suppression(world: &mut World) {
    for (_entity, gesture) in world.query_mut::<&mut Gesture>() {
        gesture.expire_click();
    }
}
