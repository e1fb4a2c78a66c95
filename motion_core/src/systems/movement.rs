use crate::BounceSprite;
use hecs::World;

/// Advance every active sprite by one tick of velocity
pub fn move_sprites(world: &mut World) {
    for (_entity, sprite) in world.query_mut::<&mut BounceSprite>() {
        if sprite.is_active() {
            sprite.pos += sprite.vel;
        }
    }
}
