//! Presentation boundary
//!
//! Motion state is computed by `step`; `present` hands the result to whatever
//! draws it. Nothing in this crate touches a rendering surface directly.

use crate::{BounceSprite, DragCard, Particle};
use glam::Vec2;
use hecs::{Entity, World};

/// Visual transform for one instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub rotate: Vec2, // (rotateX, rotateY) in degrees
    pub opacity: f32,
}

impl Transform {
    pub fn translate(translate: Vec2) -> Self {
        Self {
            translate,
            rotate: Vec2::ZERO,
            opacity: 1.0,
        }
    }

    /// CSS `transform` value; rotation is omitted when there is none
    pub fn css(&self) -> String {
        let t = self.translate;
        let r = self.rotate;
        if r == Vec2::ZERO {
            format!("translate3d({:.2}px, {:.2}px, 0)", t.x, t.y)
        } else {
            format!(
                "translate3d({:.2}px, {:.2}px, 0) rotateX({:.2}deg) rotateY({:.2}deg)",
                t.x, t.y, r.x, r.y
            )
        }
    }
}

/// Receives one transform per visible instance per frame
pub trait TransformSink {
    fn write(&mut self, instance: Entity, transform: Transform);
}

/// Write the current transform of every visible instance
pub fn present(world: &World, sink: &mut impl TransformSink) {
    for (entity, sprite) in world.query::<&BounceSprite>().iter() {
        if sprite.is_active() {
            sink.write(entity, Transform::translate(sprite.pos));
        }
    }

    for (entity, card) in world.query::<&DragCard>().iter() {
        sink.write(
            entity,
            Transform {
                translate: card.rendered_offset(),
                rotate: card.rotation,
                opacity: 1.0,
            },
        );
    }

    for (entity, particle) in world.query::<&Particle>().iter() {
        sink.write(
            entity,
            Transform {
                translate: particle.pos,
                rotate: Vec2::ZERO,
                opacity: particle.opacity(),
            },
        );
    }
}

/// Collects writes; handy for hosts that batch and for tests
#[derive(Debug, Default)]
pub struct TransformLog {
    pub writes: Vec<(Entity, Transform)>,
}

impl TransformSink for TransformLog {
    fn write(&mut self, instance: Entity, transform: Transform) {
        self.writes.push((instance, transform));
    }
}

impl TransformLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_instance(&self, instance: Entity) -> impl Iterator<Item = &Transform> {
        self.writes
            .iter()
            .filter(move |(e, _)| *e == instance)
            .map(|(_, t)| t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_translate_only() {
        let t = Transform::translate(Vec2::new(750.0, 300.5));
        assert_eq!(t.css(), "translate3d(750.00px, 300.50px, 0)");
    }

    #[test]
    fn test_css_with_rotation() {
        let t = Transform {
            translate: Vec2::new(-12.345, 0.0),
            rotate: Vec2::new(-1.5, 0.25),
            opacity: 1.0,
        };
        assert_eq!(
            t.css(),
            "translate3d(-12.35px, 0.00px, 0) rotateX(-1.50deg) rotateY(0.25deg)"
        );
    }

    #[test]
    fn test_present_skips_failed_sprites() {
        let mut world = World::new();
        let live = crate::create_sprite(&mut world, Vec2::new(1.0, 2.0), Vec2::ZERO, Vec2::ONE);
        let dead = crate::create_sprite(&mut world, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        world.get::<&mut BounceSprite>(dead).unwrap().status = crate::SpriteStatus::AssetFailed;

        let mut log = TransformLog::new();
        present(&world, &mut log);

        assert_eq!(log.writes, vec![(live, Transform::translate(Vec2::new(1.0, 2.0)))]);
    }
}
