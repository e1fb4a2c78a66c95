use hecs::Entity;

/// Errors from scene operations on a specific instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MotionError {
    #[error("instance {0:?} does not exist")]
    NoSuchInstance(Entity),
    #[error("instance {instance:?} is not a {expected}")]
    WrongKind {
        instance: Entity,
        expected: &'static str,
    },
}
