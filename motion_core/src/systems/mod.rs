pub mod collision;
pub mod float;
pub mod movement;
pub mod particles;

pub use collision::*;
pub use float::*;
pub use movement::*;
pub use particles::*;
