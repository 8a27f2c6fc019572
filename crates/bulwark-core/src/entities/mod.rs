//! Simulation entities.
//!
//! Unlike plain components, entities guard their own invariants: health is
//! kept within `[0, max]` and stats are clamped on construction and on every
//! modifier. Callers mutate them only through these methods.

mod enemy;
mod fortress;
mod player;
mod projectile;
mod resource_drop;

pub use enemy::{EnemyEntity, EnemyStats};
pub use fortress::FortressEntity;
pub use player::{PlayerEntity, PlayerStats};
pub use projectile::{ProjectileEntity, ProjectileSource};
pub use resource_drop::ResourceDropEntity;
