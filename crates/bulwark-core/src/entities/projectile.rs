use serde::{Deserialize, Serialize};

use crate::enums::ProjectileFaction;
use crate::types::{EnemyId, Float2, ProjectileId};

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSource {
    Player,
    Enemy(EnemyId),
}

/// A shot travelling in a straight line toward a fixed target point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileEntity {
    id: ProjectileId,
    source: ProjectileSource,
    position: Float2,
    velocity: Float2,
    target: Float2,
    damage: f32,
    explosion_radius: f32,
}

impl ProjectileEntity {
    pub fn new(
        id: ProjectileId,
        source: ProjectileSource,
        position: Float2,
        velocity: Float2,
        target: Float2,
        damage: f32,
        explosion_radius: f32,
    ) -> Self {
        Self {
            id,
            source,
            position,
            velocity,
            target,
            damage: damage.max(0.0),
            explosion_radius: explosion_radius.max(0.0),
        }
    }

    pub fn id(&self) -> ProjectileId {
        self.id
    }

    pub fn source(&self) -> ProjectileSource {
        self.source
    }

    /// The firing enemy, if any.
    pub fn source_id(&self) -> Option<EnemyId> {
        match self.source {
            ProjectileSource::Enemy(id) => Some(id),
            ProjectileSource::Player => None,
        }
    }

    pub fn faction(&self) -> ProjectileFaction {
        match self.source {
            ProjectileSource::Player => ProjectileFaction::Player,
            ProjectileSource::Enemy(_) => ProjectileFaction::Enemy,
        }
    }

    pub fn position(&self) -> Float2 {
        self.position
    }

    pub fn velocity(&self) -> Float2 {
        self.velocity
    }

    pub fn target(&self) -> Float2 {
        self.target
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Splash radius; 0 hits only what sits on the impact point.
    pub fn explosion_radius(&self) -> f32 {
        self.explosion_radius
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// True once the projectile is at or past its target along its velocity.
    pub fn has_reached_target(&self) -> bool {
        (self.target - self.position).dot(self.velocity) <= 0.0
    }

    /// Place the projectile on its target point, discarding overshoot.
    pub fn snap_to_target(&mut self) {
        self.position = self.target;
    }
}
