use serde::{Deserialize, Serialize};

use crate::constants::MIN_MAX_HEALTH;
use crate::types::Float2;

/// The structure the player defends. The session ends when it is destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortressEntity {
    position: Float2,
    half_extents: Float2,
    max_health: f32,
    current_health: f32,
}

impl FortressEntity {
    pub fn new(position: Float2, half_extents: Float2, max_health: f32) -> Self {
        let max_health = max_health.max(MIN_MAX_HEALTH);
        Self {
            position,
            half_extents: half_extents.max(Float2::ZERO),
            max_health,
            current_health: max_health,
        }
    }

    pub fn position(&self) -> Float2 {
        self.position
    }

    pub fn half_extents(&self) -> Float2 {
        self.half_extents
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.current_health <= 0.0
    }

    /// Closest point of the fortress box to `point`.
    pub fn nearest_point(&self, point: Float2) -> Float2 {
        if self.half_extents == Float2::ZERO {
            return self.position;
        }
        point.clamp(self.position - self.half_extents, self.position + self.half_extents)
    }

    /// Returns the damage actually dealt. No-op once destroyed.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || self.is_destroyed() {
            return 0.0;
        }
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        dealt
    }

    /// Returns the amount actually restored. No-op once destroyed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || self.is_destroyed() {
            return 0.0;
        }
        let healed = amount.min(self.max_health - self.current_health);
        self.current_health += healed;
        healed
    }

    pub fn reset(&mut self) {
        self.current_health = self.max_health;
    }
}
