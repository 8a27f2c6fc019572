use serde::{Deserialize, Serialize};

use crate::constants::{DEGENERATE_DIRECTION_SQ, MIN_ENEMY_MAX_HEALTH, PREFERRED_RANGE_TOLERANCE};
use crate::definitions::EnemyDropDefinition;
use crate::enums::EnemyCombatRole;
use crate::types::{EnemyId, Float2, GridCell};

/// Per-archetype enemy stats, copied into each spawned enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub move_speed: f32,
    pub max_health: f32,
    pub attack_damage: f32,
    /// Attack reach in rows from the fortress row.
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub role: EnemyCombatRole,
    pub preferred_distance: f32,
}

/// A hostile unit occupying one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyEntity {
    id: EnemyId,
    definition_id: String,
    cell: GridCell,
    position: Float2,
    stats: EnemyStats,
    current_health: f32,
    attack_cooldown_remaining: f32,
    drops: Vec<EnemyDropDefinition>,
    drops_disabled: bool,
}

impl EnemyEntity {
    pub fn new(
        id: EnemyId,
        definition_id: impl Into<String>,
        cell: GridCell,
        position: Float2,
        stats: EnemyStats,
        drops: Vec<EnemyDropDefinition>,
    ) -> Self {
        let stats = EnemyStats {
            move_speed: stats.move_speed.max(0.0),
            max_health: stats.max_health.max(MIN_ENEMY_MAX_HEALTH),
            attack_damage: stats.attack_damage.max(0.0),
            attack_range: stats.attack_range.max(0.0),
            attack_cooldown: stats.attack_cooldown.max(0.0),
            role: stats.role,
            preferred_distance: stats.preferred_distance.max(0.0),
        };
        Self {
            id,
            definition_id: definition_id.into(),
            cell,
            position,
            current_health: stats.max_health,
            stats,
            attack_cooldown_remaining: 0.0,
            drops,
            drops_disabled: false,
        }
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    /// Archetype name from the enemy definition.
    pub fn definition_id(&self) -> &str {
        &self.definition_id
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn grid_row(&self) -> i32 {
        self.cell.row
    }

    pub fn grid_column(&self) -> i32 {
        self.cell.column
    }

    pub fn position(&self) -> Float2 {
        self.position
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn role(&self) -> EnemyCombatRole {
        self.stats.role
    }

    pub fn attack_damage(&self) -> f32 {
        self.stats.attack_damage
    }

    pub fn attack_range(&self) -> f32 {
        self.stats.attack_range
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    pub fn drops(&self) -> &[EnemyDropDefinition] {
        &self.drops
    }

    pub fn drops_disabled(&self) -> bool {
        self.drops_disabled
    }

    /// Suppress all resource drops for this enemy's death.
    pub fn disable_drops(&mut self) {
        self.drops_disabled = true;
    }

    pub fn set_position(&mut self, position: Float2) {
        self.position = position;
    }

    /// Move one row closer to the fortress. Position is updated by the caller.
    pub fn advance_row(&mut self) {
        self.cell.row += 1;
    }

    /// Step toward `target` by at most `move_speed * dt`, stopping on it.
    pub fn move_towards(&mut self, target: Float2, dt: f32) {
        let offset = target - self.position;
        let distance_sq = offset.length_squared();
        if distance_sq <= DEGENERATE_DIRECTION_SQ {
            self.position = target;
            return;
        }
        let step = self.stats.move_speed * dt;
        let distance = distance_sq.sqrt();
        if step >= distance {
            self.position = target;
        } else {
            self.position += offset / distance * step;
        }
    }

    /// Ranged enemies want to sit at their preferred distance (or attack range
    /// when none is set); melee enemies just need to be within attack range.
    pub fn is_in_preferred_range(&self, target: Float2) -> bool {
        let distance = self.position.distance(target);
        match self.stats.role {
            EnemyCombatRole::Ranged => {
                let desired = if self.stats.preferred_distance > 0.0 {
                    self.stats.preferred_distance
                } else {
                    self.stats.attack_range
                };
                (distance - desired).abs() <= PREFERRED_RANGE_TOLERANCE
            }
            EnemyCombatRole::Melee => distance <= self.stats.attack_range + PREFERRED_RANGE_TOLERANCE,
        }
    }

    pub fn update_cooldown(&mut self, dt: f32) {
        if self.attack_cooldown_remaining > 0.0 {
            self.attack_cooldown_remaining = (self.attack_cooldown_remaining - dt).max(0.0);
        }
    }

    pub fn can_attack(&self) -> bool {
        self.is_alive() && self.attack_cooldown_remaining <= 0.0
    }

    /// Start the cooldown if ready. Returns whether an attack may happen.
    pub fn try_attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.attack_cooldown_remaining = self.stats.attack_cooldown;
        true
    }

    /// Returns the damage actually dealt. No-op once dead.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        dealt
    }

    /// Returns the amount actually restored. No-op once dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        let healed = amount.min(self.stats.max_health - self.current_health);
        self.current_health += healed;
        healed
    }

    /// Reduce health to zero.
    pub fn kill(&mut self) {
        self.current_health = 0.0;
    }
}
