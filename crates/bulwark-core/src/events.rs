//! Events emitted by the simulation once per tick for presentation.
//!
//! Each list in a [`SimulationStepResult`] is complete for its tick and in
//! causal order: an enemy's removal always follows the hit that killed it.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{DropId, EnemyId, Float2, GridCell, ProjectileId};

/// Enemy placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawnedEvent {
    pub enemy_id: EnemyId,
    /// Archetype name, for picking a visual.
    pub definition_id: String,
    pub cell: GridCell,
    pub position: Float2,
    pub max_health: f32,
}

/// Damage dealt to the fortress, by a projectile or by a unit reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyAttackEvent {
    pub enemy_id: EnemyId,
    pub damage: f32,
    pub fortress_remaining_health: f32,
}

/// Player projectile damaged an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyHitEvent {
    pub enemy_id: EnemyId,
    pub damage: f32,
    pub remaining_health: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerProjectileFiredEvent {
    pub projectile_id: ProjectileId,
    pub origin: Float2,
    pub target: Float2,
    pub speed: f32,
    pub explosion_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProjectileFiredEvent {
    pub projectile_id: ProjectileId,
    pub enemy_id: EnemyId,
    pub origin: Float2,
    pub target: Float2,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileImpactEvent {
    pub projectile_id: ProjectileId,
    pub faction: ProjectileFaction,
    pub position: Float2,
    pub explosion_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceDropSpawnedEvent {
    pub drop_id: DropId,
    pub drop_type: ResourceDropType,
    pub position: Float2,
    pub amount: f32,
    pub pickup_delay: f32,
}

/// Drop whose pickup delay elapsed. Its effect is applied by the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceDropCollectedEvent {
    pub drop_id: DropId,
    pub drop_type: ResourceDropType,
    pub amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerLevelUpEvent {
    pub level: u32,
    pub current_experience: f32,
    pub experience_to_next_level: f32,
}

/// Everything that happened in one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStepResult {
    pub spawned_enemies: Vec<EnemySpawnedEvent>,
    pub removed_enemy_ids: Vec<EnemyId>,
    pub enemy_attacks: Vec<EnemyAttackEvent>,
    pub enemy_hits: Vec<EnemyHitEvent>,
    pub player_projectiles_fired: Vec<PlayerProjectileFiredEvent>,
    pub enemy_projectiles_fired: Vec<EnemyProjectileFiredEvent>,
    pub projectile_impacts: Vec<ProjectileImpactEvent>,
    pub resource_drops_spawned: Vec<ResourceDropSpawnedEvent>,
    pub resource_drops_collected: Vec<ResourceDropCollectedEvent>,
    pub player_level_ups: Vec<PlayerLevelUpEvent>,
}

impl SimulationStepResult {
    pub fn clear(&mut self) {
        self.spawned_enemies.clear();
        self.removed_enemy_ids.clear();
        self.enemy_attacks.clear();
        self.enemy_hits.clear();
        self.player_projectiles_fired.clear();
        self.enemy_projectiles_fired.clear();
        self.projectile_impacts.clear();
        self.resource_drops_spawned.clear();
        self.resource_drops_collected.clear();
        self.player_level_ups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.spawned_enemies.is_empty()
            && self.removed_enemy_ids.is_empty()
            && self.enemy_attacks.is_empty()
            && self.enemy_hits.is_empty()
            && self.player_projectiles_fired.is_empty()
            && self.enemy_projectiles_fired.is_empty()
            && self.projectile_impacts.is_empty()
            && self.resource_drops_spawned.is_empty()
            && self.resource_drops_collected.is_empty()
            && self.player_level_ups.is_empty()
    }

    /// Record an enemy removal once, however many paths report it.
    pub fn record_removed(&mut self, id: EnemyId) -> bool {
        if self.removed_enemy_ids.contains(&id) {
            return false;
        }
        self.removed_enemy_ids.push(id);
        true
    }
}
