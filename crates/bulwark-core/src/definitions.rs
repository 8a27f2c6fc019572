//! Authored content: player archetypes, enemy archetypes, drop tables, abilities.
//!
//! Definitions are immutable data loaded with the settings. Balance-critical
//! player stats and drop probabilities are authored in fixed-point units.

use serde::{Deserialize, Serialize};

use crate::entities::{EnemyEntity, EnemyStats, PlayerEntity, PlayerStats};
use crate::enums::*;
use crate::fixed_point::FixedPoint;
use crate::types::{EnemyId, Float2, GridCell};

// --- Player ---

/// Player archetype with stats in fixed-point units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDefinition {
    pub id: String,
    pub move_speed_raw: FixedPoint,
    pub attack_damage_raw: FixedPoint,
    pub attack_range_raw: FixedPoint,
    pub attack_cooldown_raw: FixedPoint,
    pub max_health_raw: FixedPoint,
    pub luck_raw: FixedPoint,
}

impl Default for PlayerDefinition {
    fn default() -> Self {
        Self {
            id: "turret".to_string(),
            move_speed_raw: FixedPoint::from_raw(80_000),
            attack_damage_raw: FixedPoint::from_raw(250_000),
            attack_range_raw: FixedPoint::from_raw(25_000),
            attack_cooldown_raw: FixedPoint::from_raw(7_500),
            max_health_raw: FixedPoint::from_raw(1_000_000),
            luck_raw: FixedPoint::ZERO,
        }
    }
}

impl PlayerDefinition {
    pub fn stats(&self) -> PlayerStats {
        PlayerStats {
            move_speed: self.move_speed_raw.to_float(),
            attack_damage: self.attack_damage_raw.to_float(),
            attack_range: self.attack_range_raw.to_float(),
            attack_cooldown: self.attack_cooldown_raw.to_float(),
        }
    }

    pub fn create_entity(&self, spawn_position: Float2) -> PlayerEntity {
        PlayerEntity::new(
            spawn_position,
            self.stats(),
            self.max_health_raw.to_float(),
            self.luck_raw.to_float(),
        )
    }
}

// --- Enemies ---

/// One entry of an enemy's drop table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyDropDefinition {
    #[serde(rename = "type")]
    pub drop_type: ResourceDropType,
    pub amount: f32,
    /// Base drop chance in fixed-point units (10,000 = always).
    pub probability_raw: FixedPoint,
    /// Bypasses the probability roll entirely.
    pub guaranteed: bool,
}

impl Default for EnemyDropDefinition {
    fn default() -> Self {
        Self {
            drop_type: ResourceDropType::Experience,
            amount: 1.0,
            probability_raw: FixedPoint::ZERO,
            guaranteed: false,
        }
    }
}

impl EnemyDropDefinition {
    pub fn guaranteed(drop_type: ResourceDropType, amount: f32) -> Self {
        Self {
            drop_type,
            amount,
            probability_raw: FixedPoint::ONE,
            guaranteed: true,
        }
    }

    pub fn chance(drop_type: ResourceDropType, amount: f32, probability: f32) -> Self {
        Self {
            drop_type,
            amount,
            probability_raw: FixedPoint::from_float(probability),
            guaranteed: false,
        }
    }

    /// Base probability in `[0, 1]`.
    pub fn probability(&self) -> f32 {
        self.probability_raw.to_float().clamp(0.0, 1.0)
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyDefinition {
    pub id: String,
    pub role: EnemyCombatRole,
    pub move_speed: f32,
    pub max_health: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub preferred_distance: f32,
    pub drops: Vec<EnemyDropDefinition>,
}

impl Default for EnemyDefinition {
    fn default() -> Self {
        Self {
            id: "grunt".to_string(),
            role: EnemyCombatRole::Melee,
            move_speed: 2.0,
            max_health: 50.0,
            attack_damage: 10.0,
            attack_range: 1.5,
            attack_cooldown: 1.0,
            preferred_distance: 0.0,
            drops: vec![
                EnemyDropDefinition::guaranteed(ResourceDropType::Experience, 10.0),
                EnemyDropDefinition::guaranteed(ResourceDropType::Gold, 5.0),
                EnemyDropDefinition::chance(ResourceDropType::Health, 5.0, 0.1),
                EnemyDropDefinition::chance(ResourceDropType::Ability, 1.0, 0.05),
            ],
        }
    }
}

impl EnemyDefinition {
    pub fn stats(&self) -> EnemyStats {
        EnemyStats {
            move_speed: self.move_speed,
            max_health: self.max_health,
            attack_damage: self.attack_damage,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
            role: self.role,
            preferred_distance: self.preferred_distance,
        }
    }

    pub fn create_entity(&self, id: EnemyId, cell: GridCell, position: Float2) -> EnemyEntity {
        EnemyEntity::new(id, self.id.clone(), cell, position, self.stats(), self.drops.clone())
    }
}

/// Weighted choice of enemy archetype for wave spawning.
/// An entry without a definition is skipped by selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpawnEntry {
    pub definition: Option<EnemyDefinition>,
    /// Non-positive weights count as 1.
    pub weight: f32,
}

impl Default for EnemySpawnEntry {
    fn default() -> Self {
        Self {
            definition: None,
            weight: 1.0,
        }
    }
}

impl EnemySpawnEntry {
    pub fn new(definition: EnemyDefinition, weight: f32) -> Self {
        Self {
            definition: Some(definition),
            weight,
        }
    }
}

// --- Abilities ---

/// Single stat change applied by an ability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectModifier {
    pub attribute: GameplayAttribute,
    #[serde(default)]
    pub operation: ModifierOperation,
    pub value: f32,
}

impl EffectModifier {
    pub fn new(attribute: GameplayAttribute, operation: ModifierOperation, value: f32) -> Self {
        Self {
            attribute,
            operation,
            value,
        }
    }
}

/// A named group of modifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectDefinition {
    pub name: String,
    pub modifiers: Vec<EffectModifier>,
}

/// An upgrade the player can pick on level-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub effects: Vec<EffectDefinition>,
}

impl AbilityDefinition {
    /// Ability with a single effect made of one modifier.
    pub fn single(id: &str, title: &str, modifier: EffectModifier) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            effects: vec![EffectDefinition {
                name: id.to_string(),
                modifiers: vec![modifier],
            }],
            ..Self::default()
        }
    }

    /// Basic upgrades available when no pool is configured.
    pub fn stock_pool() -> Vec<AbilityDefinition> {
        use GameplayAttribute::*;
        use ModifierOperation::*;
        vec![
            Self::single("heavy_rounds", "Heavy Rounds", EffectModifier::new(AttackDamage, Add, 5.0)),
            Self::single("rapid_loader", "Rapid Loader", EffectModifier::new(AttackCooldown, Multiply, 0.85)),
            Self::single("long_barrel", "Long Barrel", EffectModifier::new(AttackRange, Add, 0.5)),
            Self::single("greased_rails", "Greased Rails", EffectModifier::new(MoveSpeed, Multiply, 1.15)),
        ]
    }
}
