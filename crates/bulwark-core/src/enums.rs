//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of resource an enemy drops on death.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceDropType {
    #[default]
    Experience,
    Gold,
    Health,
    /// Grants an extra ability choice.
    Ability,
}

/// Side a projectile was fired by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileFaction {
    Player,
    Enemy,
}

/// Enemy combat style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyCombatRole {
    /// Closes to contact range.
    #[default]
    Melee,
    /// Holds a preferred stand-off distance.
    Ranged,
}

/// Player stat an ability modifier can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameplayAttribute {
    AttackDamage,
    AttackCooldown,
    MoveSpeed,
    AttackRange,
}

/// How a modifier combines with the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierOperation {
    #[default]
    Add,
    Multiply,
}

/// Why the session stopped advancing the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseReason {
    AwaitAbilitySelection,
}
