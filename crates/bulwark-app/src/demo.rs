//! Built-in demo settings used when no settings file is given.

use bulwark_core::definitions::*;
use bulwark_core::enums::{EnemyCombatRole, ResourceDropType};
use bulwark_core::fixed_point::FixedPoint;
use bulwark_core::settings::GameSettings;

/// One turret, two enemy archetypes, the stock ability pool.
pub fn demo_settings() -> GameSettings {
    let bastion = PlayerDefinition {
        id: "bastion".to_string(),
        attack_range_raw: FixedPoint::from_raw(40_000),
        ..PlayerDefinition::default()
    };

    let grunt = EnemyDefinition {
        id: "grunt".to_string(),
        ..EnemyDefinition::default()
    };

    let spitter = EnemyDefinition {
        id: "spitter".to_string(),
        role: EnemyCombatRole::Ranged,
        max_health: 30.0,
        attack_damage: 6.0,
        attack_range: 2.0,
        attack_cooldown: 1.5,
        preferred_distance: 3.0,
        drops: vec![
            EnemyDropDefinition::guaranteed(ResourceDropType::Experience, 15.0),
            EnemyDropDefinition::chance(ResourceDropType::Gold, 8.0, 0.5),
            EnemyDropDefinition::chance(ResourceDropType::Ability, 1.0, 0.08),
        ],
        ..EnemyDefinition::default()
    };

    GameSettings {
        player_definitions: vec![bastion],
        row_spacing: 1.4,
        enemy_spawn_entries: vec![EnemySpawnEntry::new(grunt, 3.0), EnemySpawnEntry::new(spitter, 1.0)],
        ..GameSettings::default()
    }
}
