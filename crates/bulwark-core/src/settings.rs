//! Game settings: every tunable of a session in one serde-friendly struct.
//!
//! Missing JSON fields fall back to the defaults below, so a settings file
//! only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ABILITY_CHOICES, DEFAULT_WAVE_FILL_RATIO};
use crate::definitions::{AbilityDefinition, EnemyDefinition, EnemySpawnEntry, PlayerDefinition};
use crate::error::ConfigError;
use crate::types::Float2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // --- Player ---
    pub player_spawn_position: Float2,
    pub player_definitions: Vec<PlayerDefinition>,
    /// Out-of-range indices are clamped into the definition list.
    pub default_player_index: usize,
    pub movement_min_x: f32,
    pub movement_max_x: f32,
    pub player_projectile_speed: f32,
    pub player_explosion_radius: f32,

    // --- Progression ---
    pub base_experience_to_level: f32,
    pub experience_growth_factor: f32,
    /// Seconds between a drop spawning and it being collected.
    pub experience_pickup_delay: f32,
    /// Drop chance added per point of player luck.
    pub luck_bonus_per_point: f32,
    pub ability_choices_per_level: usize,
    pub ability_pool: Vec<AbilityDefinition>,
    /// Offer one free ability shortly after the session starts.
    pub offer_initial_ability: bool,

    // --- Fortress ---
    pub fortress_position: Float2,
    pub fortress_half_extents: Float2,
    pub fortress_max_health: f32,

    // --- Enemy grid ---
    pub grid_rows: i32,
    pub grid_columns: i32,
    /// Seconds between row advances.
    pub enemy_row_advance_interval: f32,
    pub spawn_origin_x: f32,
    pub spawn_column_spacing: f32,
    /// World y of row 0.
    pub first_row_y: f32,
    pub row_spacing: f32,
    /// Fraction of columns filled per spawned row.
    pub wave_column_fill_ratio: f32,
    pub spawn_only_first_wave: bool,
    pub initial_spawn_delay: f32,
    pub enemy_spawn_entries: Vec<EnemySpawnEntry>,
    pub enemy_projectile_speed: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player_spawn_position: Float2::new(0.0, -4.0),
            player_definitions: vec![PlayerDefinition::default()],
            default_player_index: 0,
            movement_min_x: -6.0,
            movement_max_x: 6.0,
            player_projectile_speed: 12.0,
            player_explosion_radius: 1.5,

            base_experience_to_level: 100.0,
            experience_growth_factor: 1.25,
            experience_pickup_delay: 1.0,
            luck_bonus_per_point: 0.02,
            ability_choices_per_level: DEFAULT_ABILITY_CHOICES,
            ability_pool: AbilityDefinition::stock_pool(),
            offer_initial_ability: true,

            fortress_position: Float2::new(0.0, -5.0),
            fortress_half_extents: Float2::new(1.5, 0.75),
            fortress_max_health: 500.0,

            grid_rows: 8,
            grid_columns: 6,
            enemy_row_advance_interval: 1.25,
            spawn_origin_x: -6.0,
            spawn_column_spacing: 2.4,
            first_row_y: 7.5,
            row_spacing: 0.4,
            wave_column_fill_ratio: DEFAULT_WAVE_FILL_RATIO,
            spawn_only_first_wave: false,
            initial_spawn_delay: 1.5,
            enemy_spawn_entries: vec![EnemySpawnEntry::new(EnemyDefinition::default(), 1.0)],
            enemy_projectile_speed: 8.0,
        }
    }
}

impl GameSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Choices offered per level-up; zero means the default.
    pub fn effective_ability_choices(&self) -> usize {
        if self.ability_choices_per_level == 0 {
            DEFAULT_ABILITY_CHOICES
        } else {
            self.ability_choices_per_level
        }
    }

    /// Fail fast on settings that cannot produce a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_definitions.is_empty() {
            return Err(ConfigError::NoPlayerDefinitions);
        }
        let required = self.effective_ability_choices();
        if self.ability_pool.len() < required {
            return Err(ConfigError::AbilityPoolTooSmall {
                available: self.ability_pool.len(),
                required,
            });
        }
        Ok(())
    }

    /// Index of the player definition to use, clamped into range.
    /// `None` when no definitions are configured.
    pub fn resolved_player_index(&self) -> Option<usize> {
        let last = self.player_definitions.len().checked_sub(1)?;
        Some(self.default_player_index.min(last))
    }

    pub fn default_player_definition(&self) -> Result<&PlayerDefinition, ConfigError> {
        let index = self.resolved_player_index().ok_or(ConfigError::NoPlayerDefinitions)?;
        Ok(&self.player_definitions[index])
    }

    pub fn has_valid_grid(&self) -> bool {
        self.grid_rows > 0 && self.grid_columns > 0
    }

    /// Row of the grid adjacent to the fortress.
    pub fn fortress_row(&self) -> i32 {
        (self.grid_rows - 1).max(0)
    }

    /// World position of a grid cell. Row -1 sits one spacing above row 0.
    pub fn cell_world_position(&self, row: i32, column: i32) -> Float2 {
        Float2::new(
            self.spawn_origin_x + column as f32 * self.spawn_column_spacing,
            self.first_row_y - row as f32 * self.row_spacing,
        )
    }

    /// Number of columns filled per spawned row: at least 1, at most all.
    pub fn columns_per_row(&self) -> usize {
        if self.grid_columns <= 0 {
            return 0;
        }
        let ratio = if self.wave_column_fill_ratio <= 0.0 {
            DEFAULT_WAVE_FILL_RATIO
        } else {
            self.wave_column_fill_ratio.min(1.0)
        };
        let columns = self.grid_columns as usize;
        ((columns as f32 * ratio).floor() as usize).clamp(1, columns)
    }
}
