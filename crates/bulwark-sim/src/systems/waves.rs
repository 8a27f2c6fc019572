//! Grid wave progression.
//!
//! Enemies arrive in rows. A standby row waits off-board at row -1; each
//! time the row-advance timer expires every enemy steps one row toward the
//! fortress, units reaching the player's or fortress's line are resolved,
//! and a fresh standby row is spawned.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bulwark_core::constants::{MAX_ROW_ADVANCES_PER_TICK, MIN_ROW_ADVANCE_INTERVAL, STANDBY_ROW};
use bulwark_core::events::{EnemyAttackEvent, EnemySpawnedEvent, SimulationStepResult};
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;
use bulwark_core::types::GridCell;

use super::drops;
use crate::selection;

/// Timer and flags driving row advances across ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveProgress {
    row_advance_timer: f32,
    has_standby_row: bool,
    first_wave_spawned: bool,
    rows_advanced: u32,
    warned_unconfigured: bool,
    #[serde(skip)]
    column_buffer: Vec<i32>,
}

impl WaveProgress {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            row_advance_timer: settings.initial_spawn_delay.max(0.0),
            has_standby_row: false,
            first_wave_spawned: false,
            rows_advanced: 0,
            warned_unconfigured: false,
            column_buffer: Vec::with_capacity(settings.grid_columns.max(0) as usize),
        }
    }

    pub fn reset(&mut self, settings: &GameSettings) {
        self.row_advance_timer = settings.initial_spawn_delay.max(0.0);
        self.has_standby_row = false;
        self.first_wave_spawned = false;
        self.rows_advanced = 0;
        self.warned_unconfigured = false;
        self.column_buffer.clear();
    }

    pub fn row_advance_timer(&self) -> f32 {
        self.row_advance_timer
    }

    pub fn has_standby_row(&self) -> bool {
        self.has_standby_row
    }

    /// Number of row advances performed this session.
    pub fn rows_advanced(&self) -> u32 {
        self.rows_advanced
    }

    fn may_spawn(&self, settings: &GameSettings) -> bool {
        !(settings.spawn_only_first_wave && self.first_wave_spawned)
    }
}

/// Spawn a standby row when none is pending, then run every row advance
/// whose time has come, at most `MAX_ROW_ADVANCES_PER_TICK` per call.
pub fn run(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    progress: &mut WaveProgress,
    events: &mut SimulationStepResult,
    dt: f32,
) {
    if !settings.has_valid_grid() || settings.enemy_spawn_entries.is_empty() {
        if !progress.warned_unconfigured {
            warn!(
                rows = settings.grid_rows,
                columns = settings.grid_columns,
                spawn_entries = settings.enemy_spawn_entries.len(),
                "wave progression skipped: grid or spawn table not configured"
            );
            progress.warned_unconfigured = true;
        }
        return;
    }

    if !progress.has_standby_row && progress.may_spawn(settings) {
        spawn_standby_row(state, settings, rng, progress, events);
    }

    let interval = settings.enemy_row_advance_interval.max(MIN_ROW_ADVANCE_INTERVAL);
    progress.row_advance_timer -= dt;
    let mut advances = 0;
    while progress.row_advance_timer <= 0.0 {
        if advances == MAX_ROW_ADVANCES_PER_TICK {
            warn!(
                advances,
                timer = progress.row_advance_timer,
                "row advance backlog dropped, timer resynced"
            );
            progress.row_advance_timer = interval;
            break;
        }
        advances += 1;
        advance_rows(state, settings, rng, events);
        progress.has_standby_row = false;
        progress.rows_advanced += 1;
        debug!(advance = progress.rows_advanced, enemies = state.enemies().len(), "rows advanced");

        if progress.may_spawn(settings) {
            spawn_standby_row(state, settings, rng, progress, events);
        }
        progress.row_advance_timer += interval;
    }
}

/// Shuffle `0..grid_columns` and keep the first `columns_per_row`.
/// Returns the number of columns selected.
pub fn select_columns(settings: &GameSettings, rng: &mut ChaCha8Rng, columns: &mut Vec<i32>) -> usize {
    columns.clear();
    let count = settings.columns_per_row();
    if count == 0 {
        return 0;
    }
    columns.extend(0..settings.grid_columns);
    columns.shuffle(rng);
    columns.truncate(count);
    count
}

fn spawn_standby_row(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    progress: &mut WaveProgress,
    events: &mut SimulationStepResult,
) {
    let count = select_columns(settings, rng, &mut progress.column_buffer);
    if count == 0 {
        return;
    }
    let mut spawned = 0;
    for &column in &progress.column_buffer {
        if spawn_enemy(state, settings, rng, events, GridCell::new(STANDBY_ROW, column)) {
            spawned += 1;
        }
    }
    progress.has_standby_row = true;
    progress.first_wave_spawned = true;
    debug!(spawned, "standby row spawned");
}

fn spawn_enemy(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
    cell: GridCell,
) -> bool {
    let Some(definition) = selection::pick_spawn_definition(&settings.enemy_spawn_entries, rng) else {
        return false;
    };
    let id = state.next_enemy_id();
    let position = settings.cell_world_position(cell.row, cell.column);
    let enemy = definition.create_entity(id, cell, position);
    events.spawned_enemies.push(EnemySpawnedEvent {
        enemy_id: id,
        definition_id: definition.id.clone(),
        cell,
        position,
        max_health: enemy.max_health(),
    });
    state.add_enemy(enemy)
}

/// Step every living enemy one row forward. Enemies already dead are
/// reported removed instead.
fn advance_rows(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
) {
    for index in 0..state.enemies().len() {
        if !state.enemies()[index].is_alive() {
            drops::resolve_enemy_destroyed(state, settings, rng, events, index, true);
            continue;
        }
        let enemy = &mut state.enemies_mut()[index];
        enemy.advance_row();
        let position = settings.cell_world_position(enemy.grid_row(), enemy.grid_column());
        enemy.set_position(position);
        resolve_trigger_collision(state, settings, rng, events, index);
    }
}

/// An enemy reaching the player's line is spent harmlessly; one reaching
/// the fortress line rams it for its attack damage. Neither drops loot.
fn resolve_trigger_collision(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
    index: usize,
) {
    let enemy = &state.enemies()[index];
    let (id, y, damage) = (enemy.id(), enemy.position().y, enemy.attack_damage());

    if y <= state.player().position().y {
        debug!(enemy = id, "enemy reached the player line");
    } else if y <= state.fortress().position().y {
        let dealt = state.fortress_mut().apply_damage(damage);
        if dealt > 0.0 {
            events.enemy_attacks.push(EnemyAttackEvent {
                enemy_id: id,
                damage: dealt,
                fortress_remaining_health: state.fortress().current_health(),
            });
        }
        debug!(enemy = id, dealt, "enemy rammed the fortress");
    } else {
        return;
    }

    let enemy = &mut state.enemies_mut()[index];
    enemy.disable_drops();
    enemy.kill();
    drops::resolve_enemy_destroyed(state, settings, rng, events, index, false);
}
