//! Enemy behavior: cooldowns and ranged fire at the fortress.
//!
//! An enemy attacks once it is within `attack_range` rows of the fortress
//! row. Rows past the fortress row never attack.

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use bulwark_core::constants::{DEGENERATE_DIRECTION_SQ, MIN_PROJECTILE_SPEED};
use bulwark_core::events::{EnemyProjectileFiredEvent, SimulationStepResult};
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;
use bulwark_core::types::{EnemyId, Float2, Float2Ext};

use super::drops;

pub fn run(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
    dt: f32,
) {
    if !settings.has_valid_grid() {
        return;
    }
    let fortress_row = settings.fortress_row();
    let speed = settings.enemy_projectile_speed.max(MIN_PROJECTILE_SPEED);

    for index in 0..state.enemies().len() {
        if !state.enemies()[index].is_alive() {
            drops::resolve_enemy_destroyed(state, settings, rng, events, index, true);
            continue;
        }
        let enemy = &mut state.enemies_mut()[index];
        enemy.update_cooldown(dt);

        let range = enemy.attack_range();
        if range <= 0.0 {
            continue;
        }
        let rows_from_fortress = fortress_row - enemy.grid_row();
        if rows_from_fortress < 0 || rows_from_fortress as f32 > range {
            continue;
        }
        if !enemy.try_attack() {
            continue;
        }
        let (id, origin, damage) = (enemy.id(), enemy.position(), enemy.attack_damage());
        fire_at_fortress(state, events, id, origin, damage, speed);
    }
}

fn fire_at_fortress(
    state: &mut GameState,
    events: &mut SimulationStepResult,
    enemy_id: EnemyId,
    origin: Float2,
    damage: f32,
    speed: f32,
) {
    let target = state.fortress().nearest_point(origin);
    let offset = target - origin;
    let direction = if offset.length_squared() <= DEGENERATE_DIRECTION_SQ {
        Float2::NEG_Y
    } else {
        offset.normalized_or(Float2::NEG_Y)
    };
    let projectile_id = state
        .add_enemy_projectile(enemy_id, origin, direction * speed, damage, target)
        .id();
    events.enemy_projectiles_fired.push(EnemyProjectileFiredEvent {
        projectile_id,
        enemy_id,
        origin,
        target,
        speed,
    });
    trace!(enemy = enemy_id, projectile = projectile_id, "enemy fired");
}
