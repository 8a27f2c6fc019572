//! Player auto-attack: pick a target and fire when the cooldown allows.

use tracing::trace;

use bulwark_core::constants::{DEGENERATE_DIRECTION_SQ, MIN_PROJECTILE_SPEED};
use bulwark_core::entities::EnemyEntity;
use bulwark_core::events::{PlayerProjectileFiredEvent, SimulationStepResult};
use bulwark_core::settings::GameSettings;
use bulwark_core::state::{GameState, TargetLock};
use bulwark_core::types::{Float2, Float2Ext};

pub fn run(state: &mut GameState, settings: &GameSettings, events: &mut SimulationStepResult) {
    let player = state.player();
    if !player.can_attack() {
        return;
    }
    let origin = player.position();
    let range = player.attack_range();
    let range_sq = range * range;
    let damage = player.attack_damage();

    let target = match state.target() {
        TargetLock::Point(point) => Some(point),
        TargetLock::Cell { row, column } => enemy_in_cell(state.enemies(), row, column)
            .filter(|p| p.distance_squared(origin) <= range_sq)
            .or_else(|| nearest_enemy_in_range(state.enemies(), origin, range_sq)),
        TargetLock::None => nearest_enemy_in_range(state.enemies(), origin, range_sq),
    };
    let Some(target) = target else {
        return;
    };

    let offset = target - origin;
    let distance_sq = offset.length_squared();
    if distance_sq > range_sq {
        return;
    }
    let direction = if distance_sq <= DEGENERATE_DIRECTION_SQ {
        Float2::UP
    } else {
        offset.normalized_or(Float2::UP)
    };
    let speed = settings.player_projectile_speed.max(MIN_PROJECTILE_SPEED);
    let explosion_radius = settings.player_explosion_radius.max(0.0);

    let projectile_id = state
        .add_player_projectile(origin, direction * speed, damage, explosion_radius, target)
        .id();
    events.player_projectiles_fired.push(PlayerProjectileFiredEvent {
        projectile_id,
        origin,
        target,
        speed,
        explosion_radius,
    });
    state.player_mut().start_attack();
    trace!(projectile = projectile_id, ?target, "player fired");
}

fn enemy_in_cell(enemies: &[EnemyEntity], row: i32, column: i32) -> Option<Float2> {
    enemies
        .iter()
        .find(|e| e.is_alive() && e.grid_row() == row && e.grid_column() == column)
        .map(|e| e.position())
}

/// Closest living enemy strictly inside `range_sq`.
fn nearest_enemy_in_range(enemies: &[EnemyEntity], origin: Float2, range_sq: f32) -> Option<Float2> {
    let mut best = None;
    let mut best_sq = range_sq;
    for enemy in enemies.iter().filter(|e| e.is_alive()) {
        let distance_sq = enemy.position().distance_squared(origin);
        if distance_sq < best_sq {
            best_sq = distance_sq;
            best = Some(enemy.position());
        }
    }
    best
}
