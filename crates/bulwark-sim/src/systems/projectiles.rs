//! Projectile flight and impact resolution for both factions.
//!
//! Projectiles are processed newest-first so removal by index is safe.

use rand_chacha::ChaCha8Rng;

use bulwark_core::enums::ProjectileFaction;
use bulwark_core::events::{EnemyAttackEvent, EnemyHitEvent, ProjectileImpactEvent, SimulationStepResult};
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;
use bulwark_core::types::Float2;

use super::drops;

/// Advance player projectiles; on arrival, splash every living enemy within
/// the explosion radius of the impact point.
pub fn run_player(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
    dt: f32,
) {
    for index in (0..state.player_projectiles().len()).rev() {
        let projectile = &mut state.player_projectiles_mut()[index];
        projectile.advance(dt);
        if !projectile.has_reached_target() {
            continue;
        }
        // Blast is centred on the aimed point, not the overshoot.
        projectile.snap_to_target();
        let (id, impact, damage, radius) = (
            projectile.id(),
            projectile.position(),
            projectile.damage(),
            projectile.explosion_radius(),
        );

        apply_splash(state, settings, rng, events, impact, damage, radius);
        events.projectile_impacts.push(ProjectileImpactEvent {
            projectile_id: id,
            faction: ProjectileFaction::Player,
            position: impact,
            explosion_radius: radius,
        });
        state.remove_player_projectile_at(index);
    }
}

fn apply_splash(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
    impact: Float2,
    damage: f32,
    radius: f32,
) {
    let radius_sq = radius * radius;
    for index in 0..state.enemies().len() {
        let enemy = &mut state.enemies_mut()[index];
        if !enemy.is_alive() || enemy.position().distance_squared(impact) > radius_sq {
            continue;
        }
        let dealt = enemy.apply_damage(damage);
        if dealt > 0.0 {
            events.enemy_hits.push(EnemyHitEvent {
                enemy_id: enemy.id(),
                damage: dealt,
                remaining_health: enemy.current_health(),
            });
        }
        if !enemy.is_alive() {
            drops::resolve_enemy_destroyed(state, settings, rng, events, index, true);
        }
    }
}

/// Advance enemy projectiles; on arrival they damage the fortress.
pub fn run_enemy(state: &mut GameState, events: &mut SimulationStepResult, dt: f32) {
    for index in (0..state.enemy_projectiles().len()).rev() {
        let projectile = &mut state.enemy_projectiles_mut()[index];
        projectile.advance(dt);
        if !projectile.has_reached_target() {
            continue;
        }
        projectile.snap_to_target();
        let (id, source, impact, damage) = (
            projectile.id(),
            projectile.source_id(),
            projectile.position(),
            projectile.damage(),
        );

        let dealt = state.fortress_mut().apply_damage(damage);
        if dealt > 0.0 {
            if let Some(enemy_id) = source {
                events.enemy_attacks.push(EnemyAttackEvent {
                    enemy_id,
                    damage: dealt,
                    fortress_remaining_health: state.fortress().current_health(),
                });
            }
        }
        events.projectile_impacts.push(ProjectileImpactEvent {
            projectile_id: id,
            faction: ProjectileFaction::Enemy,
            position: impact,
            explosion_radius: 0.0,
        });
        state.remove_enemy_projectile_at(index);
    }
}
