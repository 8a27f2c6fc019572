//! Resource drops: rolling drop tables on enemy death and releasing
//! drops whose pickup delay has run out.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use bulwark_core::entities::ResourceDropEntity;
use bulwark_core::events::{ResourceDropCollectedEvent, ResourceDropSpawnedEvent, SimulationStepResult};
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;

use crate::selection;

/// Report the enemy at `index` as removed and, unless suppressed, roll its
/// drop table. Each enemy is resolved at most once per tick.
pub fn resolve_enemy_destroyed(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
    index: usize,
    allow_drops: bool,
) {
    let Some(enemy) = state.enemies().get(index) else {
        return;
    };
    let (id, position, drops_disabled) = (enemy.id(), enemy.position(), enemy.drops_disabled());
    if !events.record_removed(id) {
        return;
    }
    if !allow_drops || drops_disabled {
        return;
    }

    let luck = state.player().luck();
    let delay = settings.experience_pickup_delay.max(0.0);
    for slot in 0..state.enemies()[index].drops().len() {
        let drop = state.enemies()[index].drops()[slot];
        if !selection::roll_drop(&drop, luck, settings.luck_bonus_per_point, rng) {
            continue;
        }
        let queued = state.queue_resource_drop(drop.drop_type, position, drop.amount, delay);
        events.resource_drops_spawned.push(ResourceDropSpawnedEvent {
            drop_id: queued.id(),
            drop_type: queued.drop_type(),
            position,
            amount: queued.amount(),
            pickup_delay: delay,
        });
    }
    debug!(enemy = id, "enemy destroyed");
}

/// Tick pending drops and report the ones ready for pickup.
pub fn run(
    state: &mut GameState,
    ready: &mut Vec<ResourceDropEntity>,
    events: &mut SimulationStepResult,
    dt: f32,
) {
    if state.collect_ready_resource_drops(dt, ready) == 0 {
        return;
    }
    events
        .resource_drops_collected
        .extend(ready.iter().map(|drop| ResourceDropCollectedEvent {
            drop_id: drop.id(),
            drop_type: drop.drop_type(),
            amount: drop.amount(),
        }));
}
