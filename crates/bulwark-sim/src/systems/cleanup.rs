//! Cleanup system: removes dead enemies at the end of the tick.
//!
//! Any enemy that died without being reported (for example damaged from
//! outside the tick) is reported here first, with its drop roll.

use rand_chacha::ChaCha8Rng;

use bulwark_core::events::SimulationStepResult;
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;

use super::drops;

pub fn run(
    state: &mut GameState,
    settings: &GameSettings,
    rng: &mut ChaCha8Rng,
    events: &mut SimulationStepResult,
) {
    for index in 0..state.enemies().len() {
        if !state.enemies()[index].is_alive() {
            drops::resolve_enemy_destroyed(state, settings, rng, events, index, true);
        }
    }
    state.remove_dead_enemies();
}
