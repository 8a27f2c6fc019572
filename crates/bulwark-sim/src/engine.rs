//! Simulation service: the per-tick core of the game.
//!
//! `SimulationService` owns the game state, the settings it was composed
//! with and the session's random generator. `tick` runs every system in a
//! fixed order and returns the events of that tick. Same seed and same
//! inputs give the same results.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use bulwark_core::entities::ResourceDropEntity;
use bulwark_core::events::SimulationStepResult;
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;
use bulwark_core::types::sanitize_dt;

use crate::systems;
use crate::systems::waves::WaveProgress;

pub struct SimulationService {
    state: GameState,
    settings: GameSettings,
    rng: ChaCha8Rng,
    waves: WaveProgress,
    ready_drops: Vec<ResourceDropEntity>,
    events: SimulationStepResult,
}

impl SimulationService {
    pub fn new(state: GameState, settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(state, settings, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(state: GameState, settings: GameSettings, rng: ChaCha8Rng) -> Self {
        Self {
            waves: WaveProgress::new(&settings),
            state,
            settings,
            rng,
            ready_drops: Vec::new(),
            events: SimulationStepResult::default(),
        }
    }

    /// Advance the simulation by `dt` seconds. Negative or non-finite `dt` counts as 0.
    pub fn tick(&mut self, dt: f32) -> SimulationStepResult {
        let dt = sanitize_dt(dt);

        // 1. Clock
        self.state.advance_time(dt);

        // 2. Per-tick buffers
        self.events.clear();
        self.ready_drops.clear();

        // 3. Standby spawn and row advances
        systems::waves::run(
            &mut self.state,
            &self.settings,
            &mut self.rng,
            &mut self.waves,
            &mut self.events,
            dt,
        );

        // 4. Player auto-attack
        systems::player_attack::run(&mut self.state, &self.settings, &mut self.events);

        // 5. Player projectiles and splash damage
        systems::projectiles::run_player(
            &mut self.state,
            &self.settings,
            &mut self.rng,
            &mut self.events,
            dt,
        );

        // 6. Enemy cooldowns and fire
        systems::enemy_behavior::run(
            &mut self.state,
            &self.settings,
            &mut self.rng,
            &mut self.events,
            dt,
        );

        // 7. Enemy projectiles
        systems::projectiles::run_enemy(&mut self.state, &mut self.events, dt);

        // 8. Resource drop timers
        systems::drops::run(&mut self.state, &mut self.ready_drops, &mut self.events, dt);

        // 9. Cleanup
        systems::cleanup::run(&mut self.state, &self.settings, &mut self.rng, &mut self.events);

        std::mem::take(&mut self.events)
    }

    /// Back to session start: state reset and wave timers re-armed.
    /// The random generator keeps its position.
    pub fn reset(&mut self) {
        self.state.reset();
        self.waves.reset(&self.settings);
        self.ready_drops.clear();
        self.events.clear();
        info!("simulation reset");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn waves(&self) -> &WaveProgress {
        &self.waves
    }

    /// Mutable state alongside the settings, for callers that need both.
    pub fn split_mut(&mut self) -> (&mut GameState, &GameSettings) {
        (&mut self.state, &self.settings)
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}
