//! Game session controller.
//!
//! `GameSession` composes the game state from settings, drives the
//! simulation service from host input, applies collected drops to the
//! player and runs the ability-choice flow. Host commands are queued and
//! drained at the start of the next tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use bulwark_core::commands::SessionCommand;
use bulwark_core::constants::{INITIAL_ABILITY_OFFER_DELAY_SECS, MIN_BOMBARDMENT_RELEASE_RADIUS};
use bulwark_core::definitions::AbilityDefinition;
use bulwark_core::entities::FortressEntity;
use bulwark_core::enums::{PauseReason, ResourceDropType};
use bulwark_core::error::ConfigError;
use bulwark_core::events::{PlayerLevelUpEvent, ResourceDropCollectedEvent, SimulationStepResult};
use bulwark_core::input::InputReader;
use bulwark_core::settings::GameSettings;
use bulwark_core::state::GameState;
use bulwark_core::types::{sanitize_dt, Float2};

use crate::engine::SimulationService;
use crate::selection;

/// Configuration for starting a new session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Build the initial game state: player from the default definition with
/// bounds and level curve applied, fortress from the settings.
pub fn compose_state(settings: &GameSettings) -> Result<GameState, ConfigError> {
    let index = settings.resolved_player_index().ok_or(ConfigError::NoPlayerDefinitions)?;
    if index != settings.default_player_index {
        warn!(
            requested = settings.default_player_index,
            using = index,
            "default player index out of range, clamped"
        );
    }
    let definition = &settings.player_definitions[index];
    let mut player = definition.create_entity(settings.player_spawn_position);
    player.set_horizontal_bounds(settings.movement_min_x, settings.movement_max_x);
    player.configure_experience_progression(
        settings.base_experience_to_level,
        settings.experience_growth_factor,
        1,
    );
    let fortress = FortressEntity::new(
        settings.fortress_position,
        settings.fortress_half_extents,
        settings.fortress_max_health,
    );
    Ok(GameState::new(player, fortress))
}

pub struct GameSession {
    sim: SimulationService,
    command_queue: VecDeque<SessionCommand>,
    input_blocked: bool,
    pause: Option<PauseReason>,
    /// Pool indices currently offered. Empty when no choice is presented.
    ability_choices: Vec<usize>,
    /// Selections owed to the player, including the one on screen.
    pending_ability_selections: u32,
    initial_offer_timer: Option<f32>,
}

impl GameSession {
    /// Validate the settings and compose a ready-to-run session.
    pub fn new(settings: GameSettings, config: SessionConfig) -> Result<Self, ConfigError> {
        if let Err(err) = settings.validate() {
            error!(%err, "session composition rejected");
            return Err(err);
        }
        let state = compose_state(&settings)?;
        info!(
            seed = config.seed,
            rows = settings.grid_rows,
            columns = settings.grid_columns,
            abilities = settings.ability_pool.len(),
            "session composed"
        );

        let mut session = Self {
            sim: SimulationService::new(state, settings, config.seed),
            command_queue: VecDeque::new(),
            input_blocked: false,
            pause: None,
            ability_choices: Vec::new(),
            pending_ability_selections: 0,
            initial_offer_timer: None,
        };
        session.start_game();
        Ok(session)
    }

    // --- Use cases ---

    /// Reset to a fresh session.
    pub fn start_game(&mut self) {
        self.sim.reset();
        let (state, settings) = self.sim.split_mut();
        state
            .player_mut()
            .set_horizontal_bounds(settings.movement_min_x, settings.movement_max_x);
        self.initial_offer_timer = settings
            .offer_initial_ability
            .then_some(INITIAL_ABILITY_OFFER_DELAY_SECS);
        self.pause = None;
        self.ability_choices.clear();
        self.pending_ability_selections = 0;
        info!("game started");
    }

    /// Tick the player's cooldown and move along the track.
    /// `input` is clamped to `[-1, 1]`; non-finite input is ignored.
    pub fn move_player(&mut self, input: f32, dt: f32) {
        let direction = if input.is_finite() { input.clamp(-1.0, 1.0) } else { 0.0 };
        let player = self.sim.state_mut().player_mut();
        player.update_cooldown(dt);
        player.move_horizontal(direction, dt);
    }

    /// Queue a command for processing at the next tick.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn set_input_blocked(&mut self, blocked: bool) {
        self.input_blocked = blocked;
    }

    /// Advance one frame. Returns `None` without simulating while the game
    /// is over or paused for an ability choice.
    pub fn tick(&mut self, dt: f32, input: &mut impl InputReader) -> Option<SimulationStepResult> {
        self.process_commands();
        if self.is_game_over() || self.is_paused() {
            return None;
        }
        let dt = sanitize_dt(dt);

        self.update_initial_ability_offer(dt);
        if self.is_paused() {
            return None;
        }

        let movement = input.read_movement(self.input_blocked);
        self.move_player(movement, dt);
        if let Some(point) = input.read_target_point(self.input_blocked) {
            self.process_target_input(point);
        }

        let mut result = self.sim.tick(dt);
        for collected in &result.resource_drops_collected {
            self.apply_resource_drop(collected, &mut result.player_level_ups);
        }
        self.try_present_ability_choices();

        if self.is_game_over() {
            info!(elapsed = self.sim.state().elapsed(), "fortress destroyed, game over");
        }
        Some(result)
    }

    /// Pick one of the offered abilities. Returns false when no choice is
    /// on screen or `index` is out of range.
    pub fn select_ability(&mut self, index: usize) -> bool {
        if self.pause != Some(PauseReason::AwaitAbilitySelection) {
            return false;
        }
        let Some(&pool_index) = self.ability_choices.get(index) else {
            warn!(index, offered = self.ability_choices.len(), "ability selection out of range");
            return false;
        };

        let (state, settings) = self.sim.split_mut();
        let ability = &settings.ability_pool[pool_index];
        state.player_mut().apply_ability(ability);
        info!(ability = %ability.id, "ability selected");

        self.ability_choices.clear();
        self.pause = None;
        self.pending_ability_selections = self.pending_ability_selections.saturating_sub(1);
        self.try_present_ability_choices();
        true
    }

    /// Owe the player one more ability choice and present it if possible.
    pub fn force_ability_selection(&mut self) -> bool {
        self.pending_ability_selections += 1;
        self.try_present_ability_choices()
    }

    // --- Queries ---

    pub fn state(&self) -> &GameState {
        self.sim.state()
    }

    pub fn settings(&self) -> &GameSettings {
        self.sim.settings()
    }

    pub fn simulation(&self) -> &SimulationService {
        &self.sim
    }

    pub fn is_game_over(&self) -> bool {
        self.sim.state().is_game_over()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_some()
    }

    pub fn pause_reason(&self) -> Option<PauseReason> {
        self.pause
    }

    pub fn input_blocked(&self) -> bool {
        self.input_blocked
    }

    pub fn pending_ability_selections(&self) -> u32 {
        self.pending_ability_selections
    }

    /// Abilities currently offered, in presentation order.
    pub fn ability_choices(&self) -> impl Iterator<Item = &AbilityDefinition> + '_ {
        let pool = &self.sim.settings().ability_pool;
        self.ability_choices.iter().map(move |&index| &pool[index])
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        self.sim.state_mut()
    }

    // --- Internals ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartGame => self.start_game(),
            SessionCommand::SelectAbility { index } => {
                self.select_ability(index);
            }
            SessionCommand::ForceAbilitySelection => {
                self.force_ability_selection();
            }
            SessionCommand::SetTargetCell { row, column } => {
                self.sim.state_mut().set_target_cell(row, column);
            }
            SessionCommand::ClearTarget => self.sim.state_mut().clear_target(),
            SessionCommand::SetInputBlocked { blocked } => self.set_input_blocked(blocked),
        }
    }

    fn update_initial_ability_offer(&mut self, dt: f32) {
        let Some(remaining) = self.initial_offer_timer.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return;
        }
        self.initial_offer_timer = None;
        self.pending_ability_selections += 1;
        self.try_present_ability_choices();
    }

    /// A press near the locked bombardment point releases it; a press within
    /// attack range locks (or moves) it.
    fn process_target_input(&mut self, point: Float2) {
        let release_radius =
            (self.sim.settings().player_explosion_radius * 0.5).max(MIN_BOMBARDMENT_RELEASE_RADIUS);
        let state = self.sim.state_mut();

        if let Some(locked) = state.fixed_bombardment() {
            if point.distance_squared(locked) <= release_radius * release_radius {
                state.clear_fixed_bombardment();
                debug!("bombardment lock released");
                return;
            }
        }

        let range = state.player().attack_range();
        if point.distance_squared(state.player().position()) <= range * range {
            state.set_fixed_bombardment(point);
            debug!(?point, "bombardment locked");
        }
    }

    fn apply_resource_drop(&mut self, drop: &ResourceDropCollectedEvent, level_ups: &mut Vec<PlayerLevelUpEvent>) {
        let player = self.sim.state_mut().player_mut();
        match drop.drop_type {
            ResourceDropType::Experience => {
                let gained = player.add_experience(drop.amount);
                if gained > 0 {
                    level_ups.push(PlayerLevelUpEvent {
                        level: player.level(),
                        current_experience: player.current_experience(),
                        experience_to_next_level: player.experience_to_next_level(),
                    });
                    info!(level = player.level(), "player leveled up");
                    self.pending_ability_selections += gained;
                }
            }
            ResourceDropType::Gold => player.add_gold(drop.amount),
            ResourceDropType::Health => {
                player.heal(drop.amount);
            }
            ResourceDropType::Ability => self.pending_ability_selections += 1,
        }
    }

    /// Draw a fresh set of choices and pause, if one is owed and none is shown.
    fn try_present_ability_choices(&mut self) -> bool {
        if self.pending_ability_selections == 0 || !self.ability_choices.is_empty() {
            return false;
        }
        let count = self.sim.settings().effective_ability_choices();
        let pool_len = self.sim.settings().ability_pool.len();
        let picks = selection::draw_distinct(count, pool_len, self.sim.rng_mut());
        if picks.is_empty() {
            return false;
        }
        self.ability_choices = picks;
        self.pause = Some(PauseReason::AwaitAbilitySelection);
        debug!(choices = ?self.ability_choices, "ability choices presented");
        true
    }
}
