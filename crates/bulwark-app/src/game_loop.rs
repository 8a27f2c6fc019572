//! Fixed-step run loop for the headless host.
//!
//! Runs the session frame by frame, picks the first offered ability
//! whenever the session pauses for a choice, and stops early on game over.

use serde::Serialize;
use tracing::{debug, info};

use bulwark_core::commands::SessionCommand;
use bulwark_core::input::InputReader;
use bulwark_sim::GameSession;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Maximum number of frames to run.
    pub ticks: u32,
    /// Seconds per frame.
    pub dt: f32,
}

/// Outcome of a headless run, printed as JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub ticks_run: u32,
    pub elapsed_secs: f32,
    pub game_over: bool,
    pub fortress_health: f32,
    pub fortress_max_health: f32,
    pub player_level: u32,
    pub player_gold: f32,
    pub enemies_spawned: usize,
    pub enemies_removed: usize,
    pub level_ups: usize,
    pub abilities_selected: usize,
}

pub fn run(session: &mut GameSession, input: &mut impl InputReader, options: RunOptions) -> RunSummary {
    let mut summary = RunSummary::default();

    for _ in 0..options.ticks {
        summary.ticks_run += 1;
        let Some(result) = session.tick(options.dt, input) else {
            if session.is_game_over() {
                break;
            }
            if session.is_paused() {
                let title = session.ability_choices().next().map(|a| a.title.clone());
                info!(ability = ?title, "auto-selecting first ability");
                session.queue_command(SessionCommand::SelectAbility { index: 0 });
                summary.abilities_selected += 1;
            }
            continue;
        };

        for spawned in &result.spawned_enemies {
            debug!(enemy = spawned.enemy_id, kind = %spawned.definition_id, column = spawned.cell.column, "spawned");
        }
        for id in &result.removed_enemy_ids {
            debug!(enemy = id, "removed");
        }
        for attack in &result.enemy_attacks {
            debug!(
                enemy = attack.enemy_id,
                damage = attack.damage,
                fortress = attack.fortress_remaining_health,
                "fortress hit"
            );
        }
        for level_up in &result.player_level_ups {
            info!(level = level_up.level, "level up");
        }
        summary.enemies_spawned += result.spawned_enemies.len();
        summary.enemies_removed += result.removed_enemy_ids.len();
        summary.level_ups += result.player_level_ups.len();

        if session.is_game_over() {
            break;
        }
    }

    let state = session.state();
    summary.elapsed_secs = state.elapsed();
    summary.game_over = state.is_game_over();
    summary.fortress_health = state.fortress().current_health();
    summary.fortress_max_health = state.fortress().max_health();
    summary.player_level = state.player().level();
    summary.player_gold = state.player().gold();
    info!(
        ticks = summary.ticks_run,
        elapsed = summary.elapsed_secs,
        game_over = summary.game_over,
        "run finished"
    );
    summary
}
