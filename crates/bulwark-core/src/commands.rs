//! Commands a host sends to the game session.
//!
//! Commands are queued and processed at the start of the next session tick,
//! including while the session is paused.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Reset to a fresh session.
    StartGame,
    /// Pick one of the currently offered abilities by index.
    SelectAbility { index: usize },
    /// Offer an ability choice immediately.
    ForceAbilitySelection,
    /// Lock auto-attack onto a grid cell.
    SetTargetCell { row: i32, column: i32 },
    /// Release any target lock.
    ClearTarget,
    /// Ignore device input (e.g. while a menu has focus).
    SetInputBlocked { blocked: bool },
}
