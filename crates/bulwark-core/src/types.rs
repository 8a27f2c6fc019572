//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::NORMALIZE_EPSILON_SQ;

/// 2D position or velocity in world units. x = right, y = up (toward the enemy rows).
pub type Float2 = glam::Vec2;

/// Entity identifiers. Assigned monotonically per session, never reused.
pub type EnemyId = u32;
pub type ProjectileId = u32;
pub type DropId = u32;

/// Domain helpers on top of glam's vector math.
pub trait Float2Ext: Sized {
    /// Unit "up" direction used when a direction degenerates to zero.
    const UP: Self;

    /// Unit vector in the same direction, or `fallback` when the length is ~0.
    fn normalized_or(self, fallback: Self) -> Self;

    /// Mirror across the line whose normal is `normal` (need not be unit length).
    fn reflect_across(self, normal: Self) -> Self;
}

impl Float2Ext for Float2 {
    const UP: Self = Float2::new(0.0, 1.0);

    fn normalized_or(self, fallback: Self) -> Self {
        let length_sq = self.length_squared();
        if length_sq <= NORMALIZE_EPSILON_SQ {
            return fallback;
        }
        self / length_sq.sqrt()
    }

    fn reflect_across(self, normal: Self) -> Self {
        let n = normal.normalized_or(Float2::ZERO);
        self - 2.0 * self.dot(n) * n
    }
}

/// Grid cell coordinate. Row -1 is the off-board standby row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: i32,
    pub column: i32,
}

impl GridCell {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks advanced this session.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Frame delta usable by the simulation: negative and non-finite values become 0.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.max(0.0)
    } else {
        0.0
    }
}
