//! Input seam between the session and whatever captures device input.

use crate::types::Float2;

/// Polled once per session tick. `blocked` is true while input should be ignored;
/// implementations are expected to report neutral values then.
pub trait InputReader {
    /// Horizontal intent in `[-1, 1]`.
    fn read_movement(&mut self, blocked: bool) -> f32;

    /// World point the player pressed this tick, if any.
    fn read_target_point(&mut self, blocked: bool) -> Option<Float2>;
}

/// Reader that never reports input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputReader for NoInput {
    fn read_movement(&mut self, _blocked: bool) -> f32 {
        0.0
    }

    fn read_target_point(&mut self, _blocked: bool) -> Option<Float2> {
        None
    }
}
