//! Scripted input for headless runs.

use bulwark_core::input::InputReader;
use bulwark_core::types::Float2;

/// Sweeps the turret across its track: right for `period` frames, then left.
#[derive(Debug, Clone)]
pub struct SweepInput {
    frame: u32,
    period: u32,
}

impl SweepInput {
    pub fn new(period: u32) -> Self {
        Self {
            frame: 0,
            period: period.max(1),
        }
    }
}

impl Default for SweepInput {
    fn default() -> Self {
        Self::new(90)
    }
}

impl InputReader for SweepInput {
    fn read_movement(&mut self, blocked: bool) -> f32 {
        let frame = self.frame;
        self.frame += 1;
        if blocked {
            return 0.0;
        }
        if (frame / self.period) % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    fn read_target_point(&mut self, _blocked: bool) -> Option<Float2> {
        None
    }
}
