//! Fixed-point stat scaling (denominator 10,000).
//!
//! Designer-facing balance numbers are authored as integers in ten-thousandths
//! so they round-trip exactly through configuration files.

use serde::{Deserialize, Serialize};

/// Raw units per 1.0.
pub const DENOMINATOR: i32 = 10_000;

/// Convert a raw fixed-point integer to its float value.
pub fn to_float(raw: i32) -> f32 {
    let denominator = DENOMINATOR as f32;
    let value = raw as f32 / denominator;
    (value * denominator).floor() / denominator
}

/// Convert a float to raw fixed-point units. Negative values clamp to zero.
pub fn from_float(value: f32) -> i32 {
    ((value * DENOMINATOR as f32).round() as i32).max(0)
}

/// An integer-backed stat value, serialized as its raw integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedPoint(i32);

impl FixedPoint {
    pub const ZERO: FixedPoint = FixedPoint(0);
    pub const ONE: FixedPoint = FixedPoint(DENOMINATOR);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub fn from_float(value: f32) -> Self {
        Self(from_float(value))
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn to_float(self) -> f32 {
        to_float(self.0)
    }
}
