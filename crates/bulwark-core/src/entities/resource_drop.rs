use serde::{Deserialize, Serialize};

use crate::enums::ResourceDropType;
use crate::types::{DropId, Float2};

/// A resource waiting out its pickup delay before it is collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDropEntity {
    id: DropId,
    drop_type: ResourceDropType,
    position: Float2,
    amount: f32,
    remaining_delay: f32,
}

impl ResourceDropEntity {
    pub fn new(id: DropId, drop_type: ResourceDropType, position: Float2, amount: f32, delay: f32) -> Self {
        Self {
            id,
            drop_type,
            position,
            amount: amount.max(0.0),
            remaining_delay: delay.max(0.0),
        }
    }

    pub fn id(&self) -> DropId {
        self.id
    }

    pub fn drop_type(&self) -> ResourceDropType {
        self.drop_type
    }

    pub fn position(&self) -> Float2 {
        self.position
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn remaining_delay(&self) -> f32 {
        self.remaining_delay
    }

    /// Count down the pickup delay. Returns true once the drop is collectable.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining_delay -= dt;
        self.remaining_delay <= 0.0
    }
}
