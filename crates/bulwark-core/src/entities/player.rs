use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::definitions::{AbilityDefinition, EffectModifier};
use crate::enums::{GameplayAttribute, ModifierOperation};
use crate::types::Float2;

/// Combat and movement stats that abilities modify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Horizontal speed (units/s).
    pub move_speed: f32,
    pub attack_damage: f32,
    /// Auto-attack reach (world units).
    pub attack_range: f32,
    /// Seconds between shots.
    pub attack_cooldown: f32,
}

impl PlayerStats {
    fn clamped(self) -> Self {
        Self {
            move_speed: self.move_speed.max(0.0),
            attack_damage: self.attack_damage.max(0.0),
            attack_range: self.attack_range.max(0.0),
            attack_cooldown: self.attack_cooldown.max(0.0),
        }
    }
}

/// The player-controlled turret that slides along a horizontal track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntity {
    spawn_position: Float2,
    position: Float2,
    min_x: f32,
    max_x: f32,
    base_stats: PlayerStats,
    stats: PlayerStats,
    attack_cooldown_remaining: f32,
    max_health: f32,
    current_health: f32,
    base_luck: f32,
    luck: f32,
    gold: f32,
    level: u32,
    current_experience: f32,
    experience_to_next_level: f32,
    experience_growth: f32,
    base_experience_to_level: f32,
    base_level: u32,
}

impl PlayerEntity {
    pub fn new(spawn_position: Float2, stats: PlayerStats, max_health: f32, luck: f32) -> Self {
        let stats = stats.clamped();
        let max_health = max_health.max(MIN_MAX_HEALTH);
        let luck = luck.max(0.0);
        Self {
            spawn_position,
            position: spawn_position,
            min_x: f32::NEG_INFINITY,
            max_x: f32::INFINITY,
            base_stats: stats,
            stats,
            attack_cooldown_remaining: 0.0,
            max_health,
            current_health: max_health,
            base_luck: luck,
            luck,
            gold: 0.0,
            level: 1,
            current_experience: 0.0,
            experience_to_next_level: DEFAULT_EXPERIENCE_TO_LEVEL,
            experience_growth: DEFAULT_EXPERIENCE_GROWTH,
            base_experience_to_level: DEFAULT_EXPERIENCE_TO_LEVEL,
            base_level: 1,
        }
    }

    // --- Accessors ---

    pub fn position(&self) -> Float2 {
        self.position
    }

    pub fn spawn_position(&self) -> Float2 {
        self.spawn_position
    }

    pub fn horizontal_bounds(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    pub fn move_speed(&self) -> f32 {
        self.stats.move_speed
    }

    pub fn attack_damage(&self) -> f32 {
        self.stats.attack_damage
    }

    pub fn attack_range(&self) -> f32 {
        self.stats.attack_range
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.stats.attack_cooldown
    }

    pub fn attack_cooldown_remaining(&self) -> f32 {
        self.attack_cooldown_remaining
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn luck(&self) -> f32 {
        self.luck
    }

    pub fn gold(&self) -> f32 {
        self.gold
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_experience(&self) -> f32 {
        self.current_experience
    }

    pub fn experience_to_next_level(&self) -> f32 {
        self.experience_to_next_level
    }

    // --- Movement ---

    /// Clamp future movement to `[min_x, max_x]`. Reversed bounds are swapped.
    pub fn set_horizontal_bounds(&mut self, min_x: f32, max_x: f32) {
        let (min_x, max_x) = if min_x > max_x { (max_x, min_x) } else { (min_x, max_x) };
        self.min_x = min_x;
        self.max_x = max_x;
        self.position.x = self.position.x.clamp(min_x, max_x);
    }

    /// Move by `direction * move_speed * dt` along x, clamped to bounds.
    pub fn move_horizontal(&mut self, direction: f32, dt: f32) {
        let x = self.position.x + direction * self.stats.move_speed * dt;
        self.position.x = x.clamp(self.min_x, self.max_x);
    }

    // --- Combat ---

    pub fn update_cooldown(&mut self, dt: f32) {
        if self.attack_cooldown_remaining > 0.0 {
            self.attack_cooldown_remaining = (self.attack_cooldown_remaining - dt).max(0.0);
        }
    }

    pub fn can_attack(&self) -> bool {
        self.attack_cooldown_remaining <= 0.0
    }

    pub fn start_attack(&mut self) {
        self.attack_cooldown_remaining = self.stats.attack_cooldown;
    }

    /// Start the cooldown if ready. Returns whether an attack may happen.
    pub fn try_attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.start_attack();
        true
    }

    /// Returns the damage actually dealt.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || self.current_health <= 0.0 {
            return 0.0;
        }
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        dealt
    }

    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let healed = amount.min(self.max_health - self.current_health);
        self.current_health += healed;
        healed
    }

    // --- Progression ---

    pub fn add_gold(&mut self, amount: f32) {
        if amount > 0.0 {
            self.gold += amount;
        }
    }

    pub fn set_luck(&mut self, luck: f32) {
        self.luck = luck.max(0.0);
    }

    /// Set the level curve. Threshold and growth are floored at 1, level at 1.
    /// Experience already accumulated is kept.
    pub fn configure_experience_progression(&mut self, base_threshold: f32, growth: f32, level: u32) {
        self.base_experience_to_level = base_threshold.max(1.0);
        self.experience_growth = growth.max(1.0);
        self.base_level = level.max(1);
        self.level = self.base_level;
        self.experience_to_next_level = self.base_experience_to_level;
    }

    /// Add experience, resolving as many level-ups as it covers.
    /// Returns the number of levels gained.
    pub fn add_experience(&mut self, amount: f32) -> u32 {
        if amount <= 0.0 {
            return 0;
        }
        self.current_experience += amount;
        let mut gained = 0;
        while self.current_experience >= self.experience_to_next_level {
            self.current_experience -= self.experience_to_next_level;
            self.level += 1;
            gained += 1;
            self.experience_to_next_level *= self.experience_growth;
        }
        gained
    }

    // --- Abilities ---

    pub fn apply_ability(&mut self, ability: &AbilityDefinition) {
        for effect in &ability.effects {
            for modifier in &effect.modifiers {
                self.apply_modifier(modifier);
            }
        }
    }

    pub fn apply_modifier(&mut self, modifier: &EffectModifier) {
        let current = match modifier.attribute {
            GameplayAttribute::AttackDamage => self.stats.attack_damage,
            GameplayAttribute::AttackCooldown => self.stats.attack_cooldown,
            GameplayAttribute::MoveSpeed => self.stats.move_speed,
            GameplayAttribute::AttackRange => self.stats.attack_range,
        };
        let value = match modifier.operation {
            ModifierOperation::Add => current + modifier.value,
            ModifierOperation::Multiply => current * modifier.value.max(MIN_MODIFIER_MULTIPLIER),
        };
        match modifier.attribute {
            GameplayAttribute::AttackDamage => self.stats.attack_damage = value.max(0.0),
            GameplayAttribute::AttackCooldown => {
                self.stats.attack_cooldown = value.max(MIN_ATTACK_COOLDOWN)
            }
            GameplayAttribute::MoveSpeed => self.stats.move_speed = value.max(0.0),
            GameplayAttribute::AttackRange => self.stats.attack_range = value.max(0.0),
        }
    }

    /// Restore spawn position, full health, base stats and the level curve start.
    pub fn reset(&mut self) {
        self.position = self.spawn_position;
        self.position.x = self.position.x.clamp(self.min_x, self.max_x);
        self.stats = self.base_stats;
        self.attack_cooldown_remaining = 0.0;
        self.current_health = self.max_health;
        self.luck = self.base_luck;
        self.gold = 0.0;
        self.level = self.base_level;
        self.current_experience = 0.0;
        self.experience_to_next_level = self.base_experience_to_level;
    }
}
