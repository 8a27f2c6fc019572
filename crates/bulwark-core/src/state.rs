//! The authoritative game-state aggregate.
//!
//! `GameState` owns every live entity in insertion order and hands out
//! monotonic ids. All structural mutation goes through its methods so the
//! collections stay consistent; systems may mutate entities in place
//! through the `_mut` slice accessors.

use serde::{Deserialize, Serialize};

use crate::entities::*;
use crate::enums::ResourceDropType;
use crate::types::{EnemyId, Float2, GridCell, SimTime};

/// What the player's auto-attack is locked onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum TargetLock {
    #[default]
    None,
    /// Prefer the enemy occupying this cell.
    Cell { row: i32, column: i32 },
    /// Fire at a fixed bombardment point.
    Point(Float2),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    player: PlayerEntity,
    fortress: FortressEntity,
    enemies: Vec<EnemyEntity>,
    player_projectiles: Vec<ProjectileEntity>,
    enemy_projectiles: Vec<ProjectileEntity>,
    resource_drops: Vec<ResourceDropEntity>,
    // Last id issued per kind; 0 means none yet.
    enemy_id_counter: u32,
    projectile_id_counter: u32,
    drop_id_counter: u32,
    time: SimTime,
    target: TargetLock,
}

impl GameState {
    pub fn new(player: PlayerEntity, fortress: FortressEntity) -> Self {
        Self {
            player,
            fortress,
            enemies: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            resource_drops: Vec::new(),
            enemy_id_counter: 0,
            projectile_id_counter: 0,
            drop_id_counter: 0,
            time: SimTime::default(),
            target: TargetLock::None,
        }
    }

    // --- Read access ---

    pub fn player(&self) -> &PlayerEntity {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerEntity {
        &mut self.player
    }

    pub fn fortress(&self) -> &FortressEntity {
        &self.fortress
    }

    pub fn fortress_mut(&mut self) -> &mut FortressEntity {
        &mut self.fortress
    }

    pub fn enemies(&self) -> &[EnemyEntity] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [EnemyEntity] {
        &mut self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&EnemyEntity> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn player_projectiles(&self) -> &[ProjectileEntity] {
        &self.player_projectiles
    }

    pub fn player_projectiles_mut(&mut self) -> &mut [ProjectileEntity] {
        &mut self.player_projectiles
    }

    pub fn enemy_projectiles(&self) -> &[ProjectileEntity] {
        &self.enemy_projectiles
    }

    pub fn enemy_projectiles_mut(&mut self) -> &mut [ProjectileEntity] {
        &mut self.enemy_projectiles
    }

    pub fn resource_drops(&self) -> &[ResourceDropEntity] {
        &self.resource_drops
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn elapsed(&self) -> f32 {
        self.time.elapsed_secs
    }

    /// Last issued (enemy, projectile, drop) ids.
    pub fn id_counters(&self) -> (u32, u32, u32) {
        (self.enemy_id_counter, self.projectile_id_counter, self.drop_id_counter)
    }

    pub fn is_game_over(&self) -> bool {
        self.fortress.is_destroyed()
    }

    pub fn advance_time(&mut self, dt: f32) {
        self.time.advance(dt);
    }

    // --- Enemies ---

    /// Reserve the next enemy id.
    pub fn next_enemy_id(&mut self) -> EnemyId {
        self.enemy_id_counter += 1;
        self.enemy_id_counter
    }

    /// Add an enemy. An enemy whose id is already present is ignored.
    /// Returns whether the enemy was added.
    pub fn add_enemy(&mut self, enemy: EnemyEntity) -> bool {
        if self.enemies.iter().any(|e| e.id() == enemy.id()) {
            return false;
        }
        self.enemies.push(enemy);
        true
    }

    /// Drop every enemy with no health left, keeping the order of the rest.
    pub fn remove_dead_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.is_alive());
        before - self.enemies.len()
    }

    // --- Projectiles ---

    pub fn add_player_projectile(
        &mut self,
        position: Float2,
        velocity: Float2,
        damage: f32,
        explosion_radius: f32,
        target: Float2,
    ) -> &ProjectileEntity {
        self.projectile_id_counter += 1;
        let id = self.projectile_id_counter;
        self.player_projectiles.push(ProjectileEntity::new(
            id,
            ProjectileSource::Player,
            position,
            velocity,
            target,
            damage,
            explosion_radius,
        ));
        &self.player_projectiles[self.player_projectiles.len() - 1]
    }

    pub fn add_enemy_projectile(
        &mut self,
        source: EnemyId,
        position: Float2,
        velocity: Float2,
        damage: f32,
        target: Float2,
    ) -> &ProjectileEntity {
        self.projectile_id_counter += 1;
        let id = self.projectile_id_counter;
        self.enemy_projectiles.push(ProjectileEntity::new(
            id,
            ProjectileSource::Enemy(source),
            position,
            velocity,
            target,
            damage,
            0.0,
        ));
        &self.enemy_projectiles[self.enemy_projectiles.len() - 1]
    }

    pub fn remove_player_projectile_at(&mut self, index: usize) -> Option<ProjectileEntity> {
        (index < self.player_projectiles.len()).then(|| self.player_projectiles.remove(index))
    }

    pub fn remove_enemy_projectile_at(&mut self, index: usize) -> Option<ProjectileEntity> {
        (index < self.enemy_projectiles.len()).then(|| self.enemy_projectiles.remove(index))
    }

    // --- Resource drops ---

    pub fn queue_resource_drop(
        &mut self,
        drop_type: ResourceDropType,
        position: Float2,
        amount: f32,
        delay: f32,
    ) -> &ResourceDropEntity {
        self.drop_id_counter += 1;
        let id = self.drop_id_counter;
        self.resource_drops
            .push(ResourceDropEntity::new(id, drop_type, position, amount, delay));
        &self.resource_drops[self.resource_drops.len() - 1]
    }

    /// Tick every pending drop by `dt` and move the ready ones into `out`
    /// (cleared first), preserving spawn order. Returns how many were moved.
    pub fn collect_ready_resource_drops(&mut self, dt: f32, out: &mut Vec<ResourceDropEntity>) -> usize {
        out.clear();
        let mut index = 0;
        while index < self.resource_drops.len() {
            if self.resource_drops[index].tick(dt) {
                out.push(self.resource_drops.remove(index));
            } else {
                index += 1;
            }
        }
        out.len()
    }

    // --- Targeting ---

    pub fn target(&self) -> TargetLock {
        self.target
    }

    pub fn set_target_cell(&mut self, row: i32, column: i32) {
        self.target = TargetLock::Cell { row, column };
    }

    /// Release a cell lock. Leaves a point lock untouched.
    pub fn clear_target_cell(&mut self) {
        if matches!(self.target, TargetLock::Cell { .. }) {
            self.target = TargetLock::None;
        }
    }

    pub fn target_cell(&self) -> Option<GridCell> {
        match self.target {
            TargetLock::Cell { row, column } => Some(GridCell::new(row, column)),
            _ => None,
        }
    }

    pub fn set_fixed_bombardment(&mut self, point: Float2) {
        self.target = TargetLock::Point(point);
    }

    /// Release a point lock. Leaves a cell lock untouched.
    pub fn clear_fixed_bombardment(&mut self) {
        if matches!(self.target, TargetLock::Point(_)) {
            self.target = TargetLock::None;
        }
    }

    pub fn fixed_bombardment(&self) -> Option<Float2> {
        match self.target {
            TargetLock::Point(point) => Some(point),
            _ => None,
        }
    }

    pub fn clear_target(&mut self) {
        self.target = TargetLock::None;
    }

    /// Back to a fresh session: entities cleared, player and fortress
    /// restored, id counters back to zero, time zeroed.
    pub fn reset(&mut self) {
        self.player.reset();
        self.fortress.reset();
        self.enemies.clear();
        self.player_projectiles.clear();
        self.enemy_projectiles.clear();
        self.resource_drops.clear();
        self.enemy_id_counter = 0;
        self.projectile_id_counter = 0;
        self.drop_id_counter = 0;
        self.time = SimTime::default();
        self.target = TargetLock::None;
    }
}
