//! Game state and core simulation types
//!
//! One `GameState` per level run. It is created on level start, mutated by
//! behaviors and rules once per tick, and replaced on restart.

use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Entity, EntityKind, Player};

/// Result of a tick / current phase of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Keep ticking
    #[default]
    Continue,
    /// Enemy destroyed
    Win,
    /// Player destroyed
    Fail,
    /// Paused by the player
    Pause,
    /// Welcome screen before the first start
    Intro,
}

impl GameStatus {
    /// Everything but `Continue` parks the loop until a resume key arrives
    #[inline]
    pub fn is_waiting(self) -> bool {
        self != GameStatus::Continue
    }

    /// Resuming from these statuses rebuilds the level
    #[inline]
    pub fn restarts_on_resume(self) -> bool {
        matches!(self, GameStatus::Win | GameStatus::Fail)
    }
}

/// Keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalKey {
    Left,
    Right,
    Up,
    Down,
    Esc,
    Space,
    Shift,
}

/// Pressed state per logical key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub esc: bool,
    pub space: bool,
    /// Fire request; consumed by the player on the next tick
    pub shift: bool,
}

impl KeyState {
    pub fn set(&mut self, key: LogicalKey, pressed: bool) {
        *self.flag_mut(key) = pressed;
    }

    pub fn is_pressed(&self, key: LogicalKey) -> bool {
        match key {
            LogicalKey::Left => self.left,
            LogicalKey::Right => self.right,
            LogicalKey::Up => self.up,
            LogicalKey::Down => self.down,
            LogicalKey::Esc => self.esc,
            LogicalKey::Space => self.space,
            LogicalKey::Shift => self.shift,
        }
    }

    /// Read and clear the fire request in one step
    #[inline]
    pub fn take_shift(&mut self) -> bool {
        std::mem::take(&mut self.shift)
    }

    fn flag_mut(&mut self, key: LogicalKey) -> &mut bool {
        match key {
            LogicalKey::Left => &mut self.left,
            LogicalKey::Right => &mut self.right,
            LogicalKey::Up => &mut self.up,
            LogicalKey::Down => &mut self.down,
            LogicalKey::Esc => &mut self.esc,
            LogicalKey::Space => &mut self.space,
            LogicalKey::Shift => &mut self.shift,
        }
    }
}

/// Complete state of one level run (serializable for snapshots)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Current status
    pub status: GameStatus,
    /// Input snapshot
    pub keys: KeyState,
    /// Clock time of the last completed tick (ms); `None` right after a (re)start
    pub last_updated: Option<f64>,
    /// Clock time of the most recent start or resume (ms)
    pub started_at: Option<f64>,
    /// Clock time the level was first started (ms); survives pause/resume
    pub level_started_at: Option<f64>,
    /// Active entities in insertion order
    pub entities: Vec<Entity>,
    /// Entities removed during the last tick
    pub disposed: Vec<Entity>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Empty state, no entities yet
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// State for a fresh level: player first, then the enemy
    pub fn new_level() -> Self {
        let mut state = Self::new();
        let player = Player::spawn(state.next_entity_id());
        let enemy = Enemy::spawn(state.next_entity_id());
        state.entities.push(player.into());
        state.entities.push(enemy.into());
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Append an entity, assigning it a fresh ID
    pub fn spawn(&mut self, entity: impl Into<Entity>) -> u32 {
        let mut entity = entity.into();
        let id = self.next_entity_id();
        entity.body_mut().id = id;
        self.entities.push(entity);
        id
    }

    /// Move disposed entities out of the active list, keeping order
    pub fn sweep_disposed(&mut self) {
        let (active, disposed): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entities)
                .into_iter()
                .partition(Entity::is_active);
        self.entities = active;
        self.disposed.extend(disposed);
    }

    /// First entity of a kind, if any
    pub fn find(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind() == kind)
    }

    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.entities.iter().find_map(|e| match e {
            Entity::Enemy(en) => Some(en),
            _ => None,
        })
    }

    /// Number of live projectiles
    pub fn projectile_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Projectile)
            .count()
    }
}
