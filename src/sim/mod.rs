//! Simulation module
//!
//! All gameplay logic lives here:
//! - Entities behave in insertion order (player, enemy, projectiles by throw)
//! - Randomness only through the RNG handed in by the caller
//! - Rules run in a fixed order after the behaviors
//! - No rendering or platform dependencies

pub mod direction;
pub mod entity;
pub mod geometry;
pub mod rules;
pub mod state;
pub mod tick;

pub use direction::{Direction, Heading};
pub use entity::{
    BehaviorContext, Body, Enemy, Entity, EntityKind, Lifecycle, Player, Projectile, Thrower,
};
pub use geometry::{HitMargin, Rect, intersects};
pub use rules::{GAME_RULES, Rule, check_status, enemy_death, pause, player_death};
pub use state::{GameState, GameStatus, KeyState, LogicalKey};
pub use tick::{process_entities, tick};
