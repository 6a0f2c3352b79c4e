//! Comet Duel - a tiny arcade duel inside a fixed frame
//!
//! Core modules:
//! - `sim`: Simulation (directions, geometry, entities, rules, tick)
//! - `game`: Level lifecycle and the CONTINUE/WIN/FAIL/PAUSE/INTRO state machine
//! - `renderer`: Renderer and asset-loader seams, sprite catalog, text renderer
//! - `platform`: Clock, frame scheduler and key mapping
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use game::Game;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame dimensions (logical units)
    pub const FRAME_WIDTH: f32 = 500.0;
    pub const FRAME_HEIGHT: f32 = 250.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const PLAYER_WIDTH: f32 = 150.0;
    pub const PLAYER_HEIGHT: f32 = PLAYER_WIDTH;
    /// How far below the floor the player may start settling (gravity overshoot)
    pub const PLAYER_SETTLE_SLACK: f32 = 15.0;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const ENEMY_WIDTH: f32 = 100.0;
    pub const ENEMY_HEIGHT: f32 = 82.0;

    /// Projectile base size: the box is `2 * size` wide and `size` tall
    pub const PROJECTILE_SIZE: f32 = 30.0;
    /// Cosmetic downward tilt of a fresh projectile (degrees)
    pub const PROJECTILE_ANGLE: f32 = -20.0;
}
