//! Entities and their per-tick behavior
//!
//! Three kinds share one [`Body`]: the player, the enemy and projectiles.
//! Player and enemy can throw projectiles through the [`Thrower`] capability;
//! projectiles cannot.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, Heading};
use super::geometry::Rect;
use super::state::KeyState;
use crate::consts::*;
use crate::tuning::Tuning;

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// Lifecycle flag; disposed entities are swept at the end of the step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Active,
    Disposed,
}

/// State shared by every entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Top-left corner in frame coordinates
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: Direction,
    pub speed: f32,
    /// Cosmetic rotation (degrees)
    pub angle: f32,
    pub lifecycle: Lifecycle,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, size: Vec2, direction: Direction, speed: f32) -> Self {
        Self {
            id,
            pos,
            size,
            direction,
            speed,
            angle: 0.0,
            lifecycle: Lifecycle::Active,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    #[inline]
    pub fn dispose(&mut self) {
        self.lifecycle = Lifecycle::Disposed;
    }

    /// Largest x that keeps the body inside the frame
    #[inline]
    pub fn max_x(&self) -> f32 {
        FRAME_WIDTH - self.size.x
    }

    /// Largest y that keeps the body inside the frame
    #[inline]
    pub fn max_y(&self) -> f32 {
        FRAME_HEIGHT - self.size.y
    }
}

/// What a behavior may touch besides its own entity
pub struct BehaviorContext<'a, R: Rng> {
    pub keys: &'a mut KeyState,
    pub tuning: &'a Tuning,
    pub rng: &'a mut R,
    /// Projectiles thrown during this step; appended after all behaviors ran
    pub thrown: Vec<Projectile>,
}

impl<'a, R: Rng> BehaviorContext<'a, R> {
    pub fn new(keys: &'a mut KeyState, tuning: &'a Tuning, rng: &'a mut R) -> Self {
        Self {
            keys,
            tuning,
            rng,
            thrown: Vec::new(),
        }
    }
}

/// Capability to throw projectiles
pub trait Thrower {
    fn body(&self) -> &Body;

    /// Launch one projectile from the leading edge, facing our direction
    fn throw<R: Rng>(&self, ctx: &mut BehaviorContext<'_, R>) {
        let projectile = Projectile::launch(self.body(), ctx.tuning, &mut *ctx.rng);
        log::debug!(
            "entity {} threw a projectile at ({:.1}, {:.1}) speed {:.2}",
            self.body().id,
            projectile.body.pos.x,
            projectile.body.pos.y,
            projectile.body.speed
        );
        ctx.thrown.push(projectile);
    }
}

/// Player-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
}

impl Player {
    /// Fresh player standing on the frame floor, one third in
    pub fn spawn(id: u32) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        let pos = Vec2::new(FRAME_WIDTH / 3.0, FRAME_HEIGHT - size.y);
        Self {
            body: Body::new(id, pos, size, Direction::RIGHT, PLAYER_SPEED),
        }
    }

    pub fn behave<R: Rng>(&mut self, ctx: &mut BehaviorContext<'_, R>, dt: f32) {
        let body = &mut self.body;
        let (max_x, max_y) = (body.max_x(), body.max_y());

        if ctx.keys.up && body.pos.y > 0.0 {
            body.direction = body.direction.turn(Heading::Up);
            body.pos.y -= body.speed * dt * 2.0;
        }
        if !ctx.keys.up && body.pos.y < max_y + PLAYER_SETTLE_SLACK {
            body.direction = body.direction.turn(Heading::Down);
            body.pos.y += body.speed * dt / 3.0;
        }
        body.pos.y = body.pos.y.clamp(0.0, max_y);

        if ctx.keys.left && body.pos.x > 0.0 {
            body.direction = body.direction.turn(Heading::Left);
            body.pos.x = (body.pos.x - body.speed * dt * 2.0).max(0.0);
        }
        if ctx.keys.right && body.pos.x <= max_x {
            body.direction = body.direction.turn(Heading::Right);
            body.pos.x = (body.pos.x + body.speed * dt * 2.0).min(max_x);
        }

        if ctx.keys.take_shift() {
            self.throw(ctx);
        }
    }
}

impl Thrower for Player {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Autonomous patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
}

impl Enemy {
    /// Fresh enemy on the floor, two thirds in, heading left
    pub fn spawn(id: u32) -> Self {
        let size = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);
        let pos = Vec2::new(FRAME_WIDTH * 2.0 / 3.0, FRAME_HEIGHT - size.y);
        Self {
            body: Body::new(id, pos, size, Direction::LEFT, ENEMY_SPEED),
        }
    }

    pub fn behave<R: Rng>(&mut self, ctx: &mut BehaviorContext<'_, R>, dt: f32) {
        let body = &mut self.body;

        if body.direction == Direction::LEFT {
            body.pos.x -= body.speed * dt;
        } else if body.direction == Direction::RIGHT {
            body.pos.x += body.speed * dt;
        }

        // Latched: only flips at the walls
        if body.pos.x <= 0.0 {
            body.direction = body.direction.turn(Heading::Right);
        }
        if body.pos.x >= body.max_x() {
            body.direction = body.direction.turn(Heading::Left);
        }

        if ctx.rng.random_bool(ctx.tuning.enemy_shot_chance) {
            self.throw(ctx);
        }
    }
}

impl Thrower for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// A thrown comet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Id of the entity that threw it
    pub thrower: u32,
    /// Set once the projectile has left its thrower's hit box
    pub armed: bool,
}

impl Projectile {
    /// Spawn at the thrower's leading edge with a random initial speed
    pub fn launch<R: Rng>(thrower: &Body, tuning: &Tuning, rng: &mut R) -> Self {
        let size = Vec2::new(PROJECTILE_SIZE * 2.0, PROJECTILE_SIZE);
        let facing = if thrower.direction.has(Heading::Right) {
            Heading::Right
        } else {
            Heading::Left
        };

        let x = match facing {
            Heading::Right => thrower.pos.x + thrower.size.x - size.x / 2.0,
            _ => thrower.pos.x - PROJECTILE_SIZE - size.x / 2.0,
        };
        let y = thrower.pos.y + thrower.size.y / 2.0;
        let speed = tuning.projectile_speed(facing).sample(rng);

        let mut body = Body::new(0, Vec2::new(x, y), size, thrower.direction, speed);
        body.angle = PROJECTILE_ANGLE;

        Self {
            body,
            thrower: thrower.id,
            armed: false,
        }
    }

    pub fn behave(&mut self, tuning: &Tuning, dt: f32) {
        let body = &mut self.body;

        if body.direction.has(Heading::Left) {
            body.pos.x -= body.speed * dt;
        }
        if body.direction.has(Heading::Right) {
            body.pos.x += body.speed * dt;
        }
        body.pos.y += tuning.gravity * dt;

        if body.pos.x < 0.0 || body.pos.x > FRAME_WIDTH || body.pos.y > FRAME_HEIGHT {
            body.dispose();
        }
    }

    /// Whether this projectile may hit the entity with `target_id`
    #[inline]
    pub fn can_hit(&self, target_id: u32) -> bool {
        self.armed || self.thrower != target_id
    }
}

/// Any simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Enemy(Enemy),
    Projectile(Projectile),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Enemy(_) => EntityKind::Enemy,
            Entity::Projectile(_) => EntityKind::Projectile,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Enemy(e) => &e.body,
            Entity::Projectile(p) => &p.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Player(p) => &mut p.body,
            Entity::Enemy(e) => &mut e.body,
            Entity::Projectile(p) => &mut p.body,
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.body().id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body().is_active()
    }

    /// Advance this entity by `dt` time units
    pub fn behave<R: Rng>(&mut self, ctx: &mut BehaviorContext<'_, R>, dt: f32) {
        match self {
            Entity::Player(p) => p.behave(ctx, dt),
            Entity::Enemy(e) => e.behave(ctx, dt),
            Entity::Projectile(p) => p.behave(ctx.tuning, dt),
        }
    }
}

impl From<Player> for Entity {
    fn from(p: Player) -> Self {
        Entity::Player(p)
    }
}

impl From<Enemy> for Entity {
    fn from(e: Enemy) -> Self {
        Entity::Enemy(e)
    }
}

impl From<Projectile> for Entity {
    fn from(p: Projectile) -> Self {
        Entity::Projectile(p)
    }
}
