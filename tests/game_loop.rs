//! End-to-end runs of the game loop through hand-driven collaborators

use comet_duel::error::SimError;
use comet_duel::platform::{FrameQueue, KeyCode, KeyEvent, ManualClock};
use comet_duel::renderer::sprites::SpriteSource;
use comet_duel::renderer::{AssetLoader, ImageHandle, InMemoryAssets, Renderer, SpriteDraw};
use comet_duel::sim::{Direction, Entity, EntityKind, GameStatus, Projectile};
use comet_duel::{Game, Tuning};

#[derive(Debug, Default)]
struct Recorder {
    frames: Vec<Vec<SpriteDraw>>,
    messages: Vec<String>,
}

impl Renderer for Recorder {
    fn draw_frame(&mut self, sprites: &[SpriteDraw]) {
        self.frames.push(sprites.to_vec());
    }

    fn draw_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Fails on the n-th sprite
struct FlakyAssets {
    remaining: usize,
}

impl AssetLoader for FlakyAssets {
    fn load(&mut self, source: &SpriteSource) -> Result<ImageHandle, SimError> {
        if self.remaining == 0 {
            return Err(SimError::Asset(format!("{} unreachable", source.url)));
        }
        self.remaining -= 1;
        Ok(ImageHandle(self.remaining as u64))
    }
}

const FRAME_MS: f64 = 16.0;

fn quiet() -> Tuning {
    Tuning {
        enemy_shot_chance: 0.0,
        ..Tuning::default()
    }
}

type TestGame = Game<Recorder, FrameQueue, ManualClock, InMemoryAssets>;

fn new_game(tuning: Tuning) -> (TestGame, ManualClock, FrameQueue) {
    let clock = ManualClock::new(0.0);
    let queue = FrameQueue::new();
    let game = Game::new(
        Recorder::default(),
        queue.clone(),
        clock.clone(),
        InMemoryAssets::default(),
        tuning,
        42,
    )
    .unwrap();
    (game, clock, queue)
}

/// Pump scheduled cycles until the loop parks or `max` frames pass
fn run<A: AssetLoader>(
    game: &mut Game<Recorder, FrameQueue, ManualClock, A>,
    clock: &ManualClock,
    queue: &FrameQueue,
    max: usize,
) -> GameStatus {
    for _ in 0..max {
        if !queue.take() {
            break;
        }
        clock.advance(FRAME_MS);
        game.process_cycle().unwrap();
    }
    game.status()
}

fn space() -> KeyEvent {
    KeyEvent::new(KeyCode::Space)
}

#[test]
fn intro_then_play() {
    let (mut game, clock, queue) = new_game(quiet());
    game.restart_game().unwrap();
    assert_eq!(
        game.renderer().messages.last().map(String::as_str),
        Some("Welcome!\nPress Space to start the game")
    );

    game.key_down(space()).unwrap();
    assert_eq!(run(&mut game, &clock, &queue, 30), GameStatus::Continue);
    assert!(queue.is_pending());

    let last = game.renderer().frames.last().unwrap();
    assert_eq!(last.len(), 2);
    assert_eq!(last[0].key.kind, EntityKind::Player);
}

#[test]
fn pause_resume_keeps_the_level() {
    let (mut game, clock, queue) = new_game(quiet());
    game.restart_game().unwrap();
    game.key_down(space()).unwrap();
    run(&mut game, &clock, &queue, 10);
    let level_started = game.state().level_started_at;

    game.key_down(KeyEvent::new(KeyCode::Escape)).unwrap();
    assert_eq!(run(&mut game, &clock, &queue, 5), GameStatus::Pause);
    let parked = game.state().entities.clone();

    // Time passing while paused must not move anything
    clock.advance(10_000.0);
    assert!(!queue.take());
    game.key_down(space()).unwrap();

    assert_eq!(game.status(), GameStatus::Continue);
    assert_eq!(game.state().entities.len(), parked.len());
    assert_eq!(game.state().entities[1].body().pos, parked[1].body().pos);
    assert_eq!(game.state().level_started_at, level_started);
}

#[test]
fn win_then_restart() {
    let tuning = Tuning {
        gravity: 0.01,
        ..quiet()
    };
    let (mut game, clock, queue) = new_game(tuning);
    game.restart_game().unwrap();
    game.key_down(space()).unwrap();
    let first_level = game.state().level_started_at;

    // Player out of the way, a comet parked in the enemy's path
    game.state_mut().entities[0].body_mut().pos.x = 0.0;
    let enemy = game.state().enemy().unwrap().body.clone();
    let mut comet = Projectile::launch(&enemy, game.tuning(), &mut rand::rng());
    comet.body.pos.x = enemy.pos.x - 80.0;
    comet.body.pos.y = enemy.pos.y + 20.0;
    comet.body.direction = Direction::NONE;
    comet.thrower = 999;
    game.state_mut().spawn(comet);

    assert_eq!(run(&mut game, &clock, &queue, 500), GameStatus::Win);
    assert_eq!(
        game.renderer().messages.last().map(String::as_str),
        Some("You win!\nYeah!")
    );
    assert!(game.state().enemy().is_none());

    clock.advance(1000.0);
    game.key_down(space()).unwrap();
    assert_eq!(game.status(), GameStatus::Continue);
    assert!(game.state().enemy().is_some());
    assert_eq!(game.state().projectile_count(), 0);
    assert_ne!(game.state().level_started_at, first_level);
    // Sprites reload once per restart
    assert_eq!(game.assets().loaded.len(), 10);
}

#[test]
fn shot_player_loses() {
    let (mut game, clock, queue) = new_game(quiet());
    game.restart_game().unwrap();
    game.key_down(space()).unwrap();

    let player = game.state().player().unwrap().body.clone();
    let mut comet = Projectile::launch(&player, game.tuning(), &mut rand::rng());
    comet.body.pos = player.pos + glam::Vec2::new(40.0, 40.0);
    comet.body.direction = Direction::NONE;
    comet.thrower = 2;
    game.state_mut().spawn(comet);

    assert_eq!(run(&mut game, &clock, &queue, 5), GameStatus::Fail);
    assert_eq!(game.renderer().messages.last().map(String::as_str), Some("You lose!"));
    assert!(
        game.state()
            .disposed
            .iter()
            .any(|e| matches!(e, Entity::Player(_)))
    );
}

#[test]
fn asset_failure_aborts_start() {
    let clock = ManualClock::new(0.0);
    let queue = FrameQueue::new();
    let mut game = Game::new(
        Recorder::default(),
        queue.clone(),
        clock,
        FlakyAssets { remaining: 3 },
        Tuning::default(),
        1,
    )
    .unwrap();

    let err = game.restart_game().unwrap_err();
    assert!(matches!(err, SimError::Asset(_)));
    assert!(game.renderer().frames.is_empty());
    assert!(!queue.is_pending());
}
