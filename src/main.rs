//! Comet Duel headless runner
//!
//! Plays one autopilot match on the text renderer and prints a frame every
//! few ticks. Usage: `comet-duel [tuning.json] [seed]`

use anyhow::{Context, Result};

use comet_duel::platform::{FrameQueue, KeyCode, KeyEvent, ManualClock};
use comet_duel::renderer::{AsciiRenderer, InMemoryAssets};
use comet_duel::sim::{GameStatus, Heading};
use comet_duel::{Game, Tuning};

type HeadlessGame = Game<AsciiRenderer, FrameQueue, ManualClock, InMemoryAssets>;

/// ~60 Hz
const FRAME_MS: f64 = 16.0;
const MAX_FRAMES: u64 = 20_000;
const PRINT_EVERY: u64 = 120;
const THROW_EVERY: u64 = 45;

fn load_tuning(path: Option<&str>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tuning file {path}"))?;
    Tuning::from_json(&json).with_context(|| format!("Invalid tuning in {path}"))
}

/// Face the enemy and throw at a steady rhythm
fn autopilot(game: &mut HeadlessGame, frame: u64) -> Result<()> {
    let state = game.state();
    let (Some(player), Some(enemy)) = (state.player(), state.enemy()) else {
        return Ok(());
    };
    let player_mid = player.body.pos.x + player.body.size.x / 2.0;
    let enemy_mid = enemy.body.pos.x + enemy.body.size.x / 2.0;
    let (toward, away) = if enemy_mid >= player_mid {
        (KeyCode::ArrowRight, KeyCode::ArrowLeft)
    } else {
        (KeyCode::ArrowLeft, KeyCode::ArrowRight)
    };
    let facing_enemy = if toward == KeyCode::ArrowRight {
        player.body.direction.has(Heading::Right)
    } else {
        player.body.direction.has(Heading::Left)
    };

    game.key_up(KeyEvent::new(away));
    if facing_enemy {
        game.key_up(KeyEvent::new(toward));
    } else {
        game.key_down(KeyEvent::new(toward))?;
    }

    if frame % THROW_EVERY == 0 {
        game.key_down(KeyEvent::with_shift(KeyCode::Other(16)))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = load_tuning(args.first().map(String::as_str))?;
    let seed = match args.get(1) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Seed must be an unsigned integer, got {raw}"))?,
        None => 0x00C0_FFEE,
    };
    log::info!("Comet Duel starting with seed {seed}");

    let clock = ManualClock::new(0.0);
    let queue = FrameQueue::new();
    let mut game = Game::new(
        AsciiRenderer::new(),
        queue.clone(),
        clock.clone(),
        InMemoryAssets::default(),
        tuning,
        seed,
    )?;

    game.restart_game()?;
    println!("{}", game.renderer().frame());
    game.key_down(KeyEvent::new(KeyCode::Space))?;

    let mut frame = 0;
    while frame < MAX_FRAMES && queue.take() {
        clock.advance(FRAME_MS);
        autopilot(&mut game, frame)?;
        game.process_cycle()?;
        if frame % PRINT_EVERY == 0 {
            println!("{}", game.renderer().frame());
        }
        frame += 1;
    }

    println!("{}", game.renderer().frame());
    match game.status() {
        GameStatus::Continue => log::warn!("No winner after {frame} frames"),
        status => log::info!("Match over after {frame} frames: {status:?}"),
    }
    Ok(())
}
