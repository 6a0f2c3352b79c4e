//! Level lifecycle and status state machine
//!
//! `Game` owns the simulation state and its collaborators. The host calls
//! [`Game::process_cycle`] whenever the scheduler fires and forwards key events;
//! everything else (pausing, messages, restarts) happens in here.
//!
//! ```text
//! INTRO --space--> CONTINUE --hit--> WIN/FAIL --space--> (restart) CONTINUE
//!                  CONTINUE --esc--> PAUSE --space--> CONTINUE
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::SimError;
use crate::platform::{Clock, KeyCode, KeyEvent, Scheduler, update_key_state};
use crate::renderer::{AssetLoader, Renderer, SpriteSheet, draw_list, message_for};
use crate::sim::{GAME_RULES, GameState, GameStatus, LogicalKey, Rule, tick};
use crate::tuning::Tuning;

pub struct Game<R: Renderer, S: Scheduler, C: Clock, A: AssetLoader> {
    state: GameState,
    tuning: Tuning,
    rules: Vec<Rule>,
    rng: Pcg32,
    renderer: R,
    scheduler: S,
    clock: C,
    assets: A,
    /// Resolved sprites; dropped on restart so the next start reloads them
    sprites: Option<SpriteSheet>,
    /// Ignore every key while set
    deactivated: bool,
    /// Gameplay keys reach the key flags
    listening: bool,
    /// Parked on a status message until SPACE
    awaiting_resume: bool,
}

impl<R: Renderer, S: Scheduler, C: Clock, A: AssetLoader> Game<R, S, C, A> {
    /// Build a game around its collaborators. Nothing is drawn or scheduled
    /// until [`Game::restart_game`] or [`Game::initialize_level_and_start`].
    pub fn new(
        renderer: R,
        scheduler: S,
        clock: C,
        assets: A,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, SimError> {
        tuning.validate()?;
        let mut state = GameState::new_level();
        state.status = GameStatus::Intro;
        Ok(Self {
            state,
            tuning,
            rules: GAME_RULES.to_vec(),
            rng: Pcg32::seed_from_u64(seed),
            renderer,
            scheduler,
            clock,
            assets,
            sprites: None,
            deactivated: false,
            listening: false,
            awaiting_resume: false,
        })
    }

    /// Replace the rule list; order is precedence
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Fresh level on the welcome screen, waiting for SPACE
    pub fn restart_game(&mut self) -> Result<(), SimError> {
        log::info!("Restarting game");
        self.reset_level();
        self.state.status = GameStatus::Intro;
        self.start()
    }

    /// Start the level, rebuilding it first when `restart` is set.
    ///
    /// Without `restart` the entities and the level start time are kept, which
    /// is how a paused level resumes.
    pub fn initialize_level_and_start(&mut self, restart: bool) -> Result<(), SimError> {
        if restart {
            self.reset_level();
        }
        self.start()
    }

    fn reset_level(&mut self) {
        self.state = GameState::new_level();
        self.sprites = None;
        self.awaiting_resume = false;
        self.scheduler.cancel();
    }

    fn start(&mut self) -> Result<(), SimError> {
        let now = self.clock.now_ms();
        self.state.started_at = Some(now);
        self.state.level_started_at.get_or_insert(now);
        self.state.last_updated = None;
        self.awaiting_resume = false;

        if self.sprites.is_none() {
            match SpriteSheet::preload(&mut self.assets) {
                Ok(sheet) => self.sprites = Some(sheet),
                Err(e) => {
                    log::error!("Level start aborted: {e}");
                    return Err(e);
                }
            }
        }

        log::info!("Level started at {now:.0}ms ({:?})", self.state.status);
        self.render();
        self.listening = true;
        self.process_cycle().map(|_| ())
    }

    /// Run one cycle: tick if playing, then either schedule the next one or
    /// park on the status message.
    pub fn process_cycle(&mut self) -> Result<GameStatus, SimError> {
        let now = self.clock.now_ms();
        let dt = match self.state.last_updated {
            Some(last) => ((now - last) / self.tuning.ms_per_unit).max(0.0) as f32,
            None => 0.0,
        };

        if self.state.status != GameStatus::Continue {
            let status = self.state.status;
            self.pause_level(None);
            return Ok(status);
        }

        let status = match tick(
            &mut self.state,
            &self.rules,
            &self.tuning,
            &mut self.rng,
            dt,
        ) {
            Ok(status) => status,
            Err(e) => {
                log::error!("Simulation stopped: {e}");
                self.scheduler.cancel();
                self.listening = false;
                return Err(e);
            }
        };

        self.render();
        if status == GameStatus::Continue {
            self.state.last_updated = Some(now);
            self.scheduler.schedule_next_tick();
        } else {
            self.pause_level(Some(status));
        }
        Ok(status)
    }

    /// Stop ticking and show the message for `status` (or the current one).
    pub fn pause_level(&mut self, status: Option<GameStatus>) {
        if let Some(status) = status {
            self.set_status(status);
        }
        self.state.keys.esc = false;
        self.state.last_updated = None;
        self.listening = false;
        self.awaiting_resume = true;
        self.scheduler.cancel();

        if let Some(message) = message_for(self.state.status) {
            self.renderer.draw_message(message);
        }
    }

    /// Leave a waiting status: WIN/FAIL rebuild the level, the rest pick up
    /// where they stopped.
    pub fn resume(&mut self) -> Result<(), SimError> {
        let restart = self.state.status.restarts_on_resume();
        log::info!(
            "Resuming from {:?}{}",
            self.state.status,
            if restart { " with a new level" } else { "" }
        );
        if restart {
            self.reset_level();
        }
        self.set_status(GameStatus::Continue);
        self.initialize_level_and_start(false)
    }

    pub fn key_down(&mut self, event: KeyEvent) -> Result<(), SimError> {
        if self.deactivated {
            return Ok(());
        }
        if self.awaiting_resume {
            if event.code == KeyCode::Space {
                return self.resume();
            }
            return Ok(());
        }
        if self.listening {
            update_key_state(&mut self.state.keys, event, true);
        }
        Ok(())
    }

    /// Releases always land so no key stays held across a pause
    pub fn key_up(&mut self, event: KeyEvent) {
        if self.deactivated {
            return;
        }
        update_key_state(&mut self.state.keys, event, false);
    }

    /// Set a logical key directly
    pub fn set_key(&mut self, key: LogicalKey, pressed: bool) {
        if !self.deactivated {
            self.state.keys.set(key, pressed);
        }
    }

    pub fn set_deactivated(&mut self, deactivated: bool) {
        if self.deactivated != deactivated {
            log::info!("Input {}", if deactivated { "deactivated" } else { "reactivated" });
            self.deactivated = deactivated;
        }
    }

    pub fn set_status(&mut self, status: GameStatus) {
        if self.state.status != status {
            log::debug!("Status {:?} -> {:?}", self.state.status, status);
            self.state.status = status;
        }
    }

    fn render(&mut self) {
        if let Some(sheet) = &self.sprites {
            let draws = draw_list(&self.state.entities, sheet);
            self.renderer.draw_frame(&draws);
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn is_deactivated(&self) -> bool {
        self.deactivated
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_awaiting_resume(&self) -> bool {
        self.awaiting_resume
    }
}
