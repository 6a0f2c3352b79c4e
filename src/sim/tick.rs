//! Simulation step
//!
//! One tick: every entity behaves in insertion order, thrown projectiles are
//! appended, disposed entities are swept, projectiles that cleared their
//! thrower are armed, then the rules pick the next status.

use rand::Rng;

use super::entity::{BehaviorContext, Entity};
use super::geometry::{Rect, intersects};
use super::rules::{Rule, check_status};
use super::state::{GameState, GameStatus};
use crate::error::SimError;
use crate::tuning::Tuning;

/// Advance the level by `dt` time units and return the new status
pub fn tick<R: Rng>(
    state: &mut GameState,
    rules: &[Rule],
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
) -> Result<GameStatus, SimError> {
    state.disposed.clear();

    process_entities(state, tuning, rng, dt);
    arm_projectiles(state, tuning);
    let status = check_status(state, rules, tuning)?;

    // Rules dispose what they hit; drop those too so the list stays active-only
    state.sweep_disposed();

    if status != GameStatus::Continue {
        log::info!("Status changed to {:?}", status);
    }
    Ok(status)
}

/// Run every behavior, append thrown projectiles, sweep disposed entities
pub fn process_entities<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R, dt: f32) {
    let thrown = {
        let GameState { entities, keys, .. } = &mut *state;
        let mut ctx = BehaviorContext::new(keys, tuning, rng);
        for entity in entities.iter_mut() {
            entity.behave(&mut ctx, dt);
        }
        ctx.thrown
    };

    for projectile in thrown {
        state.spawn(projectile);
    }

    state.sweep_disposed();
    for gone in &state.disposed {
        log::debug!("Disposed {:?} {}", gone.kind(), gone.id());
    }
}

/// A projectile becomes able to hit its thrower once it has left its box
fn arm_projectiles(state: &mut GameState, tuning: &Tuning) {
    let throwers: Vec<(u32, Rect)> = state
        .entities
        .iter()
        .filter(|e| !matches!(e, Entity::Projectile(_)))
        .map(|e| (e.id(), e.body().rect()))
        .collect();

    for entity in &mut state.entities {
        let Entity::Projectile(p) = entity else {
            continue;
        };
        if p.armed {
            continue;
        }
        let rect = p.body.rect();
        let still_inside = throwers
            .iter()
            .any(|(id, r)| *id == p.thrower && intersects(&rect, r, tuning.hit_margin));
        if !still_inside {
            p.armed = true;
        }
    }
}
