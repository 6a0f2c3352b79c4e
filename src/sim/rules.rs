//! Game rules
//!
//! Each rule inspects the state and returns a status. Rules run in order and
//! the first non-`Continue` answer wins, so earlier rules take precedence.

use super::entity::{Entity, EntityKind};
use super::geometry::intersects;
use super::state::{GameState, GameStatus};
use crate::error::SimError;
use crate::tuning::Tuning;

/// A single rule
pub type Rule = fn(&mut GameState, &Tuning) -> Result<GameStatus, SimError>;

/// Default rule set, in precedence order
pub const GAME_RULES: [Rule; 3] = [player_death, enemy_death, pause];

/// Player hit by any projectile: game over
pub fn player_death(state: &mut GameState, tuning: &Tuning) -> Result<GameStatus, SimError> {
    if knock_out(state, tuning, EntityKind::Player)? {
        Ok(GameStatus::Fail)
    } else {
        Ok(GameStatus::Continue)
    }
}

/// Enemy hit by any projectile: victory
pub fn enemy_death(state: &mut GameState, tuning: &Tuning) -> Result<GameStatus, SimError> {
    if knock_out(state, tuning, EntityKind::Enemy)? {
        Ok(GameStatus::Win)
    } else {
        Ok(GameStatus::Continue)
    }
}

/// ESC pressed: pause
pub fn pause(state: &mut GameState, _tuning: &Tuning) -> Result<GameStatus, SimError> {
    Ok(if state.keys.esc {
        GameStatus::Pause
    } else {
        GameStatus::Continue
    })
}

/// Run `rules` in order while the state is `Continue` and store the verdict.
pub fn check_status(
    state: &mut GameState,
    rules: &[Rule],
    tuning: &Tuning,
) -> Result<GameStatus, SimError> {
    if state.status != GameStatus::Continue {
        return Ok(state.status);
    }

    let mut verdict = GameStatus::Continue;
    for rule in rules {
        verdict = rule(state, tuning)?;
        if verdict != GameStatus::Continue {
            break;
        }
    }
    state.status = verdict;
    Ok(verdict)
}

/// Dispose the target of `kind` and the first projectile hitting it.
///
/// Returns whether the target is disposed afterwards.
fn knock_out(state: &mut GameState, tuning: &Tuning, kind: EntityKind) -> Result<bool, SimError> {
    let target_idx = state
        .entities
        .iter()
        .position(|e| e.kind() == kind)
        .ok_or(SimError::MissingEntity(kind))?;
    let target = state.entities[target_idx].body();
    if !target.is_active() {
        return Ok(true);
    }
    let (target_id, target_rect) = (target.id, target.rect());

    let hit = state.entities.iter().position(|e| match e {
        Entity::Projectile(p) => {
            p.body.is_active()
                && p.can_hit(target_id)
                && intersects(&p.body.rect(), &target_rect, tuning.hit_margin)
        }
        _ => false,
    });

    match hit {
        Some(projectile_idx) => {
            log::debug!(
                "{:?} {} hit by projectile {}",
                kind,
                target_id,
                state.entities[projectile_idx].id()
            );
            state.entities[projectile_idx].body_mut().dispose();
            state.entities[target_idx].body_mut().dispose();
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Projectile};
    use glam::Vec2;

    /// Projectile thrown by someone else, parked on top of `target`
    fn projectile_over(state: &GameState, kind: EntityKind) -> Projectile {
        let target = state.find(kind).unwrap().body().clone();
        let mut projectile = Projectile::launch(&target, &Tuning::default(), &mut rand::rng());
        projectile.body.pos = target.pos + Vec2::new(target.size.x / 2.0 - 30.0, 10.0);
        projectile.body.direction = Direction::NONE;
        projectile.thrower = 999;
        projectile
    }

    #[test]
    fn test_empty_scan_continues() {
        let mut state = GameState::new_level();
        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Continue);
        assert!(state.entities.iter().all(Entity::is_active));
    }

    #[test]
    fn test_player_hit_fails() {
        let mut state = GameState::new_level();
        let p = projectile_over(&state, EntityKind::Player);
        state.spawn(p);

        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Fail);
        assert!(!state.player().unwrap().body.is_active());
        assert!(!state.entities[2].is_active(), "projectile consumed by the hit");
    }

    #[test]
    fn test_enemy_hit_wins() {
        let mut state = GameState::new_level();
        let p = projectile_over(&state, EntityKind::Enemy);
        state.spawn(p);

        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Win);
        assert!(!state.enemy().unwrap().body.is_active());
        assert!(state.player().unwrap().body.is_active());
    }

    #[test]
    fn test_player_death_takes_precedence() {
        let mut state = GameState::new_level();
        let at_player = projectile_over(&state, EntityKind::Player);
        let at_enemy = projectile_over(&state, EntityKind::Enemy);
        state.spawn(at_enemy);
        state.spawn(at_player);
        state.keys.esc = true;

        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Fail);
        assert!(state.enemy().unwrap().body.is_active(), "later rules never ran");
    }

    #[test]
    fn test_pause_rule() {
        let mut state = GameState::new_level();
        state.keys.esc = true;
        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Pause);
    }

    #[test]
    fn test_rules_skipped_when_not_continue() {
        let mut state = GameState::new_level();
        state.status = GameStatus::Intro;
        let p = projectile_over(&state, EntityKind::Player);
        state.spawn(p);
        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Intro);
        assert!(state.player().unwrap().body.is_active());
    }

    #[test]
    fn test_unarmed_projectile_spares_its_thrower() {
        let mut state = GameState::new_level();
        let mut p = projectile_over(&state, EntityKind::Player);
        p.thrower = state.player().unwrap().body.id;
        state.spawn(p);

        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Continue);

        if let Entity::Projectile(p) = &mut state.entities[2] {
            p.armed = true;
        }
        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Fail);
    }

    #[test]
    fn test_missing_player_is_fatal() {
        let mut state = GameState::new_level();
        state.entities.remove(0);
        let err = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap_err();
        assert_eq!(err, SimError::MissingEntity(EntityKind::Player));
        assert_eq!(state.status, GameStatus::Continue, "no verdict on error");
    }

    #[test]
    fn test_grazing_projectile_is_not_a_hit() {
        let mut state = GameState::new_level();
        let player = state.player().unwrap().body.clone();
        let mut p = projectile_over(&state, EntityKind::Player);
        // Overlap the player's right edge by exactly the horizontal margin
        p.body.pos.x = player.pos.x + player.size.x - 30.0;
        state.spawn(p);
        let status = check_status(&mut state, &GAME_RULES, &Tuning::default()).unwrap();
        assert_eq!(status, GameStatus::Continue);
    }
}
