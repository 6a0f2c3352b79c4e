//! Rendering seams
//!
//! The core never draws. It turns the entity list into sprite draw commands
//! and hands them, or a status message, to a [`Renderer`].

pub mod ascii;
pub mod sprites;

pub use ascii::AsciiRenderer;
pub use sprites::{AssetLoader, ImageHandle, InMemoryAssets, Sprite, SpriteKey, SpriteSheet};

use glam::Vec2;

use crate::sim::{Entity, GameStatus, Heading};

/// One sprite to draw
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub entity_id: u32,
    pub key: SpriteKey,
    pub image: ImageHandle,
    /// Top-left corner, also the rotation origin
    pub pos: Vec2,
    /// Drawn size (entity size, not the natural image size)
    pub size: Vec2,
    /// Rotation in degrees
    pub angle: f32,
}

/// Drawing backend
pub trait Renderer {
    /// Clear and draw one frame, back to front
    fn draw_frame(&mut self, sprites: &[SpriteDraw]);

    /// Overlay a status message (lines separated by `\n`)
    fn draw_message(&mut self, message: &str);
}

/// Build draw commands for the active entities, in collection order.
///
/// Entities facing left use the mirrored sprite when one exists. Entities
/// without any sprite are skipped.
pub fn draw_list(entities: &[Entity], sheet: &SpriteSheet) -> Vec<SpriteDraw> {
    entities
        .iter()
        .filter(|e| e.is_active())
        .filter_map(|entity| {
            let body = entity.body();
            let flipped = body.direction.has(Heading::Left);
            let sprite = sheet.resolve(entity.kind(), flipped)?;
            Some(SpriteDraw {
                entity_id: body.id,
                key: sprite.source.key,
                image: sprite.image,
                pos: body.pos,
                size: body.size,
                angle: body.angle,
            })
        })
        .collect()
}

/// Overlay text for a waiting status
pub fn message_for(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Continue => None,
        GameStatus::Win => Some("You win!\nYeah!"),
        GameStatus::Fail => Some("You lose!"),
        GameStatus::Pause => Some("Game paused!\nPress Space to continue"),
        GameStatus::Intro => Some("Welcome!\nPress Space to start the game"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, GameState};

    #[test]
    fn test_draw_list_picks_variants() {
        let state = GameState::new_level();
        let sheet = SpriteSheet::preload(&mut InMemoryAssets::default()).unwrap();
        let draws = draw_list(&state.entities, &sheet);

        assert_eq!(draws.len(), 2);
        // Player faces right, enemy faces left
        assert_eq!(draws[0].key, SpriteKey::base(EntityKind::Player));
        assert_eq!(draws[1].key, SpriteKey::flipped(EntityKind::Enemy));
        assert_eq!(draws[1].size, state.entities[1].body().size);
    }

    #[test]
    fn test_draw_list_skips_disposed() {
        let mut state = GameState::new_level();
        state.entities[1].body_mut().dispose();
        let sheet = SpriteSheet::preload(&mut InMemoryAssets::default()).unwrap();
        assert_eq!(draw_list(&state.entities, &sheet).len(), 1);
    }

    #[test]
    fn test_messages() {
        assert!(message_for(GameStatus::Continue).is_none());
        assert!(message_for(GameStatus::Pause).unwrap().contains("Space"));
        assert_eq!(message_for(GameStatus::Fail), Some("You lose!"));
    }
}
