//! Sprite catalog and asset loading
//!
//! Every entity kind has a base sprite; player and enemy also have a mirrored
//! variant used while facing left. All of them are resolved before a level
//! renders its first frame.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::EntityKind;

/// Catalog key: entity kind plus mirrored flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteKey {
    pub kind: EntityKind,
    pub flipped: bool,
}

impl SpriteKey {
    pub const fn base(kind: EntityKind) -> Self {
        Self {
            kind,
            flipped: false,
        }
    }

    pub const fn flipped(kind: EntityKind) -> Self {
        Self {
            kind,
            flipped: true,
        }
    }
}

/// Where a sprite comes from and its natural size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSource {
    pub key: SpriteKey,
    pub width: u32,
    pub height: u32,
    pub url: String,
}

impl SpriteSource {
    fn new(key: SpriteKey, width: u32, height: u32, url: &str) -> Self {
        Self {
            key,
            width,
            height,
            url: url.to_string(),
        }
    }
}

/// Opaque handle to a decoded image owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u64);

/// A resolved sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub source: SpriteSource,
    pub image: ImageHandle,
}

const SPRITE_BASE_URL: &str = "https://interns.room4.team/test-task-v1";

/// All sprites the game draws
pub fn catalog() -> Vec<SpriteSource> {
    vec![
        SpriteSource::new(
            SpriteKey::base(EntityKind::Player),
            150,
            150,
            &format!("{SPRITE_BASE_URL}/player.png"),
        ),
        SpriteSource::new(
            SpriteKey::flipped(EntityKind::Player),
            120,
            120,
            &format!("{SPRITE_BASE_URL}/player-reversed.png"),
        ),
        SpriteSource::new(
            SpriteKey::base(EntityKind::Projectile),
            28,
            14,
            &format!("{SPRITE_BASE_URL}/comet.png"),
        ),
        SpriteSource::new(
            SpriteKey::base(EntityKind::Enemy),
            78,
            82,
            &format!("{SPRITE_BASE_URL}/enemy.png"),
        ),
        SpriteSource::new(
            SpriteKey::flipped(EntityKind::Enemy),
            78,
            82,
            &format!("{SPRITE_BASE_URL}/enemy-reversed.png"),
        ),
    ]
}

/// Host-side image fetching/decoding
pub trait AssetLoader {
    /// Resolve one sprite; retries and timeouts are the loader's business
    fn load(&mut self, source: &SpriteSource) -> Result<ImageHandle, SimError>;
}

/// Loader that hands out sequential handles without touching any I/O
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    next: u64,
    pub loaded: Vec<SpriteKey>,
}

impl AssetLoader for InMemoryAssets {
    fn load(&mut self, source: &SpriteSource) -> Result<ImageHandle, SimError> {
        self.next += 1;
        self.loaded.push(source.key);
        Ok(ImageHandle(self.next))
    }
}

/// Resolved sprites by key
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteKey, Sprite>,
}

impl SpriteSheet {
    /// Resolve the whole catalog; the first failure aborts
    pub fn preload<L: AssetLoader>(loader: &mut L) -> Result<Self, SimError> {
        let mut sprites = HashMap::new();
        for source in catalog() {
            let image = loader.load(&source)?;
            sprites.insert(source.key, Sprite { source, image });
        }
        log::info!("Preloaded {} sprites", sprites.len());
        Ok(Self { sprites })
    }

    pub fn get(&self, key: SpriteKey) -> Option<&Sprite> {
        self.sprites.get(&key)
    }

    /// Mirrored variant if requested and available, else the base sprite
    pub fn resolve(&self, kind: EntityKind, flipped: bool) -> Option<&Sprite> {
        if flipped {
            if let Some(sprite) = self.get(SpriteKey::flipped(kind)) {
                return Some(sprite);
            }
        }
        self.get(SpriteKey::base(kind))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
