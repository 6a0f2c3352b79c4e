//! Data-driven game balance
//!
//! Frame and sprite sizes are fixed in [`crate::consts`]; everything that is
//! a matter of feel lives here and can be loaded from JSON.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::{Heading, HitMargin};

/// Closed range for a random initial speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    #[inline]
    pub fn contains(&self, speed: f32) -> bool {
        (self.min..=self.max).contains(&speed)
    }

    #[inline]
    pub fn mean(&self) -> f32 {
        (self.min + self.max) / 2.0
    }

    fn validate(&self, name: &str) -> Result<(), SimError> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(SimError::InvalidTuning(format!("{name} must be bounded")));
        }
        if self.min < 0.0 || self.min > self.max {
            return Err(SimError::InvalidTuning(format!(
                "{name} needs 0 <= min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Initial speed of a projectile thrown while facing left
    pub left_throw: SpeedRange,
    /// Initial speed of a projectile thrown while facing right
    pub right_throw: SpeedRange,
    /// Downward drift per time unit
    pub gravity: f32,
    /// Chance per tick that the enemy throws
    pub enemy_shot_chance: f64,
    /// Minimum overlap for a projectile to count as a hit
    pub hit_margin: HitMargin,
    /// Clock milliseconds per simulation time unit
    pub ms_per_unit: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            left_throw: SpeedRange::new(3.0, 7.0),
            right_throw: SpeedRange::new(4.0, 12.0),
            gravity: 0.3,
            enemy_shot_chance: 0.006,
            hit_margin: HitMargin::default(),
            ms_per_unit: 10.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)
            .map_err(|e| SimError::InvalidTuning(e.to_string()))?;
        tuning.validate()?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Speed range for a throw facing `heading`
    pub fn projectile_speed(&self, heading: Heading) -> SpeedRange {
        match heading {
            Heading::Left => self.left_throw,
            _ => self.right_throw,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.left_throw.validate("left_throw")?;
        self.right_throw.validate("right_throw")?;
        if self.left_throw == self.right_throw {
            return Err(SimError::InvalidTuning(
                "left_throw and right_throw must differ".into(),
            ));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(SimError::InvalidTuning(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if !(0.0..=1.0).contains(&self.enemy_shot_chance) {
            return Err(SimError::InvalidTuning(format!(
                "enemy_shot_chance must be a probability, got {}",
                self.enemy_shot_chance
            )));
        }
        let margin = self.hit_margin;
        if !(margin.horizontal >= 0.0 && margin.vertical >= 0.0) {
            return Err(SimError::InvalidTuning("hit_margin must be >= 0".into()));
        }
        if !self.ms_per_unit.is_finite() || self.ms_per_unit <= 0.0 {
            return Err(SimError::InvalidTuning("ms_per_unit must be positive".into()));
        }
        Ok(())
    }
}
