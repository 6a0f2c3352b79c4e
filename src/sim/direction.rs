//! Movement direction flags
//!
//! A direction holds at most one horizontal and one vertical heading. The raw
//! encoding is the classic bitmask (LEFT=1, RIGHT=2, UP=4, DOWN=8), but values
//! only change through [`Direction::set`], so a malformed mask can only enter
//! through [`Direction::try_from`].

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A single heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Left, Heading::Right, Heading::Up, Heading::Down];

    /// Bit used in the raw mask
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Heading::Left => 1,
            Heading::Right => 2,
            Heading::Up => 4,
            Heading::Down => 8,
        }
    }

    /// The heading on the same axis that excludes this one
    #[inline]
    pub const fn antagonist(self) -> Heading {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
        }
    }
}

/// Direction flags (immutable value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const LEFT: Direction = Direction(Heading::Left.bit());
    pub const RIGHT: Direction = Direction(Heading::Right.bit());
    pub const UP: Direction = Direction(Heading::Up.bit());
    pub const DOWN: Direction = Direction(Heading::Down.bit());

    const ALL_BITS: u8 = 0b1111;

    /// Apply a new heading: `None` clears everything, otherwise the axis
    /// antagonist is dropped and the heading added.
    #[must_use]
    pub const fn set(self, heading: Option<Heading>) -> Direction {
        match heading {
            None => Direction::NONE,
            Some(h) => Direction((self.0 & !h.antagonist().bit()) | h.bit()),
        }
    }

    /// Shorthand for `set(Some(heading))`
    #[must_use]
    #[inline]
    pub const fn turn(self, heading: Heading) -> Direction {
        self.set(Some(heading))
    }

    #[inline]
    pub const fn has(self, heading: Heading) -> bool {
        self.0 & heading.bit() != 0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Horizontal heading, if any
    pub fn horizontal(self) -> Option<Heading> {
        if self.has(Heading::Left) {
            Some(Heading::Left)
        } else if self.has(Heading::Right) {
            Some(Heading::Right)
        } else {
            None
        }
    }

    /// Vertical heading, if any
    pub fn vertical(self) -> Option<Heading> {
        if self.has(Heading::Up) {
            Some(Heading::Up)
        } else if self.has(Heading::Down) {
            Some(Heading::Down)
        } else {
            None
        }
    }

    /// At most one bit per axis and nothing outside the known bits
    pub const fn is_valid_bits(bits: u8) -> bool {
        let both_horizontal = Heading::Left.bit() | Heading::Right.bit();
        let both_vertical = Heading::Up.bit() | Heading::Down.bit();
        bits & !Self::ALL_BITS == 0
            && bits & both_horizontal != both_horizontal
            && bits & both_vertical != both_vertical
    }
}

impl TryFrom<u8> for Direction {
    type Error = SimError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if Direction::is_valid_bits(bits) {
            Ok(Direction(bits))
        } else {
            Err(SimError::MalformedDirection(bits))
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.0
    }
}
