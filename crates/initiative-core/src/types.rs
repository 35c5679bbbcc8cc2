use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActionId
// ---------------------------------------------------------------------------

/// Identifier of an [`ActionDefinition`](crate::catalog::ActionDefinition),
/// stable for the lifetime of the catalog that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SubjectId / BlockId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub u64);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Something on the timeline that carries a user-visible name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Subject(SubjectId),
    Block(BlockId),
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Left is toward index 0, right is toward the end. Both wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign convention used by callers that think in deltas.
    pub fn from_delta(delta: i32) -> Option<Direction> {
        match delta.signum() {
            -1 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Index reached by one step from `index` in a ring of `len` slots.
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Left if index == 0 => len - 1,
            Direction::Left => index - 1,
            Direction::Right if index + 1 >= len => 0,
            Direction::Right => index + 1,
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "l" | "up" => Ok(Direction::Left),
            "right" | "r" | "down" => Ok(Direction::Right),
            _ => Err(format!("invalid direction '{s}': expected left or right")),
        }
    }
}
