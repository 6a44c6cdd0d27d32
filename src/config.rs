//! Raw cell value configuration
//!
//! Boards come in as flat integer arrays. [CellEncoding] says which integer
//! means what, anything it doesn't recognise decodes as [CellState::Blocked].
use serde::{Deserialize, Serialize};

use crate::error::PathingError;
use crate::types::CellState;

/// Maps the raw integers of a board to [CellState]s
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct CellEncoding {
    /// value of an empty cell
    pub clear: i32,
    /// value of our snake's head
    pub head: i32,
    /// value of a food pellet
    pub food: i32,
    /// value of a tail segment
    pub tail: i32,
}

impl Default for CellEncoding {
    fn default() -> Self {
        CellEncoding {
            clear: 0,
            head: 1,
            tail: 2,
            food: 3,
        }
    }
}

impl CellEncoding {
    /// Load an encoding from json, missing fields fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, PathingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// decode a raw cell value
    pub fn decode(&self, raw: i32) -> CellState {
        if raw == self.clear {
            CellState::Clear
        } else if raw == self.head {
            CellState::Head
        } else if raw == self.food {
            CellState::Food
        } else if raw == self.tail {
            CellState::Tail
        } else {
            CellState::Blocked
        }
    }

    /// can the snake move into a cell holding `raw`
    pub fn is_traversable(&self, raw: i32) -> bool {
        self.decode(raw).is_traversable()
    }
}
