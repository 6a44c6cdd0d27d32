//! various types that are useful for working with a playfield
use fxhash::FxHashSet;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::PathingError;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x position
    pub x: i64,
    /// y position
    pub y: i64,
}

/// Represents a move. "no move" is expressed as `Option::<Move>::None`
/// wherever a decision can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Left => write!(f, "left"),
            Move::Right => write!(f, "right"),
            Move::Up => write!(f, "up"),
            Move::Down => write!(f, "down"),
        }
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Move {
    /// convert this move to a vector. row 0 is the bottom of the board so up is +y
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Left => Vector { x: -1, y: 0 },
            Move::Right => Vector { x: 1, y: 0 },
            Move::Up => Vector { x: 0, y: 1 },
            Move::Down => Vector { x: 0, y: -1 },
        }
    }
}

/// The decoded state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// nothing here
    Clear,
    /// the head of our snake
    Head,
    /// food to be eaten
    Food,
    /// a piece of the snake's tail
    Tail,
    /// any value the encoding doesn't know about, never traversable
    Blocked,
}

impl CellState {
    /// clear, head and food cells can be moved through, nothing else can
    pub fn is_traversable(self) -> bool {
        matches!(self, CellState::Clear | CellState::Head | CellState::Food)
    }
}

/// a board for which the size can be determined
pub trait SizeDeterminableBoard {
    #[allow(missing_docs)]
    fn get_width(&self) -> u32;
    #[allow(missing_docs)]
    fn get_height(&self) -> u32;

    /// total number of cells on the board
    fn cell_count(&self) -> usize {
        self.get_width() as usize * self.get_height() as usize
    }
}

/// The outgoing adjacency of a single vertex
pub type AdjacencySet = FxHashSet<usize>;

/// a graph for which the outgoing neighbors of a vertex can be determined
pub trait NeighborDeterminableGraph {
    /// returns the outgoing adjacency of `vertex`, erroring if the graph has no record of it
    fn neighbors(&self, vertex: usize) -> Result<&AdjacencySet, PathingError>;

    /// does this graph hold an adjacency record for `vertex`
    fn contains_vertex(&self, vertex: usize) -> bool;
}
