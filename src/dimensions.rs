//! We can represent several different configuration of boards
//!
//! Some of these are more compact than others, but they are also more specialized.
//! For example: [Custom] holds the width and height at runtime, while [Fixed] is a fixed sized
//! board at compile time.
//!
//! Every dimension also knows how to step between cell indices without
//! wrapping around a row or falling off the board, which is the only
//! geometry the graph and heatmap need.

use core::fmt::Debug;
use std::hash::Hash;

/// Trait that all different Dimensions must implement
pub trait Dimensions: Debug + Copy + Hash {
    /// Convert from a width and a height to this dimension
    fn from_dimensions(width: u32, height: u32) -> Self;

    /// Get the width of this dimension
    fn width(&self) -> u32;

    /// Get the height of this dimension
    fn height(&self) -> u32;

    /// number of cells on a board of this size
    fn size(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// the cell one row down (index - width), if there is one
    fn below(&self, index: usize) -> Option<usize> {
        index.checked_sub(self.width() as usize)
    }

    /// the cell one column left, never wrapping onto the previous row
    fn left(&self, index: usize) -> Option<usize> {
        if index % self.width() as usize > 0 {
            Some(index - 1)
        } else {
            None
        }
    }

    /// the cell one column right, never wrapping onto the next row
    fn right(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        if next < self.size() && next % self.width() as usize > 0 {
            Some(next)
        } else {
            None
        }
    }

    /// the cell one row up (index + width), if there is one
    fn above(&self, index: usize) -> Option<usize> {
        let width = self.width() as usize;
        if index / width + 1 < self.height() as usize {
            Some(index + width)
        } else {
            None
        }
    }

    /// the in-bounds neighbors of `index`, in below, left, right, above order
    fn grid_neighbors(&self, index: usize) -> [Option<usize>; 4] {
        [
            self.below(index),
            self.left(index),
            self.right(index),
            self.above(index),
        ]
    }

    /// row of the given index, row 0 is the bottom of the board
    fn row(&self, index: usize) -> usize {
        index / self.width() as usize
    }

    /// column of the given index
    fn column(&self, index: usize) -> usize {
        index % self.width() as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A fixed size board
pub struct Fixed<const W: u32, const H: u32>;

impl<const W: u32, const H: u32> Dimensions for Fixed<W, H> {
    fn width(&self) -> u32 {
        W
    }

    fn height(&self) -> u32 {
        H
    }

    fn from_dimensions(width: u32, height: u32) -> Self {
        debug_assert_eq!(width, W);
        debug_assert_eq!(height, H);

        Self
    }
}

/// Alias for a [Fixed] board at the classic 20x20 playfield size
pub type Classic = Fixed<20, 20>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// A fully custom dimension
///
/// Stores the height and width seperately
pub struct Custom {
    width: u32,
    height: u32,
}

impl Dimensions for Custom {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn from_dimensions(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
