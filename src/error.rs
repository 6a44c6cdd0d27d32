//! the error type shared by every fallible operation in this crate
use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Everything that can go wrong while building graphs or heatmaps.
///
/// An unreachable target is not an error, it shows up as `None` from
/// [`crate::heatmap::DistanceField::move_towards`].
#[derive(Debug, Error)]
pub enum PathingError {
    /// a vertex was queried that the graph (or board) has no record of
    #[error("vertex {vertex} is out of range")]
    OutOfRange {
        #[allow(missing_docs)]
        vertex: i64,
    },

    /// the flat board didn't have width * height cells
    #[error("board has {actual} cells, expected {expected}")]
    BoardSizeMismatch {
        #[allow(missing_docs)]
        expected: usize,
        #[allow(missing_docs)]
        actual: usize,
    },

    /// there's no head on the board to root a heatmap at
    #[error("no head found on the playfield")]
    MissingHead,

    /// an edge stream ended half way through a pair
    #[error("edge stream ended after vertex {0} without a destination")]
    DanglingVertex(i64),

    #[allow(missing_docs)]
    #[error("couldn't parse edge stream: {0}")]
    Parse(#[from] ParseIntError),

    #[allow(missing_docs)]
    #[error("couldn't read edge stream: {0}")]
    Io(#[from] io::Error),

    #[allow(missing_docs)]
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PathingError {
    pub(crate) fn out_of_range(vertex: usize) -> Self {
        PathingError::OutOfRange {
            vertex: vertex as i64,
        }
    }
}
