#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Pathfinding for a snake on a fixed size playfield.
//!
//! Every turn the board is turned into a [graph::BoardGraph] of traversable
//! cells, a breadth first search from the head labels each cell with its hop
//! distance ([heatmap::DistanceField]), and walking that heatmap downhill from
//! the food tells us which way to go. [player::Player] wraps that up with the
//! state that has to live across turns.
//!
//! ```
//! # use playfield_pathing::{graph::BoardGraph, heatmap::DistanceField, types::Move};
//! let pf = playfield_pathing::playfield_fixture(
//!     r#"{"width":3,"height":3,"grid":[1,0,0, 2,2,0, 3,0,0]}"#,
//! );
//! let graph = BoardGraph::from_playfield(&pf).unwrap();
//! let heat = DistanceField::from_playfield(&graph, &pf).unwrap();
//! assert_eq!(Some(6), heat.distance(6));
//! assert_eq!(Some(Move::Right), heat.move_towards(6));
//! ```

use wire_representation::Playfield;

pub mod config;
pub mod dimensions;
pub mod error;
pub mod graph;
pub mod heatmap;
pub mod player;
pub mod types;
pub mod wire_representation;

/// Loads a fixture from a given string
pub fn playfield_fixture(playfield_fixture: &str) -> Playfield {
    let pf: Result<Playfield, _> = Playfield::from_json(playfield_fixture);
    pf.expect("the json literal is valid")
}
