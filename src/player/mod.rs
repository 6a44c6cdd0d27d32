//! Turn-by-turn move selection for our snake
//!
//! On a board without any tail segments the snake sweeps back and forth in
//! rows so it never runs into itself. Otherwise it builds a fresh graph and
//! heatmap every turn and heads for the food.
use tracing::{debug, instrument};

use crate::dimensions::Dimensions;
use crate::error::PathingError;
use crate::graph::BoardGraph;
use crate::heatmap::DistanceField;
use crate::types::Move;
use crate::wire_representation::Playfield;

/// State carried between turns for a single game.
///
/// Create one per game and feed it every turn's playfield.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    obstacles: Option<bool>,
    last_move: Option<Move>,
    skip: bool,
}

impl Player {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this turn's move. None means no decision could be made.
    ///
    /// Whether the board has obstacles is decided on the first turn and
    /// kept for the rest of the game.
    #[instrument(level = "trace", skip_all)]
    pub fn make_move(&mut self, playfield: &Playfield) -> Result<Option<Move>, PathingError> {
        let obstacles = *self
            .obstacles
            .get_or_insert_with(|| playfield.has_obstacles());

        if obstacles {
            self.heatmap_pass(playfield)
        } else {
            self.sweep(playfield)
        }
    }

    /// the last move the heatmap came up with
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    fn heatmap_pass(&mut self, playfield: &Playfield) -> Result<Option<Move>, PathingError> {
        let graph = BoardGraph::from_playfield(playfield)?;
        let field = DistanceField::from_playfield(&graph, playfield)?;

        let next = playfield.food().and_then(|food| field.move_towards(food));
        match next {
            Some(mv) => {
                debug!(%mv, "heatmap move");
                self.last_move = Some(mv);
            }
            None => debug!(fallback = ?self.last_move, "no heatmap move, repeating last"),
        }
        Ok(self.last_move)
    }

    fn sweep(&mut self, playfield: &Playfield) -> Result<Option<Move>, PathingError> {
        let head = playfield.last_head().ok_or(PathingError::MissingHead)?;
        let dims = playfield.dimensions();

        let mv = if dims.height() % 2 == 1 {
            odd_height_sweep(dims, head, &mut self.skip)
        } else {
            even_height_sweep(dims, head)
        };
        debug!(%mv, head, "sweep move");

        if playfield.has_clear_cell() {
            Ok(Some(mv))
        } else {
            Ok(None)
        }
    }
}

/// Sweep for boards with an even number of rows: right along the bottom,
/// snake up through columns 1.., left along the top, down column 0.
pub fn even_height_sweep<D: Dimensions>(dims: D, head: usize) -> Move {
    let last_row = dims.height() as usize - 1;
    if head == 0 {
        return Move::Right;
    }
    if dims.column(head) == 0 {
        return Move::Down;
    }
    if dims.row(head) == last_row {
        return Move::Left;
    }
    row_parity_move(dims, head)
}

/// Sweep for boards with an odd number of rows. The second to top row is
/// run twice, once each way, so `skip` flips every time we pass the origin.
pub fn odd_height_sweep<D: Dimensions>(dims: D, head: usize, skip: &mut bool) -> Move {
    let last_row = dims.height() as usize - 1;
    if head == 0 {
        *skip = !*skip;
        return Move::Right;
    }
    if dims.column(head) == 0 {
        return Move::Down;
    }
    if dims.row(head) == last_row {
        return Move::Left;
    }
    if last_row > 0 && dims.row(head) == last_row - 1 {
        if *skip && dims.column(head) == dims.width() as usize - 1 {
            return Move::Up;
        }
        return Move::Left;
    }
    row_parity_move(dims, head)
}

fn row_parity_move<D: Dimensions>(dims: D, head: usize) -> Move {
    let column = dims.column(head);
    if dims.row(head) % 2 == 0 {
        if column == dims.width() as usize - 1 {
            Move::Up
        } else {
            Move::Right
        }
    } else if column == 1 {
        Move::Up
    } else {
        Move::Left
    }
}
