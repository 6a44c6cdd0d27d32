//! BFS heatmaps and move selection
//!
//! A [DistanceField] labels every cell with its hop distance from a source
//! cell (normally our head). Walking that field downhill from a target gets
//! us back to a cell next to the source, which tells us which way to move.
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, instrument, trace, warn};

use crate::dimensions::{Custom, Dimensions};
use crate::error::PathingError;
use crate::types::{Move, NeighborDeterminableGraph};
use crate::wire_representation::Playfield;

/// Distance given to every cell the BFS never reached
pub const UNREACHED: i32 = -1;

/// Hop distances from a single source, rebuilt every turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    heat: Vec<i32>,
    source: usize,
    dims: Custom,
}

impl DistanceField {
    /// Run a breadth first search over `graph` starting at `source`.
    ///
    /// Cells the graph has no record of are dead ends rather than errors, so
    /// a head boxed in on every side still produces a field. A neighbor that
    /// falls outside the board is an error.
    #[instrument(level = "trace", skip(graph, dims))]
    pub fn new<G: NeighborDeterminableGraph, D: Dimensions>(
        graph: &G,
        source: usize,
        dims: D,
    ) -> Result<Self, PathingError> {
        let size = dims.size();
        if source >= size {
            return Err(PathingError::out_of_range(source));
        }

        let mut heat = vec![UNREACHED; size];
        let mut queue = VecDeque::with_capacity(size);
        heat[source] = 0;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            if !graph.contains_vertex(current) {
                continue;
            }
            let next_heat = heat[current] + 1;
            for &n in graph.neighbors(current)? {
                let cell = heat
                    .get_mut(n)
                    .ok_or_else(|| PathingError::out_of_range(n))?;
                if *cell == UNREACHED {
                    *cell = next_heat;
                    queue.push_back(n);
                }
            }
        }

        debug!(
            reached = heat.iter().filter(|h| **h != UNREACHED).count(),
            "built heatmap"
        );
        Ok(DistanceField {
            heat,
            source,
            dims: Custom::from_dimensions(dims.width(), dims.height()),
        })
    }

    /// Root a heatmap at the head of `playfield`
    pub fn from_playfield<G: NeighborDeterminableGraph>(
        graph: &G,
        playfield: &Playfield,
    ) -> Result<Self, PathingError> {
        let head = playfield.head().ok_or(PathingError::MissingHead)?;
        Self::new(graph, head, playfield.dimensions())
    }

    /// first index in `board` holding `value`
    pub fn find_cell(board: &[i32], value: i32) -> Option<usize> {
        board.iter().position(|c| *c == value)
    }

    /// the cell this field was rooted at
    pub fn source(&self) -> usize {
        self.source
    }

    /// hop count from the source, None if the cell is unreached or off the board
    pub fn distance(&self, index: usize) -> Option<u32> {
        match self.heat.get(index) {
            Some(h) if *h != UNREACHED => Some(*h as u32),
            _ => None,
        }
    }

    /// the raw field, `UNREACHED` marks cells the search never got to
    pub fn as_slice(&self) -> &[i32] {
        &self.heat
    }

    /// Pick the move that starts closing the distance to `target`.
    ///
    /// Returns None when the target is off the board, when nothing around it
    /// was reached, or when the cell next to the source doesn't line up with
    /// any direction.
    pub fn move_towards(&self, target: usize) -> Option<Move> {
        let path = self.descent(target)?;
        let adjacent = *path.last()?;
        let mv = self.adjacent_move(adjacent);
        trace!(goal = target, adjacent, ?mv, steps = path.len(), "picked move");
        mv
    }

    /// The cells visited walking downhill from `target` until one is a
    /// single hop from the source. The first entry is `target` itself.
    ///
    /// Neighbors are scanned below, left, right, above. The first reached
    /// one wins and is only replaced by a strictly closer one.
    pub fn descent(&self, target: usize) -> Option<Vec<usize>> {
        if target >= self.heat.len() {
            return None;
        }

        let mut current = target;
        let mut path = vec![current];
        for _ in 0..self.heat.len() {
            if self.heat[current] == 1 {
                return Some(path);
            }
            match self.closest_neighbor(current) {
                Some(next) => {
                    trace!(from = current, to = next, heat = self.heat[next], "descend");
                    current = next;
                    path.push(current);
                }
                None => {
                    debug!(goal = target, stuck_at = current, "no reached neighbor");
                    return None;
                }
            }
        }

        warn!(goal = target, "descent did not settle");
        None
    }

    fn closest_neighbor(&self, index: usize) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for n in self.dims.grid_neighbors(index).iter().flatten() {
            if closer(self.heat[*n], best.map(|(_, h)| h)) {
                best = Some((*n, self.heat[*n]));
            }
        }
        best.map(|(n, _)| n)
    }

    // the comparisons are inclusive for up and down, so any source at least a
    // row below the target reads as Up even if it isn't directly beneath it
    fn adjacent_move(&self, target: usize) -> Option<Move> {
        let source = self.source as i64;
        let target = target as i64;
        let width = self.dims.width() as i64;

        if source <= target - width {
            Some(Move::Up)
        } else if source == target - 1 {
            Some(Move::Right)
        } else if source == target + 1 {
            Some(Move::Left)
        } else if source >= target + width {
            Some(Move::Down)
        } else {
            None
        }
    }
}

fn closer(candidate: i32, best: Option<i32>) -> bool {
    candidate != UNREACHED && best.map_or(true, |b| candidate < b)
}

impl fmt::Display for DistanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.dims.width() as usize;
        for row in (0..self.dims.height() as usize).rev() {
            for h in &self.heat[row * width..(row + 1) * width] {
                write!(f, "{:>3} ", h)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CellEncoding;
    use crate::graph::BoardGraph;
    use crate::types::Vector;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    }

    fn field_for(pf: &Playfield) -> DistanceField {
        let graph = BoardGraph::from_playfield(pf).unwrap();
        DistanceField::from_playfield(&graph, pf).unwrap()
    }

    fn random_playfield(rng: &mut SmallRng, tail_chance: f64) -> Playfield {
        let enc = CellEncoding::default();
        let width = rng.gen_range(2..9);
        let height = rng.gen_range(2..9);
        let size = (width * height) as usize;
        let mut grid: Vec<i32> = (0..size)
            .map(|_| {
                if rng.gen_bool(tail_chance) {
                    enc.tail
                } else {
                    enc.clear
                }
            })
            .collect();
        grid[rng.gen_range(0..size)] = enc.head;
        Playfield::new(width, height, grid, enc).unwrap()
    }

    #[test]
    fn test_open_4x4_corner_to_corner() {
        let mut grid = vec![0; 16];
        grid[0] = 1;
        grid[15] = 3;
        let pf = Playfield::new(4, 4, grid, CellEncoding::default()).unwrap();
        let field = field_for(&pf);

        assert_eq!(Some(0), field.distance(0));
        assert_eq!(Some(6), field.distance(15));
        assert_eq!(Some(vec![15, 11, 7, 3, 2, 1]), field.descent(15));
        assert_eq!(Some(Move::Right), field.move_towards(15));
    }

    #[test]
    fn test_walled_fixture() {
        init_tracing();
        let pf = Playfield::from_json(include_str!("../../fixtures/walled_5x4.json")).unwrap();
        let field = field_for(&pf);

        assert_eq!(Some(7), field.distance(19));
        assert_eq!(Some(11), field.distance(15));
        assert_eq!(None, field.distance(5));
        assert_eq!(Some(vec![19, 14, 9, 4, 3, 2, 1]), field.descent(19));
        assert_eq!(Some(Move::Right), field.move_towards(19));
    }

    #[test]
    fn test_enclosed_food_is_unreachable() {
        let pf = Playfield::from_json(include_str!("../../fixtures/enclosed_food.json")).unwrap();
        let field = field_for(&pf);
        let food = pf.food().unwrap();

        assert_eq!(12, food);
        assert_eq!(UNREACHED, field.as_slice()[food]);
        assert_eq!(None, field.distance(food));
        assert_eq!(None, field.move_towards(food));
    }

    #[test]
    fn test_enclosed_head_still_builds() {
        let pf = Playfield::from_ascii(
            "
            . . f
            s . .
            H s .
            ",
            CellEncoding::default(),
        )
        .unwrap();
        let field = field_for(&pf);
        assert_eq!(Some(0), field.distance(0));
        assert_eq!(
            1,
            field.as_slice().iter().filter(|h| **h != UNREACHED).count()
        );
        assert_eq!(None, field.move_towards(8));
    }

    #[test]
    fn test_moves_in_every_direction() {
        let pf = Playfield::from_ascii(
            "
            f . .
            . H .
            . . .
            ",
            CellEncoding::default(),
        )
        .unwrap();
        let field = field_for(&pf);
        assert_eq!(Some(Move::Up), field.move_towards(7));
        assert_eq!(Some(Move::Down), field.move_towards(1));
        assert_eq!(Some(Move::Left), field.move_towards(3));
        assert_eq!(Some(Move::Right), field.move_towards(5));
        // ties go to the first neighbor scanned, below before right
        assert_eq!(Some(vec![6, 3]), field.descent(6));
        assert_eq!(Some(Move::Left), field.move_towards(6));
        assert_eq!(Some(vec![0, 1]), field.descent(0));
        assert_eq!(Some(Move::Down), field.move_towards(0));
    }

    #[test]
    fn test_target_is_source() {
        let pf = Playfield::new(3, 1, vec![0, 1, 0], CellEncoding::default()).unwrap();
        let field = field_for(&pf);
        // walks to the first closest neighbor and heads there
        assert_eq!(Some(vec![1, 0]), field.descent(1));
        assert_eq!(Some(Move::Left), field.move_towards(1));
    }

    #[test]
    fn test_target_off_board() {
        let pf = Playfield::new(2, 2, vec![1, 0, 0, 3], CellEncoding::default()).unwrap();
        let field = field_for(&pf);
        assert_eq!(None, field.move_towards(4));
        assert_eq!(None, field.distance(4));
    }

    #[test]
    fn test_source_out_of_range() {
        let graph = BoardGraph::new();
        let err = DistanceField::new(&graph, 9, Custom::from_dimensions(3, 3)).unwrap_err();
        assert!(matches!(err, PathingError::OutOfRange { vertex: 9 }));
    }

    #[test]
    fn test_missing_head() {
        let pf = Playfield::new(2, 1, vec![0, 3], CellEncoding::default()).unwrap();
        let graph = BoardGraph::from_playfield(&pf).unwrap();
        assert!(matches!(
            DistanceField::from_playfield(&graph, &pf),
            Err(PathingError::MissingHead)
        ));
    }

    #[test]
    fn test_stream_graph_neighbor_off_board() {
        let graph: BoardGraph = "0 1 1 9".parse().unwrap();
        let err = DistanceField::new(&graph, 0, Custom::from_dimensions(2, 2)).unwrap_err();
        assert!(matches!(err, PathingError::OutOfRange { vertex: 9 }));
    }

    #[test]
    fn test_stream_graph_sinks() {
        let graph: BoardGraph = "0 1 1 2".parse().unwrap();
        let field = DistanceField::new(&graph, 0, Custom::from_dimensions(3, 1)).unwrap();
        assert_eq!(&[0, 1, 2], field.as_slice());
    }

    #[test]
    fn test_inclusive_up_comparison() {
        // 0 -> 8 isn't a grid step, but the up test only asks for "at least a row below"
        let graph: BoardGraph = "0 8".parse().unwrap();
        let field = DistanceField::new(&graph, 0, Custom::from_dimensions(3, 3)).unwrap();
        assert_eq!(Some(Move::Up), field.move_towards(8));

        // 4 -> 2 matches none of the four tests
        let graph: BoardGraph = "4 2".parse().unwrap();
        let field = DistanceField::new(&graph, 4, Custom::from_dimensions(3, 3)).unwrap();
        assert_eq!(Some(1), field.distance(2));
        assert_eq!(None, field.move_towards(2));
    }

    #[test]
    fn test_find_cell() {
        let board = [0, 0, 3, 0, 3];
        assert_eq!(Some(2), DistanceField::find_cell(&board, 3));
        assert_eq!(None, DistanceField::find_cell(&board, 1));
    }

    #[test]
    fn test_display() {
        let pf = Playfield::new(2, 2, vec![1, 0, 0, 0], CellEncoding::default()).unwrap();
        let field = field_for(&pf);
        assert_eq!("  1   2 \n  0   1 \n", field.to_string());

        let pf = Playfield::new(2, 1, vec![1, 2], CellEncoding::default()).unwrap();
        assert_eq!("  0  -1 \n", field_for(&pf).to_string());
    }

    #[test]
    fn test_open_boards_match_manhattan() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let pf = random_playfield(&mut rng, 0.0);
            let field = field_for(&pf);
            let head = pf.position_of(field.source());
            for i in 0..pf.grid.len() {
                let p = pf.position_of(i);
                let manhattan = (p.x - head.x).abs() + (p.y - head.y).abs();
                assert_eq!(Some(manhattan as u32), field.distance(i));
            }
        }
    }

    #[test]
    fn test_random_boards_keep_bfs_properties() {
        let mut rng = SmallRng::seed_from_u64(1337);
        for _ in 0..200 {
            let pf = random_playfield(&mut rng, 0.3);
            let graph = BoardGraph::from_playfield(&pf).unwrap();
            let field = DistanceField::from_playfield(&graph, &pf).unwrap();
            let source = field.source();
            assert_eq!(Some(0), field.distance(source));

            for u in graph.vertices() {
                for v in graph.neighbors(u).unwrap() {
                    match (field.distance(u), field.distance(*v)) {
                        (Some(du), Some(dv)) => assert!((du as i64 - dv as i64).abs() <= 1),
                        (None, None) => {}
                        _ => panic!("{} and {} disagree on reachability\n{}", u, v, pf),
                    }
                }
            }

            for target in 0..pf.grid.len() {
                let d = match field.distance(target) {
                    Some(d) if d >= 1 => d,
                    _ => continue,
                };
                let path = field.descent(target).unwrap();
                assert_eq!(d as usize, path.len());
                for pair in path.windows(2) {
                    assert_eq!(
                        field.distance(pair[0]).unwrap(),
                        field.distance(pair[1]).unwrap() + 1
                    );
                }

                let mv = field.move_towards(target).unwrap();
                let step = pf.position_of(source).add_vec(mv.to_vector());
                assert_eq!(pf.position_of(*path.last().unwrap()), step);
                assert_eq!(pf.position_of(source), step.sub_vec(mv.to_vector()));
                assert_ne!(Vector { x: 0, y: 0 }, mv.to_vector());
            }
        }
    }
}
