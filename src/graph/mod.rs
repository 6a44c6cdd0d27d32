//! Adjacency graphs over playfield cells
//!
//! A [BoardGraph] maps a vertex to the set of vertices one step away. Graphs
//! built from a board only ever connect traversable cells that are
//! orthogonally adjacent without wrapping across a row. Graphs read from an
//! edge stream are taken as given.
use std::collections::BTreeSet;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::config::CellEncoding;
use crate::dimensions::Dimensions;
use crate::error::PathingError;
use crate::types::{AdjacencySet, NeighborDeterminableGraph};
use crate::wire_representation::Playfield;

/// Directed adjacency sets keyed by cell index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardGraph {
    vertices: FxHashMap<usize, AdjacencySet>,
    num_vertices: usize,
    num_edges: usize,
}

impl BoardGraph {
    /// an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a raw board.
    ///
    /// Every index counts as a vertex, but only traversable cells with at
    /// least one traversable neighbor end up with an adjacency record.
    #[instrument(level = "trace", skip_all, fields(width = dims.width(), height = dims.height()))]
    pub fn from_grid<D: Dimensions>(
        cells: &[i32],
        dims: D,
        encoding: &CellEncoding,
    ) -> Result<Self, PathingError> {
        let size = dims.size();
        if cells.len() != size {
            return Err(PathingError::BoardSizeMismatch {
                expected: size,
                actual: cells.len(),
            });
        }

        let mut graph = BoardGraph {
            num_vertices: size,
            ..Self::default()
        };
        for (i, raw) in cells.iter().enumerate() {
            if !encoding.is_traversable(*raw) {
                continue;
            }
            for n in dims.grid_neighbors(i).iter().flatten() {
                if encoding.is_traversable(cells[*n]) {
                    graph.vertices.entry(i).or_default().insert(*n);
                    graph.num_edges += 1;
                }
            }
        }

        debug!(
            vertices = graph.num_vertices,
            edges = graph.num_edges,
            records = graph.vertices.len(),
            "built board graph"
        );
        Ok(graph)
    }

    /// Build the graph for a playfield using its own encoding
    pub fn from_playfield(playfield: &Playfield) -> Result<Self, PathingError> {
        Self::from_grid(
            playfield.cells(),
            playfield.dimensions(),
            &playfield.encoding,
        )
    }

    /// Read whitespace separated `from to` pairs until the reader is
    /// exhausted. The vertex count is the number of distinct `from` vertices.
    #[instrument(level = "trace", skip_all)]
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, PathingError> {
        let mut graph = Self::new();
        let mut pending: Option<usize> = None;

        for line in reader.lines() {
            let line = line?;
            for token in line.split_whitespace() {
                let vertex = parse_vertex(token)?;
                match pending.take() {
                    Some(from) => {
                        graph.add_edge(from, vertex);
                    }
                    None => pending = Some(vertex),
                }
            }
        }

        if let Some(from) = pending {
            return Err(PathingError::DanglingVertex(from as i64));
        }

        graph.num_vertices = graph.vertices.len();
        debug!(
            vertices = graph.num_vertices,
            edges = graph.num_edges,
            "read graph from edge stream"
        );
        Ok(graph)
    }

    /// insert the directed edge `from -> to`, returns false if it was already there
    pub fn add_edge(&mut self, from: usize, to: usize) -> bool {
        let inserted = self.vertices.entry(from).or_default().insert(to);
        if inserted {
            self.num_edges += 1;
        }
        inserted
    }

    /// number of vertices this graph was built over
    pub fn vertex_count(&self) -> usize {
        self.num_vertices
    }

    /// number of distinct directed edges recorded
    ///
    /// A repeated `from -> to` pair, from a stream or from [Self::add_edge],
    /// is only counted once.
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// every vertex with an adjacency record, this can be smaller than `vertex_count`
    pub fn vertices(&self) -> BTreeSet<usize> {
        self.vertices.keys().copied().collect()
    }
}

fn parse_vertex(token: &str) -> Result<usize, PathingError> {
    let raw: i64 = token.parse()?;
    if raw < 0 {
        return Err(PathingError::OutOfRange { vertex: raw });
    }
    Ok(raw as usize)
}

impl NeighborDeterminableGraph for BoardGraph {
    fn neighbors(&self, vertex: usize) -> Result<&AdjacencySet, PathingError> {
        self.vertices
            .get(&vertex)
            .ok_or_else(|| PathingError::out_of_range(vertex))
    }

    fn contains_vertex(&self, vertex: usize) -> bool {
        self.vertices.contains_key(&vertex)
    }
}

impl FromStr for BoardGraph {
    type Err = PathingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

impl fmt::Display for BoardGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, adjacent) in self.vertices.iter().sorted_by_key(|(v, _)| **v) {
            writeln!(f, "{}: {}", vertex, adjacent.iter().sorted().join(" "))?;
        }
        Ok(())
    }
}
