#![allow(missing_docs)]
//! types to match the playfield wire representation
//!
//! A playfield arrives as a flat, row-major array of raw integers plus its
//! width and height. Row 0 is the bottom row.

use crate::config::CellEncoding;
use crate::dimensions::{Custom, Dimensions};
use crate::error::PathingError;
use crate::heatmap::DistanceField;
use crate::types::{CellState, SizeDeterminableBoard, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An x/y location on the board, x is the column and y the row
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 + v.x) as i32,
            y: (self.y as i64 + v.y) as i32,
        }
    }
    pub fn sub_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 - v.x) as i32,
            y: (self.y as i64 - v.y) as i32,
        }
    }
}

/// The board as handed to us each turn. Never mutated by this crate.
/// ```
/// # use playfield_pathing::wire_representation::Playfield;
/// let body = r#"{"width":3,"height":2,"grid":[1,0,0,0,0,3]}"#;
/// let pf = Playfield::from_json(body).unwrap();
/// assert_eq!(Some(0), pf.head());
/// assert_eq!(Some(5), pf.food());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    pub width: u32,
    pub height: u32,
    pub grid: Vec<i32>,
    #[serde(default)]
    pub encoding: CellEncoding,
}

impl Playfield {
    /// build a playfield, checking the grid has exactly width * height cells
    pub fn new(
        width: u32,
        height: u32,
        grid: Vec<i32>,
        encoding: CellEncoding,
    ) -> Result<Self, PathingError> {
        let pf = Playfield {
            width,
            height,
            grid,
            encoding,
        };
        pf.check_size()?;
        Ok(pf)
    }

    /// parse and validate a playfield from its json wire format
    pub fn from_json(json: &str) -> Result<Self, PathingError> {
        let pf: Playfield = serde_json::from_str(json)?;
        pf.check_size()?;
        Ok(pf)
    }

    /// parse the same picture that `Display` produces: rows top first, one
    /// symbol per cell, whitespace between symbols is ignored.
    /// `.` clear, `H` head, `f` food, `s` tail, anything else blocked.
    pub fn from_ascii(picture: &str, encoding: CellEncoding) -> Result<Self, PathingError> {
        let rows: Vec<Vec<char>> = picture
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let blocked = encoding
            .clear
            .max(encoding.head)
            .max(encoding.food)
            .max(encoding.tail)
            + 1;

        let mut grid = Vec::with_capacity((width * height) as usize);
        // the picture is top row first, the grid is bottom row first
        for row in rows.iter().rev() {
            if row.len() as u32 != width {
                return Err(PathingError::BoardSizeMismatch {
                    expected: (width * height) as usize,
                    actual: rows.iter().map(|r| r.len()).sum(),
                });
            }
            grid.extend(row.iter().map(|c| match c {
                '.' => encoding.clear,
                'H' => encoding.head,
                'f' => encoding.food,
                's' => encoding.tail,
                _ => blocked,
            }));
        }
        Playfield::new(width, height, grid, encoding)
    }

    fn check_size(&self) -> Result<(), PathingError> {
        let expected = self.cell_count();
        if self.grid.len() != expected {
            return Err(PathingError::BoardSizeMismatch {
                expected,
                actual: self.grid.len(),
            });
        }
        Ok(())
    }

    pub fn dimensions(&self) -> Custom {
        Custom::from_dimensions(self.width, self.height)
    }

    pub fn cells(&self) -> &[i32] {
        &self.grid
    }

    pub fn state_at(&self, index: usize) -> Option<CellState> {
        self.grid.get(index).map(|raw| self.encoding.decode(*raw))
    }

    /// first cell holding our head
    pub fn head(&self) -> Option<usize> {
        DistanceField::find_cell(&self.grid, self.encoding.head)
    }

    /// last cell holding our head
    pub fn last_head(&self) -> Option<usize> {
        self.grid.iter().rposition(|c| *c == self.encoding.head)
    }

    /// first cell holding food
    pub fn food(&self) -> Option<usize> {
        DistanceField::find_cell(&self.grid, self.encoding.food)
    }

    /// is there any tail segment on the board
    pub fn has_obstacles(&self) -> bool {
        self.grid.iter().any(|c| *c == self.encoding.tail)
    }

    /// is there at least one clear cell left
    pub fn has_clear_cell(&self) -> bool {
        self.grid.iter().any(|c| *c == self.encoding.clear)
    }

    pub fn position_of(&self, index: usize) -> Position {
        let d = self.dimensions();
        Position {
            x: d.column(index) as i32,
            y: d.row(index) as i32,
        }
    }
}

impl SizeDeterminableBoard for Playfield {
    fn get_width(&self) -> u32 {
        self.width
    }

    fn get_height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.height {
            let k = self.height - i - 1;
            for j in 0..self.width {
                let index = (k * self.width + j) as usize;
                let symbol = match self.state_at(index) {
                    Some(CellState::Clear) => '.',
                    Some(CellState::Head) => 'H',
                    Some(CellState::Food) => 'f',
                    Some(CellState::Tail) => 's',
                    _ => 'x',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
