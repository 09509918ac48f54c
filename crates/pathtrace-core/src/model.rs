//! The [`GridModel`] type — an obstacle grid with start and end markers.
//!
//! A `GridModel` is immutable for the lifetime of one search run. Editing
//! (painting walls, relocating endpoints) produces a fresh model through
//! a builder; search algorithms only ever hold a shared reference.

use crate::error::{Endpoint, GridError};
use crate::geom::Coord;

/// What occupies a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

impl CellKind {
    /// Whether this cell blocks movement.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, CellKind::Wall)
    }
}

/// A rectangular matrix of [`CellKind`] with one start and one end cell.
///
/// Out-of-bounds reads behave as walls, so callers can probe neighbours
/// without a separate bounds check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    cells: Vec<CellKind>,
    rows: i32,
    cols: i32,
    start: Coord,
    end: Coord,
}

impl GridModel {
    /// Create a fully open grid with the given endpoints.
    pub fn open(rows: i32, cols: i32, start: Coord, end: Coord) -> Result<Self, GridError> {
        Self::from_fn(rows, cols, start, end, |_| false)
    }

    /// Create a grid whose walls are given by `wall_at`.
    ///
    /// The start and end cells are carved out of the wall mask, then the
    /// shape and endpoints are validated.
    pub fn from_fn(
        rows: i32,
        cols: i32,
        start: Coord,
        end: Coord,
        wall_at: impl Fn(Coord) -> bool,
    ) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyGrid);
        }
        let in_bounds =
            |c: Coord| c.row >= 0 && c.row < rows && c.col >= 0 && c.col < cols;
        if !in_bounds(start) {
            return Err(GridError::InvalidEndpoint(Endpoint::Start, start));
        }
        if !in_bounds(end) || end == start {
            return Err(GridError::InvalidEndpoint(Endpoint::End, end));
        }

        let mut cells = vec![CellKind::Empty; (rows * cols) as usize];
        for row in 0..rows {
            for col in 0..cols {
                let c = Coord::new(row, col);
                if wall_at(c) {
                    cells[(row * cols + col) as usize] = CellKind::Wall;
                }
            }
        }
        cells[(start.row * cols + start.col) as usize] = CellKind::Start;
        cells[(end.row * cols + end.col) as usize] = CellKind::End;

        Ok(Self {
            cells,
            rows,
            cols,
            start,
            end,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells. Always false for a constructed model.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The start marker.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// The end marker.
    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Convert a coordinate to a flat index. `None` if out of bounds.
    #[inline]
    pub fn idx(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }

    /// Convert a flat index back to a coordinate.
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        Coord::new(idx as i32 / self.cols, idx as i32 % self.cols)
    }

    /// The cell kind at `c`. Out-of-bounds coordinates read as [`CellKind::Wall`].
    pub fn cell_at(&self, c: Coord) -> CellKind {
        match self.idx(c) {
            Some(i) => self.cells[i],
            None => CellKind::Wall,
        }
    }

    /// Whether `c` is in bounds and not a wall.
    #[inline]
    pub fn is_walkable(&self, c: Coord) -> bool {
        !self.cell_at(c).is_wall()
    }

    /// Append the walkable orthogonal neighbours of `c` to `buf`, in the
    /// [`Coord::neighbors4`] order. The caller clears `buf` beforehand.
    pub fn neighbors4(&self, c: Coord, buf: &mut Vec<Coord>) {
        for n in c.neighbors4() {
            if self.is_walkable(n) {
                buf.push(n);
            }
        }
    }
}
