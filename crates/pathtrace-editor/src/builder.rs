//! Grid editing between runs.
//!
//! Search runs read an immutable [`GridModel`]; every edit — painting or
//! erasing walls, relocating an endpoint, scattering a random maze — happens
//! here and produces a fresh model via [`GridBuilder::build`].

use rand::Rng;
use rand::RngExt;

use pathtrace_core::{CellKind, Coord, GridError, GridModel};

/// Mutable staging area for grid edits.
///
/// All paint operations are chainable and tolerant: out-of-bounds
/// coordinates and attempts to paint over an endpoint are ignored, the way
/// a drag-to-draw editor ignores strokes that leave the canvas. Validation
/// happens once, in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct GridBuilder {
    rows: i32,
    cols: i32,
    walls: Vec<bool>,
    start: Coord,
    end: Coord,
}

impl GridBuilder {
    /// An open grid with the start in the top-left corner and the end in
    /// the bottom-right.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            walls: vec![false; (rows.max(0) * cols.max(0)) as usize],
            start: Coord::ZERO,
            end: Coord::new(rows - 1, cols - 1),
        }
    }

    /// Start editing from an existing model.
    pub fn from_model(model: &GridModel) -> Self {
        let mut walls = vec![false; model.len()];
        for (i, w) in walls.iter_mut().enumerate() {
            *w = model.cell_at(model.coord(i)) == CellKind::Wall;
        }
        Self {
            rows: model.rows(),
            cols: model.cols(),
            walls,
            start: model.start(),
            end: model.end(),
        }
    }

    fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }

    /// Paint a wall. Ignored on endpoints and out of bounds.
    pub fn wall(&mut self, c: Coord) -> &mut Self {
        if c != self.start && c != self.end {
            if let Some(i) = self.idx(c) {
                self.walls[i] = true;
            }
        }
        self
    }

    /// Erase a wall.
    pub fn erase(&mut self, c: Coord) -> &mut Self {
        if let Some(i) = self.idx(c) {
            self.walls[i] = false;
        }
        self
    }

    /// Relocate the start marker, clearing any wall underneath.
    pub fn start(&mut self, c: Coord) -> &mut Self {
        if let Some(i) = self.idx(c) {
            self.walls[i] = false;
            self.start = c;
        }
        self
    }

    /// Relocate the end marker, clearing any wall underneath.
    pub fn end(&mut self, c: Coord) -> &mut Self {
        if let Some(i) = self.idx(c) {
            self.walls[i] = false;
            self.end = c;
        }
        self
    }

    /// Remove every wall, keeping the endpoints where they are.
    pub fn clear_walls(&mut self) -> &mut Self {
        self.walls.fill(false);
        self
    }

    /// Scatter random walls over the grid.
    ///
    /// Each cell becomes a wall with probability `density`, then a one-cell
    /// ring around each endpoint is cleared so neither can be sealed in
    /// place. Seed `rng` for reproducible mazes.
    pub fn scatter_walls(&mut self, rng: &mut impl Rng, density: f64) -> &mut Self {
        for w in self.walls.iter_mut() {
            *w = rng.random_bool(density.clamp(0.0, 1.0));
        }
        for anchor in [self.start, self.end] {
            for drow in -1..=1 {
                for dcol in -1..=1 {
                    if let Some(i) = self.idx(anchor.shift(drow, dcol)) {
                        self.walls[i] = false;
                    }
                }
            }
        }
        self
    }

    /// Validate and produce the immutable model for the next run.
    pub fn build(&self) -> Result<GridModel, GridError> {
        let walls = &self.walls;
        let cols = self.cols;
        GridModel::from_fn(self.rows, cols, self.start, self.end, |c| {
            walls[(c.row * cols + c.col) as usize]
        })
    }
}
