//! Jump Point Search on 4-connected uniform-cost grids.
//!
//! Instead of stepping one cell at a time, the search jumps along straight
//! runs and only adds *jump points* to the frontier: the goal, or cells with
//! a forced neighbour — a perpendicular cell that is walkable while the cell
//! behind it (relative to the run) is not, so no shorter path could reach it
//! without passing through the run. Horizontal runs additionally probe a
//! vertical jump from every cell they cross, which is how turns in open
//! space are discovered without diagonal movement.

use std::collections::BinaryHeap;

use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;
use crate::distance::manhattan;
use crate::field::OpenRef;

const UP: Coord = Coord::new(-1, 0);
const RIGHT: Coord = Coord::new(0, 1);
const DOWN: Coord = Coord::new(1, 0);
const LEFT: Coord = Coord::new(0, -1);

impl SearchField {
    /// Jump Point Search.
    ///
    /// Path length is identical to [`astar`](Self::astar) on uniform-cost
    /// 4-connected grids; the frontier is much smaller on open terrain.
    pub fn jps(&mut self, grid: &GridModel, from: Coord, to: Coord) -> Result<Trace, GridError> {
        let (cur_gen, start_idx, goal_idx) = self.begin_run(grid, from, to)?;
        if from == to {
            return Ok(self.record_trivial(from));
        }
        let mut rec = Recorder::new();

        let start_h = manhattan(from, to);
        {
            let n = &mut self.nodes[start_idx];
            n.g = 0;
            n.f = start_h;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        let seq = self.next_seq();
        open.push(OpenRef {
            idx: start_idx,
            f: start_h,
            h: start_h,
            seq,
        });

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };
            let ci = current.idx;
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }
            self.nodes[ci].open = false;

            let cp = grid.coord(ci);
            rec.visit(cp);
            if ci == goal_idx {
                break 'search true;
            }
            let current_g = self.nodes[ci].g;

            let dirs = if self.nodes[ci].parent == usize::MAX {
                vec![UP, RIGHT, DOWN, LEFT]
            } else {
                pruned_dirs(grid, cp, grid.coord(self.nodes[ci].parent))
            };

            for dir in dirs {
                let Some((jp, dist)) = jump(grid, cp, dir, to) else {
                    continue;
                };
                let Some(ji) = grid.idx(jp) else {
                    continue;
                };
                let tentative = current_g + dist;
                let jn = &mut self.nodes[ji];
                if jn.generation == cur_gen && tentative >= jn.g {
                    continue;
                }

                let h = manhattan(jp, to);
                jn.generation = cur_gen;
                jn.g = tentative;
                jn.f = tentative + h;
                jn.parent = ci;
                jn.open = true;

                let seq = self.next_seq();
                open.push(OpenRef {
                    idx: ji,
                    f: tentative + h,
                    h,
                    seq,
                });
                rec.explore(jp);
            }
        };

        if !found {
            return Ok(rec.finish_not_found());
        }

        // Reconstruct the jump-point chain, then interpolate the straight
        // runs back to unit steps for the path events.
        let mut jp_chain = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            jp_chain.push(grid.coord(ci));
            ci = self.nodes[ci].parent;
        }
        jp_chain.reverse();
        for c in interpolate(&jp_chain) {
            rec.path(c);
        }
        Ok(rec.finish_found())
    }
}

/// Successor directions from `p` given the straight run that reached it.
///
/// Travelling along a row keeps the run direction plus the two column
/// directions; travelling along a column keeps the run direction plus the
/// two row directions. Unwalkable candidates are dropped here so the jump
/// calls start on open ground.
fn pruned_dirs(grid: &GridModel, p: Coord, parent: Coord) -> Vec<Coord> {
    let d = Coord::new((p.row - parent.row).signum(), (p.col - parent.col).signum());
    let candidates = if d.col != 0 {
        [d, UP, DOWN]
    } else {
        [d, RIGHT, LEFT]
    };
    candidates
        .into_iter()
        .filter(|&c| grid.is_walkable(p + c))
        .collect()
}

/// Jump from `p` along `dir` until the goal, a forced neighbour, or a wall.
///
/// Returns the jump point and its distance from `p`, or `None` if the run
/// dead-ends.
fn jump(grid: &GridModel, p: Coord, dir: Coord, goal: Coord) -> Option<(Coord, i32)> {
    let mut n = p + dir;
    let mut dist = 1;
    loop {
        if !grid.is_walkable(n) {
            return None;
        }
        if n == goal {
            return Some((n, dist));
        }

        if dir.col != 0 {
            // Horizontal run: stop for a forced neighbour above or below,
            // or when a vertical jump from this cell would succeed.
            if (grid.is_walkable(n + UP) && !grid.is_walkable(n - dir + UP))
                || (grid.is_walkable(n + DOWN) && !grid.is_walkable(n - dir + DOWN))
            {
                return Some((n, dist));
            }
            if jump(grid, n, UP, goal).is_some() || jump(grid, n, DOWN, goal).is_some() {
                return Some((n, dist));
            }
        } else {
            // Vertical run: forced neighbours only.
            if (grid.is_walkable(n + LEFT) && !grid.is_walkable(n - dir + LEFT))
                || (grid.is_walkable(n + RIGHT) && !grid.is_walkable(n - dir + RIGHT))
            {
                return Some((n, dist));
            }
        }

        n = n + dir;
        dist += 1;
    }
}

/// Expand a jump-point chain into unit steps, endpoints included.
fn interpolate(jp_chain: &[Coord]) -> Vec<Coord> {
    let mut out = Vec::new();
    let Some((&last, rest)) = jp_chain.split_last() else {
        return out;
    };
    for (i, &a) in rest.iter().enumerate() {
        let b = jp_chain[i + 1];
        let step = Coord::new((b.row - a.row).signum(), (b.col - a.col).signum());
        let mut c = a;
        while c != b {
            out.push(c);
            c = c + step;
        }
    }
    out.push(last);
    out
}
