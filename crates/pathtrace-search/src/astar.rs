use std::collections::BinaryHeap;

use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;
use crate::distance::manhattan;
use crate::field::{OpenRef, UNREACHABLE, step_cost};

impl SearchField {
    /// A* search.
    ///
    /// Priority frontier keyed by `f = g + h` with the Manhattan heuristic,
    /// which is admissible and consistent for 4-connected movement. Ties are
    /// broken by lower `h` so the frontier leans toward the goal, then by
    /// insertion order.
    pub fn astar(&mut self, grid: &GridModel, from: Coord, to: Coord) -> Result<Trace, GridError> {
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

        let mut nbuf = std::mem::take(&mut self.nbuf);

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

            nbuf.clear();
            grid.neighbors4(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = grid.idx(np) else {
                    continue;
                };
                let tentative = current_g + step_cost(grid, cp, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                let h = manhattan(np, to);
                n.g = tentative;
                n.f = tentative + h;
                n.parent = ci;
                n.open = true;

                let seq = self.next_seq();
                open.push(OpenRef {
                    idx: ni,
                    f: tentative + h,
                    h,
                    seq,
                });
                rec.explore(np);
            }
        };

        self.nbuf = nbuf;

        if !found {
            return Ok(rec.finish_not_found());
        }
        self.emit_path(grid, &mut rec, goal_idx);
        Ok(rec.finish_found())
    }
}

#[cfg(test)]
mod tests {
    use pathtrace_core::{Outcome, StepEvent};

    use super::*;

    fn path_len(trace: &Trace) -> usize {
        trace
            .iter()
            .filter(|e| matches!(e, StepEvent::Path(_)))
            .count()
    }

    fn visit_count(trace: &Trace) -> usize {
        trace.iter().filter(|e| e.is_visit()).count()
    }

    #[test]
    fn optimal_on_empty_grid() {
        let grid = GridModel::open(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.astar(&grid, grid.start(), grid.end()).unwrap();

        assert_eq!(trace.outcome(), Outcome::Found);
        // 4 moves = 5 path cells.
        assert_eq!(path_len(&trace), 5);
    }

    #[test]
    fn settles_no_more_cells_than_dijkstra() {
        let grid = GridModel::from_fn(6, 8, Coord::new(0, 0), Coord::new(5, 7), |c| {
            c.col == 3 && c.row < 5
        })
        .unwrap();
        let mut field = SearchField::for_grid(&grid);

        let astar = field.astar(&grid, grid.start(), grid.end()).unwrap();
        let dij = field.dijkstra(&grid, grid.start(), grid.end()).unwrap();

        assert_eq!(path_len(&astar), path_len(&dij));
        assert!(visit_count(&astar) <= visit_count(&dij));
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let grid = GridModel::from_fn(3, 3, Coord::new(0, 0), Coord::new(0, 2), |c| c.col == 1)
            .unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.astar(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(trace.outcome(), Outcome::NotFound);
    }
}
