use std::collections::BinaryHeap;

use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;
use crate::field::{OpenRef, UNREACHABLE, step_cost};

impl SearchField {
    /// Dijkstra's algorithm.
    ///
    /// Priority frontier keyed by cumulative path cost from the start.
    /// Settling order is non-decreasing cost, so the reconstructed path is
    /// optimal even for non-uniform step costs.
    pub fn dijkstra(
        &mut self,
        grid: &GridModel,
        from: Coord,
        to: Coord,
    ) -> Result<Trace, GridError> {
        let (cur_gen, start_idx, goal_idx) = self.begin_run(grid, from, to)?;
        if from == to {
            return Ok(self.record_trivial(from));
        }
        let mut rec = Recorder::new();

        {
            let n = &mut self.nodes[start_idx];
            n.g = 0;
            n.f = 0;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        let seq = self.next_seq();
        open.push(OpenRef {
            idx: start_idx,
            f: 0,
            h: 0,
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

                n.g = tentative;
                n.f = tentative;
                n.parent = ci;
                n.open = true;

                let seq = self.next_seq();
                open.push(OpenRef {
                    idx: ni,
                    f: tentative,
                    h: 0,
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

    #[test]
    fn matches_bfs_length_on_uniform_grid() {
        let grid = GridModel::from_fn(5, 5, Coord::new(0, 0), Coord::new(4, 4), |c| {
            c.col == 2 && c.row != 2
        })
        .unwrap();
        let mut field = SearchField::for_grid(&grid);

        let dij = field.dijkstra(&grid, grid.start(), grid.end()).unwrap();
        let bfs = field.bfs(&grid, grid.start(), grid.end()).unwrap();

        assert_eq!(dij.outcome(), Outcome::Found);
        assert_eq!(path_len(&dij), path_len(&bfs));
    }

    #[test]
    fn settling_order_is_non_decreasing_cost() {
        let grid = GridModel::open(4, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.dijkstra(&grid, grid.start(), grid.end()).unwrap();

        let start = grid.start();
        let mut last = 0;
        for e in trace.iter() {
            if let StepEvent::Visit(c) = e {
                let cost = (c.row - start.row).abs() + (c.col - start.col).abs();
                assert!(cost >= last, "settled {c} out of cost order");
                last = cost;
            }
        }
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let grid = GridModel::from_fn(3, 3, Coord::new(0, 0), Coord::new(0, 2), |c| c.col == 1)
            .unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.dijkstra(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(trace.outcome(), Outcome::NotFound);
    }
}
