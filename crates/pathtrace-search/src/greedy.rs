use std::collections::BinaryHeap;

use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;
use crate::distance::manhattan;
use crate::field::OpenRef;

impl SearchField {
    /// Greedy best-first search.
    ///
    /// Priority frontier keyed by the heuristic alone. Fast, complete on
    /// finite grids, and deliberately not optimal — the counterpart to
    /// [`astar`](Self::astar) in the A*-versus-greedy trade-off.
    pub fn greedy(&mut self, grid: &GridModel, from: Coord, to: Coord) -> Result<Trace, GridError> {
        let (cur_gen, start_idx, goal_idx) = self.begin_run(grid, from, to)?;
        if from == to {
            return Ok(self.record_trivial(from));
        }
        let mut rec = Recorder::new();

        let start_h = manhattan(from, to);
        {
            let n = &mut self.nodes[start_idx];
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

            nbuf.clear();
            grid.neighbors4(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = grid.idx(np) else {
                    continue;
                };
                // A cell is pushed at most once: h never improves.
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }

                let h = manhattan(np, to);
                let n = &mut self.nodes[ni];
                n.generation = cur_gen;
                n.f = h;
                n.parent = ci;
                n.open = true;

                let seq = self.next_seq();
                open.push(OpenRef {
                    idx: ni,
                    f: h,
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
