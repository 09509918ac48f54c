use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;

impl SearchField {
    /// Depth-first search.
    ///
    /// LIFO frontier; carries no shortest-path guarantee and exists to
    /// demonstrate non-optimality. Neighbours are pushed in reverse order so
    /// the stack pops them in the shared up, right, down, left preference.
    pub fn dfs(&mut self, grid: &GridModel, from: Coord, to: Coord) -> Result<Trace, GridError> {
        let (cur_gen, start_idx, goal_idx) = self.begin_run(grid, from, to)?;
        if from == to {
            return Ok(self.record_trivial(from));
        }
        let mut rec = Recorder::new();

        {
            let n = &mut self.nodes[start_idx];
            n.parent = usize::MAX;
            n.generation = cur_gen;
        }
        let mut stack: Vec<usize> = vec![start_idx];

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(ci) = stack.pop() else {
                break 'search false;
            };
            let cp = grid.coord(ci);
            rec.visit(cp);
            if ci == goal_idx {
                break 'search true;
            }

            nbuf.clear();
            grid.neighbors4(cp, &mut nbuf);
            for &np in nbuf.iter().rev() {
                let Some(ni) = grid.idx(np) else {
                    continue;
                };
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.generation = cur_gen;
                n.parent = ci;
                rec.explore(np);
                stack.push(ni);
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
