use std::collections::VecDeque;

use pathtrace_core::{Coord, GridError, GridModel, Recorder, Trace};

use crate::SearchField;

impl SearchField {
    /// Breadth-first search.
    ///
    /// FIFO frontier over 4-connected neighbours. The first time the goal is
    /// dequeued the reconstructed path is shortest by edge count.
    pub fn bfs(&mut self, grid: &GridModel, from: Coord, to: Coord) -> Result<Trace, GridError> {
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
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(ci) = queue.pop_front() else {
                break 'search false;
            };
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
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.generation = cur_gen;
                n.parent = ci;
                rec.explore(np);
                queue.push_back(ni);
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

    #[test]
    fn straight_corridor() {
        let grid = GridModel::open(1, 4, Coord::new(0, 0), Coord::new(0, 3)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.bfs(&grid, grid.start(), grid.end()).unwrap();

        assert_eq!(trace.outcome(), Outcome::Found);
        let path: Vec<Coord> = trace
            .iter()
            .filter_map(|e| match e {
                StepEvent::Path(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(
            path,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(0, 3),
            ]
        );
    }

    #[test]
    fn first_event_settles_the_start() {
        let grid = GridModel::open(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.bfs(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(trace.get(0), Some(StepEvent::Visit(Coord::new(0, 0))));
    }

    #[test]
    fn explores_before_visiting() {
        let grid = GridModel::open(2, 2, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.bfs(&grid, grid.start(), grid.end()).unwrap();

        // (0, 1) must be explored before it is visited.
        let explore = trace
            .iter()
            .position(|e| e == StepEvent::Explore(Coord::new(0, 1)))
            .unwrap();
        let visit = trace
            .iter()
            .position(|e| e == StepEvent::Visit(Coord::new(0, 1)))
            .unwrap();
        assert!(explore < visit);
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let grid = GridModel::from_fn(3, 3, Coord::new(0, 0), Coord::new(0, 2), |c| c.col == 1)
            .unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.bfs(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(trace.outcome(), Outcome::NotFound);
        assert!(trace.iter().all(|e| !matches!(e, StepEvent::Path(_))));
    }

    #[test]
    fn start_equals_goal() {
        let grid = GridModel::open(2, 2, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = field.bfs(&grid, Coord::new(0, 0), Coord::new(0, 0)).unwrap();
        assert_eq!(
            trace.events(),
            &[
                StepEvent::Visit(Coord::new(0, 0)),
                StepEvent::Path(Coord::new(0, 0)),
                StepEvent::Found,
            ]
        );
    }

    #[test]
    fn invalid_endpoints_fail_before_recording() {
        let grid = GridModel::open(2, 2, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        assert!(field.bfs(&grid, Coord::new(5, 5), grid.end()).is_err());
    }
}
