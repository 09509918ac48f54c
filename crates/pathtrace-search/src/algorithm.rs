//! Algorithm identifiers and dispatch.
//!
//! [`Algorithm`] is the value the grid editor hands over together with a
//! [`GridModel`]; [`Algorithm::run`] turns the pair into a [`Trace`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use pathtrace_core::{GridError, GridModel, Trace};

use crate::SearchField;

/// One of the seven search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
    Greedy,
    Bidirectional,
    Jps,
}

/// Raised when parsing an unknown algorithm identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl Algorithm {
    /// Every strategy, in menu order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Astar,
        Algorithm::Greedy,
        Algorithm::Bidirectional,
        Algorithm::Jps,
    ];

    /// Stable identifier used for selection and parsing.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
            Algorithm::Greedy => "greedy",
            Algorithm::Bidirectional => "bidirectional",
            Algorithm::Jps => "jps",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Astar => "A* Search",
            Algorithm::Greedy => "Greedy Best-First Search",
            Algorithm::Bidirectional => "Bidirectional BFS",
            Algorithm::Jps => "Jump Point Search",
        }
    }

    /// Whether the strategy guarantees a shortest path on uniform-cost grids.
    pub fn optimal(self) -> bool {
        !matches!(self, Algorithm::Dfs | Algorithm::Greedy)
    }

    /// Run this strategy between the grid's own endpoints.
    pub fn run(self, field: &mut SearchField, grid: &GridModel) -> Result<Trace, GridError> {
        let (from, to) = (grid.start(), grid.end());
        let trace = match self {
            Algorithm::Bfs => field.bfs(grid, from, to),
            Algorithm::Dfs => field.dfs(grid, from, to),
            Algorithm::Dijkstra => field.dijkstra(grid, from, to),
            Algorithm::Astar => field.astar(grid, from, to),
            Algorithm::Greedy => field.greedy(grid, from, to),
            Algorithm::Bidirectional => field.bidirectional(grid, from, to),
            Algorithm::Jps => field.jps(grid, from, to),
        }?;
        log::debug!(
            "{}: {} events, {:?} on {}x{} grid",
            self.name(),
            trace.len(),
            trace.outcome(),
            grid.rows(),
            grid.cols(),
        );
        Ok(trace)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pathtrace_core::{Coord, Outcome, StepEvent};

    use super::*;

    fn path_of(trace: &Trace) -> Vec<Coord> {
        trace
            .iter()
            .filter_map(|e| match e {
                StepEvent::Path(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// 5x5 grid with a solid wall column at col 2 except a gap at row 2.
    fn gapped_wall_grid() -> GridModel {
        GridModel::from_fn(5, 5, Coord::new(0, 0), Coord::new(4, 4), |c| {
            c.col == 2 && c.row != 2
        })
        .unwrap()
    }

    #[test]
    fn names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>(), Ok(algo));
        }
        assert_eq!(
            "best".parse::<Algorithm>(),
            Err(UnknownAlgorithm("best".into()))
        );
    }

    #[test]
    fn optimality_flags() {
        assert!(Algorithm::Bfs.optimal());
        assert!(Algorithm::Jps.optimal());
        assert!(!Algorithm::Dfs.optimal());
        assert!(!Algorithm::Greedy.optimal());
    }

    #[test]
    fn traces_are_deterministic() {
        let grid = gapped_wall_grid();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL {
            let a = algo.run(&mut field, &grid).unwrap();
            let b = algo.run(&mut field, &grid).unwrap();
            assert_eq!(a, b, "{algo} is not deterministic");
        }
    }

    #[test]
    fn optimal_family_routes_through_the_gap() {
        let grid = gapped_wall_grid();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL.into_iter().filter(|a| a.optimal()) {
            let trace = algo.run(&mut field, &grid).unwrap();
            assert_eq!(trace.outcome(), Outcome::Found, "{algo}");
            let path = path_of(&trace);
            // 8 moves = 9 cells, forced through the single gap.
            assert_eq!(path.len(), 9, "{algo} path is not shortest");
            assert!(path.contains(&Coord::new(2, 2)), "{algo} skipped the gap");
        }
    }

    #[test]
    fn closing_the_gap_yields_not_found_for_every_strategy() {
        let grid =
            GridModel::from_fn(5, 5, Coord::new(0, 0), Coord::new(4, 4), |c| c.col == 2).unwrap();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL {
            let trace = algo.run(&mut field, &grid).unwrap();
            assert_eq!(trace.outcome(), Outcome::NotFound, "{algo}");
            assert!(
                trace.iter().all(|e| !matches!(e, StepEvent::Path(_))),
                "{algo} emitted path events without a path"
            );
        }
    }

    #[test]
    fn empty_3x3_shortest_length_is_four_moves() {
        let grid = GridModel::open(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL.into_iter().filter(|a| a.optimal()) {
            let trace = algo.run(&mut field, &grid).unwrap();
            assert_eq!(path_of(&trace).len(), 5, "{algo}");
        }
    }

    #[test]
    fn every_strategy_emits_one_terminal_event_last() {
        let grid = gapped_wall_grid();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL {
            let trace = algo.run(&mut field, &grid).unwrap();
            let terminals = trace.iter().filter(|e| e.is_terminal()).count();
            assert_eq!(terminals, 1, "{algo}");
            assert!(trace.events().last().is_some_and(|e| e.is_terminal()));
        }
    }

    #[test]
    fn paths_are_contiguous_walkable_chains() {
        let grid = gapped_wall_grid();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL {
            let trace = algo.run(&mut field, &grid).unwrap();
            let path = path_of(&trace);
            assert_eq!(path.first(), Some(&grid.start()), "{algo}");
            assert_eq!(path.last(), Some(&grid.end()), "{algo}");
            let unique: std::collections::HashSet<Coord> = path.iter().copied().collect();
            assert_eq!(unique.len(), path.len(), "{algo} repeats a cell");
            for w in path.windows(2) {
                assert_eq!(
                    (w[1].row - w[0].row).abs() + (w[1].col - w[0].col).abs(),
                    1,
                    "{algo} path is not contiguous"
                );
                assert!(grid.is_walkable(w[1]), "{algo} walked through a wall");
            }
        }
    }

    #[test]
    fn invalid_endpoint_is_an_error_for_every_strategy() {
        let grid =
            GridModel::from_fn(3, 3, Coord::new(0, 0), Coord::new(2, 2), |c| c == Coord::new(1, 1))
                .unwrap();
        let mut field = SearchField::for_grid(&grid);
        for algo in Algorithm::ALL {
            let run = |f: &mut SearchField, from, to| match algo {
                Algorithm::Bfs => f.bfs(&grid, from, to),
                Algorithm::Dfs => f.dfs(&grid, from, to),
                Algorithm::Dijkstra => f.dijkstra(&grid, from, to),
                Algorithm::Astar => f.astar(&grid, from, to),
                Algorithm::Greedy => f.greedy(&grid, from, to),
                Algorithm::Bidirectional => f.bidirectional(&grid, from, to),
                Algorithm::Jps => f.jps(&grid, from, to),
            };
            assert!(run(&mut field, Coord::new(1, 1), grid.end()).is_err(), "{algo}");
            assert!(run(&mut field, grid.start(), Coord::new(9, 9)).is_err(), "{algo}");
        }
    }
}
