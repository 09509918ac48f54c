//! Renderer-facing projections of a trace prefix.
//!
//! The renderer never sees the raw trace; it is handed a [`RenderView`]
//! folded from the events applied so far, which grows monotonically as the
//! cursor advances and is recomputed exactly from any cursor position —
//! stepping back and forth always lands on the same view.

use std::collections::HashSet;

use pathtrace_core::{Coord, Outcome, StepEvent, Trace};

use crate::player::Player;

/// Everything a renderer needs to paint one playback position.
///
/// `explored` keeps cells after they settle; renderers paint `visited` on
/// top, and the solution `path` over both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderView {
    /// Cells settled so far, by either wave.
    pub visited: HashSet<Coord>,
    /// Cells added to a frontier so far.
    pub explored: HashSet<Coord>,
    /// Solution cells emitted so far, in start→end order.
    pub path: Vec<Coord>,
    /// The event at the cursor, if any has been applied.
    pub current: Option<StepEvent>,
    /// Set once a terminal event has been applied.
    pub outcome: Option<Outcome>,
}

impl RenderView {
    /// Fold the first `applied` events of `trace` into a view.
    pub fn fold(trace: &Trace, applied: usize) -> Self {
        let upto = applied.min(trace.len());
        let mut view = Self::default();
        for ev in trace.events()[..upto].iter().copied() {
            match ev {
                StepEvent::Visit(c) | StepEvent::VisitStart(c) | StepEvent::VisitEnd(c) => {
                    view.visited.insert(c);
                }
                StepEvent::Explore(c) | StepEvent::ExploreStart(c) | StepEvent::ExploreEnd(c) => {
                    view.explored.insert(c);
                }
                StepEvent::Path(c) => view.path.push(c),
                StepEvent::Found => view.outcome = Some(Outcome::Found),
                StepEvent::NotFound => view.outcome = Some(Outcome::NotFound),
            }
        }
        view.current = upto.checked_sub(1).and_then(|i| trace.get(i));
        view
    }
}

impl Player {
    /// The view at the current cursor position.
    pub fn snapshot(&self) -> RenderView {
        RenderView::fold(self.trace(), self.applied())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pathtrace_core::Recorder;

    use super::*;

    fn sample() -> Trace {
        let mut rec = Recorder::new();
        rec.visit(Coord::new(0, 0));
        rec.explore(Coord::new(0, 1));
        rec.explore(Coord::new(1, 0));
        rec.visit(Coord::new(0, 1));
        rec.path(Coord::new(0, 0));
        rec.path(Coord::new(0, 1));
        rec.finish_found()
    }

    #[test]
    fn empty_prefix_is_an_empty_view() {
        let view = RenderView::fold(&sample(), 0);
        assert!(view.visited.is_empty());
        assert!(view.explored.is_empty());
        assert!(view.path.is_empty());
        assert_eq!(view.current, None);
        assert_eq!(view.outcome, None);
    }

    #[test]
    fn views_grow_with_the_prefix() {
        let trace = sample();
        let mid = RenderView::fold(&trace, 4);
        assert_eq!(mid.visited.len(), 2);
        assert_eq!(mid.explored.len(), 2);
        assert!(mid.path.is_empty());
        assert_eq!(mid.current, Some(StepEvent::Visit(Coord::new(0, 1))));
        assert_eq!(mid.outcome, None);

        let full = RenderView::fold(&trace, trace.len());
        assert_eq!(full.path, vec![Coord::new(0, 0), Coord::new(0, 1)]);
        assert_eq!(full.outcome, Some(Outcome::Found));
        assert!(mid.visited.is_subset(&full.visited));
        assert!(mid.explored.is_subset(&full.explored));
    }

    #[test]
    fn over_long_prefix_is_clamped() {
        let trace = sample();
        assert_eq!(
            RenderView::fold(&trace, 100),
            RenderView::fold(&trace, trace.len())
        );
    }

    #[test]
    fn step_round_trip_restores_the_view() {
        let mut player = Player::new(Rc::new(sample()));
        player.step_forward();
        player.step_forward();
        player.step_forward();
        let before = player.snapshot();

        player.step_forward();
        player.step_back();
        assert_eq!(player.snapshot(), before);
    }

    #[test]
    fn replaying_a_real_search_run_end_to_end() {
        use pathtrace_core::GridModel;
        use pathtrace_search::SearchField;

        let grid = GridModel::open(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        let mut field = SearchField::for_grid(&grid);
        let trace = Rc::new(field.bfs(&grid, grid.start(), grid.end()).unwrap());

        let mut player = Player::new(Rc::clone(&trace));
        let mut pending = player.play(None);
        while let Some(handle) = pending {
            pending = player.tick(handle.token());
        }

        let view = player.snapshot();
        assert_eq!(view.outcome, Some(Outcome::Found));
        assert_eq!(view.path.first(), Some(&grid.start()));
        assert_eq!(view.path.last(), Some(&grid.end()));
        assert_eq!(view.path.len(), 5);
        // Every path cell was settled along the way.
        assert!(view.path.iter().all(|c| view.visited.contains(c)));
    }

    #[test]
    fn bidirectional_events_feed_the_same_sets() {
        let mut rec = Recorder::new();
        rec.visit_start(Coord::new(0, 0));
        rec.visit_end(Coord::new(2, 2));
        rec.explore_start(Coord::new(0, 1));
        rec.explore_end(Coord::new(2, 1));
        let trace = rec.finish_not_found();

        let view = RenderView::fold(&trace, trace.len());
        assert!(view.visited.contains(&Coord::new(0, 0)));
        assert!(view.visited.contains(&Coord::new(2, 2)));
        assert!(view.explored.contains(&Coord::new(0, 1)));
        assert!(view.explored.contains(&Coord::new(2, 1)));
        assert_eq!(view.outcome, Some(Outcome::NotFound));
    }
}
