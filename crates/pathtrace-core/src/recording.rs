//! Trace recording.
//!
//! [`Recorder`] is the append-only accumulator every search algorithm
//! writes through. Events are appended in the exact order decisions are
//! made and are never reordered or retracted; an algorithm that backtracks
//! records the backtrack as new forward events. Consuming the recorder
//! with one of the `finish_*` terminators is the only way to obtain a
//! [`Trace`], which is how the single-terminal-event invariant is kept.
//!
//! Each recorder owns all of its bookkeeping; two concurrent or repeated
//! runs never share state.

use std::collections::HashSet;

use crate::geom::Coord;
use crate::step::{StepEvent, Trace};

/// Append-only accumulator of [`StepEvent`]s for one search run.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<StepEvent>,
    settled: HashSet<Coord>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events recorded so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn settle(&mut self, c: Coord) {
        let first = self.settled.insert(c);
        debug_assert!(first, "cell {c} settled twice in one run");
    }

    /// Record a cell settled by a unidirectional search.
    pub fn visit(&mut self, c: Coord) {
        self.settle(c);
        self.events.push(StepEvent::Visit(c));
    }

    /// Record a cell settled by the forward wave of a bidirectional search.
    pub fn visit_start(&mut self, c: Coord) {
        self.settle(c);
        self.events.push(StepEvent::VisitStart(c));
    }

    /// Record a cell settled by the backward wave of a bidirectional search.
    pub fn visit_end(&mut self, c: Coord) {
        self.settle(c);
        self.events.push(StepEvent::VisitEnd(c));
    }

    /// Record a cell added to the frontier.
    pub fn explore(&mut self, c: Coord) {
        self.events.push(StepEvent::Explore(c));
    }

    /// Record a cell added to the forward frontier.
    pub fn explore_start(&mut self, c: Coord) {
        self.events.push(StepEvent::ExploreStart(c));
    }

    /// Record a cell added to the backward frontier.
    pub fn explore_end(&mut self, c: Coord) {
        self.events.push(StepEvent::ExploreEnd(c));
    }

    /// Record a cell of the reconstructed solution path.
    pub fn path(&mut self, c: Coord) {
        self.events.push(StepEvent::Path(c));
    }

    /// Close the log with `Found`.
    pub fn finish_found(mut self) -> Trace {
        self.events.push(StepEvent::Found);
        Trace::new(self.events)
    }

    /// Close the log with `NotFound`.
    pub fn finish_not_found(mut self) -> Trace {
        self.events.push(StepEvent::NotFound);
        Trace::new(self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_append_order() {
        let mut rec = Recorder::new();
        rec.visit(Coord::new(0, 0));
        rec.explore(Coord::new(0, 1));
        rec.visit(Coord::new(0, 1));
        rec.path(Coord::new(0, 0));
        rec.path(Coord::new(0, 1));
        let trace = rec.finish_found();

        assert_eq!(
            trace.events(),
            &[
                StepEvent::Visit(Coord::new(0, 0)),
                StepEvent::Explore(Coord::new(0, 1)),
                StepEvent::Visit(Coord::new(0, 1)),
                StepEvent::Path(Coord::new(0, 0)),
                StepEvent::Path(Coord::new(0, 1)),
                StepEvent::Found,
            ]
        );
    }

    #[test]
    fn not_found_closes_the_log() {
        let mut rec = Recorder::new();
        rec.visit(Coord::ZERO);
        let trace = rec.finish_not_found();
        assert_eq!(trace.events().last(), Some(&StepEvent::NotFound));
    }

    #[test]
    #[should_panic(expected = "settled twice")]
    fn duplicate_visit_is_a_bug() {
        let mut rec = Recorder::new();
        rec.visit(Coord::ZERO);
        rec.visit(Coord::ZERO);
    }

    #[test]
    #[should_panic(expected = "settled twice")]
    fn duplicate_visit_across_waves_is_a_bug() {
        let mut rec = Recorder::new();
        rec.visit_start(Coord::ZERO);
        rec.visit_end(Coord::ZERO);
    }
}
