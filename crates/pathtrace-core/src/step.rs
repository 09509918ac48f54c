//! The step-event vocabulary: [`StepEvent`], [`Trace`], [`Outcome`].
//!
//! A search run is fully described by its `Trace`: the ordered log of every
//! decision the algorithm made, materialized before playback begins. Traces
//! are immutable; playback seeks and reverses by re-reading the log, never
//! by re-running the algorithm.

use crate::geom::Coord;

/// One recorded search decision.
///
/// `Visit*` marks a cell dequeued and settled; `Explore*` marks a cell
/// newly added to the frontier. The `Start`/`End` suffixed variants tag
/// which wave of a bidirectional search produced the event. `Path` marks a
/// cell of the reconstructed solution. `Found` and `NotFound` are terminal
/// and always close a trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "cell", rename_all = "snake_case")
)]
pub enum StepEvent {
    Visit(Coord),
    VisitStart(Coord),
    VisitEnd(Coord),
    Explore(Coord),
    ExploreStart(Coord),
    ExploreEnd(Coord),
    Path(Coord),
    Found,
    NotFound,
}

impl StepEvent {
    /// The coordinate this event refers to, if any.
    #[inline]
    pub fn coord(self) -> Option<Coord> {
        match self {
            StepEvent::Visit(c)
            | StepEvent::VisitStart(c)
            | StepEvent::VisitEnd(c)
            | StepEvent::Explore(c)
            | StepEvent::ExploreStart(c)
            | StepEvent::ExploreEnd(c)
            | StepEvent::Path(c) => Some(c),
            StepEvent::Found | StepEvent::NotFound => None,
        }
    }

    /// Whether this event settles a cell.
    #[inline]
    pub fn is_visit(self) -> bool {
        matches!(
            self,
            StepEvent::Visit(_) | StepEvent::VisitStart(_) | StepEvent::VisitEnd(_)
        )
    }

    /// Whether this event adds a cell to a frontier.
    #[inline]
    pub fn is_explore(self) -> bool {
        matches!(
            self,
            StepEvent::Explore(_) | StepEvent::ExploreStart(_) | StepEvent::ExploreEnd(_)
        )
    }

    /// Whether this event terminates a trace.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, StepEvent::Found | StepEvent::NotFound)
    }
}

/// The terminal result of a search run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Found,
    NotFound,
}

/// An ordered, immutable log of [`StepEvent`]s from one search run.
///
/// Invariant: a trace contains exactly one terminal event and it is the
/// last one. The only way to build a trace is through
/// [`Recorder`](crate::recording::Recorder), which enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace {
    events: Vec<StepEvent>,
}

impl Trace {
    pub(crate) fn new(events: Vec<StepEvent>) -> Self {
        debug_assert!(
            events.last().is_some_and(|e| e.is_terminal()),
            "trace must end with a terminal event"
        );
        debug_assert!(
            events.iter().filter(|e| e.is_terminal()).count() == 1,
            "trace must contain exactly one terminal event"
        );
        Self { events }
    }

    /// Number of events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace has no events. Always false for a recorded trace.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event at `i`, if in range.
    #[inline]
    pub fn get(&self, i: usize) -> Option<StepEvent> {
        self.events.get(i).copied()
    }

    /// All events, in decision order.
    #[inline]
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Iterate over the events.
    pub fn iter(&self) -> impl Iterator<Item = StepEvent> + '_ {
        self.events.iter().copied()
    }

    /// The terminal outcome of the run.
    pub fn outcome(&self) -> Outcome {
        match self.events.last() {
            Some(StepEvent::Found) => Outcome::Found,
            _ => Outcome::NotFound,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Trace {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let events = Vec::<StepEvent>::deserialize(deserializer)?;
        if !events.last().is_some_and(|e| e.is_terminal())
            || events.iter().filter(|e| e.is_terminal()).count() != 1
        {
            return Err(serde::de::Error::custom(
                "trace must end with its single terminal event",
            ));
        }
        Ok(Self { events })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn event_tags_are_snake_case() {
        let json = serde_json::to_string(&StepEvent::VisitStart(Coord::new(2, 3))).unwrap();
        assert_eq!(json, r#"{"type":"visit_start","cell":{"row":2,"col":3}}"#);
        let json = serde_json::to_string(&StepEvent::NotFound).unwrap();
        assert_eq!(json, r#"{"type":"not_found"}"#);
    }

    #[test]
    fn trace_round_trip() {
        let t = Trace::new(vec![
            StepEvent::Visit(Coord::new(0, 0)),
            StepEvent::Explore(Coord::new(0, 1)),
            StepEvent::Found,
        ]);
        let json = serde_json::to_string(&t).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn trace_without_terminal_is_rejected() {
        let json = r#"[{"type":"visit","cell":{"row":0,"col":0}}]"#;
        assert!(serde_json::from_str::<Trace>(json).is_err());
    }

    #[test]
    fn trace_with_early_terminal_is_rejected() {
        let json = r#"[{"type":"found"},{"type":"found"}]"#;
        assert!(serde_json::from_str::<Trace>(json).is_err());
    }
}
