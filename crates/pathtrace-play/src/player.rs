//! The playback transport: [`Player`].
//!
//! A player replays a [`Trace`] under play / pause / step / reset / speed
//! controls. Timing is cooperative: the player never spawns a timer itself.
//! Instead [`play`](Player::play) and [`tick`](Player::tick) hand back a
//! [`TickHandle`] naming the delay until the next advance, and the embedding
//! event loop fires exactly one timer shot per handle:
//!
//! ```
//! # use std::rc::Rc;
//! # use pathtrace_core::Recorder;
//! # use pathtrace_play::Player;
//! # let mut rec = Recorder::new();
//! # rec.visit(pathtrace_core::Coord::ZERO);
//! # let trace = Rc::new(rec.finish_found());
//! let mut player = Player::new(trace);
//! let mut pending = player.play(None);
//! while let Some(handle) = pending {
//!     // sleep for handle.delay(), then:
//!     pending = player.tick(handle.token());
//! }
//! ```
//!
//! Every handle carries an epoch token minted when it was issued. `load`,
//! `play`, `pause`, and `reset` bump the epoch, so a tick that was already
//! in flight when the transport changed state is rejected instead of
//! double-driving the cursor — there is no timer left to forget to cancel,
//! and dropping the player orphans nothing.

use std::rc::Rc;
use std::time::Duration;

use pathtrace_core::{StepEvent, Trace};

/// Default tick period.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(30);

/// Transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Loaded, nothing applied yet.
    Idle,
    /// Ticks are advancing the cursor.
    Playing,
    /// Stopped mid-trace, cursor kept.
    Paused,
    /// The last event has been applied.
    Finished,
}

/// Opaque stamp tying a scheduled tick to the transport state that issued
/// it. A token from before the last transport change no longer matches and
/// its tick is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    epoch: u64,
}

/// One scheduled advance: fire a timer after `delay`, then call
/// [`Player::tick`] with the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    token: TickToken,
    delay: Duration,
}

impl TickHandle {
    /// The token to pass back to [`Player::tick`].
    #[inline]
    pub fn token(&self) -> TickToken {
        self.token
    }

    /// How long to wait before ticking.
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Replays a [`Trace`] under explicit transport control.
///
/// The trace is shared (`Rc`) and immutable — several players can replay
/// the same trace at different speeds. The mutable playback state belongs
/// to exactly one player.
pub struct Player {
    trace: Rc<Trace>,
    /// Number of events applied, `0..=trace.len()`. The current index is
    /// `applied - 1`; zero means "before the first event".
    applied: usize,
    status: Status,
    speed: Duration,
    epoch: u64,
}

impl Player {
    /// Create a player over `trace`, idle and before the first event.
    pub fn new(trace: Rc<Trace>) -> Self {
        Self {
            trace,
            applied: 0,
            status: Status::Idle,
            speed: DEFAULT_SPEED,
            epoch: 0,
        }
    }

    /// Replace the trace and rewind. Invalidates any pending tick.
    pub fn load(&mut self, trace: Rc<Trace>) {
        self.epoch += 1;
        self.trace = trace;
        self.applied = 0;
        self.status = Status::Idle;
    }

    /// The trace being replayed.
    #[inline]
    pub fn trace(&self) -> &Rc<Trace> {
        &self.trace
    }

    /// Transport state.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Tick period.
    #[inline]
    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Set the tick period, floored at one millisecond. Takes effect on the
    /// next issued handle.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed.max(Duration::from_millis(1));
    }

    /// Number of events in the trace.
    #[inline]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Whether the trace has no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Index of the last applied event, or `None` before the first.
    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// The last applied event, or `None` before the first.
    pub fn current_event(&self) -> Option<StepEvent> {
        self.trace.get(self.current_index()?)
    }

    /// Number of events applied so far.
    #[inline]
    pub fn applied(&self) -> usize {
        self.applied
    }

    fn handle(&self) -> TickHandle {
        TickHandle {
            token: TickToken { epoch: self.epoch },
            delay: self.speed,
        }
    }

    /// Start (or restart) playback.
    ///
    /// From `Idle` or `Finished` the cursor rewinds to the first event;
    /// from `Paused` it resumes in place. Calling `play` while already
    /// `Playing` reissues the schedule, which invalidates the previous one —
    /// two live timers can never drive the same cursor.
    ///
    /// Returns the first tick to schedule, or `None` if the trace is
    /// already exhausted.
    pub fn play(&mut self, speed: Option<Duration>) -> Option<TickHandle> {
        self.epoch += 1;
        if let Some(s) = speed {
            self.set_speed(s);
        }
        match self.status {
            Status::Idle | Status::Finished => {
                self.applied = if self.trace.is_empty() { 0 } else { 1 };
            }
            Status::Paused | Status::Playing => {}
        }
        log::trace!("play from {:?} at event {}/{}", self.status, self.applied, self.len());
        if self.applied >= self.trace.len() {
            self.status = Status::Finished;
            return None;
        }
        self.status = Status::Playing;
        Some(self.handle())
    }

    /// Apply one scheduled advance.
    ///
    /// A no-op returning `None` unless `token` is current and the player is
    /// still `Playing`; otherwise advances the cursor and returns the next
    /// tick to schedule, or `None` once the last event is applied and the
    /// player is `Finished`.
    pub fn tick(&mut self, token: TickToken) -> Option<TickHandle> {
        if token.epoch != self.epoch || self.status != Status::Playing {
            log::trace!("stale tick ignored");
            return None;
        }
        self.applied += 1;
        if self.applied >= self.trace.len() {
            self.applied = self.trace.len();
            self.status = Status::Finished;
            self.epoch += 1;
            return None;
        }
        Some(self.handle())
    }

    /// Stop advancing, keeping the cursor. Only valid while `Playing`.
    pub fn pause(&mut self) {
        if self.status == Status::Playing {
            self.epoch += 1;
            self.status = Status::Paused;
        }
    }

    /// Advance the cursor by one event. Only valid when not `Playing`;
    /// a no-op at the end of the trace.
    pub fn step_forward(&mut self) {
        if self.status == Status::Playing {
            return;
        }
        if self.applied < self.trace.len() {
            self.applied += 1;
            self.status = Status::Paused;
        }
    }

    /// Move the cursor back by one event. Only valid when not `Playing`;
    /// a no-op before the first event.
    pub fn step_back(&mut self) {
        if self.status == Status::Playing {
            return;
        }
        if self.applied > 0 {
            self.applied -= 1;
            self.status = Status::Paused;
        }
    }

    /// Rewind to before the first event. Invalidates any pending tick.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.applied = 0;
        self.status = Status::Idle;
    }
}
