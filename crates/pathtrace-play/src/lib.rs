//! **pathtrace-play** — Trace playback.
//!
//! A generic, algorithm-agnostic transport for replaying recorded
//! [`Trace`](pathtrace_core::Trace)s: the [`Player`] state machine with
//! play / pause / step / reset / speed controls and stale-tick rejection,
//! plus the [`RenderView`] projection handed to renderers.

mod player;
mod projection;

pub use player::{DEFAULT_SPEED, Player, Status, TickHandle, TickToken};
pub use projection::RenderView;
