//! **pathtrace-core** — Grid model, step events, and trace recording.
//!
//! This crate provides the foundational types shared across the *pathtrace*
//! workspace: grid coordinates, the obstacle-grid model handed to search
//! algorithms, the step-event vocabulary, and the append-only recorder that
//! turns a search run into an immutable, replayable [`Trace`].

pub mod error;
pub mod geom;
pub mod model;
pub mod recording;
pub mod step;

pub use error::{Endpoint, GridError};
pub use geom::Coord;
pub use model::{CellKind, GridModel};
pub use recording::Recorder;
pub use step::{Outcome, StepEvent, Trace};
