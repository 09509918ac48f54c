//! Error taxonomy for grid construction and search.
//!
//! Only configuration problems are errors: a malformed grid shape or an
//! endpoint that cannot take part in a search. "No path exists" is an
//! expected outcome and is reported as the `NotFound` trace event instead.

use std::fmt;

use thiserror::Error;

use crate::geom::Coord;

/// Which endpoint of a search a [`GridError::InvalidEndpoint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Errors raised before a search begins. Never raised mid-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid has zero rows or zero columns.
    #[error("grid has zero rows or columns")]
    EmptyGrid,

    /// A search endpoint is out of bounds or placed on a wall.
    #[error("{0} endpoint {1} is out of bounds or on a wall")]
    InvalidEndpoint(Endpoint, Coord),
}
