//! **pathtrace-editor** — Grid editing operations.
//!
//! The edit surface that feeds the search engine: a [`GridBuilder`] staging
//! area for wall painting, endpoint relocation, and random maze scattering,
//! producing a fresh immutable [`GridModel`](pathtrace_core::GridModel) per
//! run.

mod builder;

pub use builder::GridBuilder;
