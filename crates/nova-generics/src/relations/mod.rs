//! The binary relations between types: subtyping, type equality, containment, disjointness,
//! method-invocation conversion, assignment and casting.
//!
//! All relations are total: an [`crate::Type::Error`] on either side makes them hold, and
//! recursive pairs (F-bounded types) terminate through the context's in-progress sets.

mod cast;
mod containment;
mod conversion;
mod same_type;
mod subtype;

pub use conversion::{LintCategory, Warner};
