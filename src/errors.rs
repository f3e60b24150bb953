//! Error types returned by the simplex tree and boundary-matrix store.
//!
//! Every variant here corresponds to a local failure: the operation that
//! raised it is abandoned and the data structures are left exactly as they
//! were before the call. None of these are fatal to the process -- callers
//! are expected to report or ignore them and keep going.

use thiserror::Error;

/// Errors produced by [`crate::simplex_tree::SimplexTree`] and
/// [`crate::boundary_store::BoundaryStore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimplicialError {
    /// `insert_one` was called on a simplex whose immediate parent simplex
    /// (the sequence with its last vertex removed) is not already present.
    #[error("simplex has no parent in the tree; insert its faces first (or use insert_closed)")]
    MissingFace,

    /// `remove` was called with an empty simplex.
    #[error("the empty simplex cannot be removed")]
    EmptySimplex,

    /// A query (`remove`, `facets`, `cofaces`, boundary `get`) targeted a
    /// simplex or dimension that is not in the complex.
    #[error("simplex or dimension is not present in the complex")]
    NotPresent,

    /// `elementary_collapse` found no facet whose unique coface is the
    /// target simplex.
    #[error("simplex is not collapsible: no facet has it as a unique coface")]
    NotCollapsible,

    /// `add_simplices` was called for dimension `p > 0` before any
    /// `(p-1)`-simplices were registered.
    #[error("no boundary matrix exists for the preceding dimension")]
    MissingLowerDimension,

    /// The facet relations produced by a batch of simplices did not match
    /// the expected boundary-matrix shape (a facet of one of the simplices
    /// is missing from the lower-dimensional index map).
    #[error("boundary matrix dimension mismatch; check the simplex list for gaps")]
    DimensionMismatch,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimplicialError>;
