//! Rings and semirings.
//!
//! Arithmetic in this crate is routed through a ring object rather than a
//! bare operator, so that the Z/2 reducer's "add" step reads as a named
//! ring operation (`ring.add(a, b)`) instead of a raw XOR. There is only
//! one coefficient ring in scope here -- [`field_prime::GF2`] -- but the
//! trait split (`Semiring`/`Ring`) is kept because it is how this
//! arithmetic is expressed throughout the rest of the module.

pub mod ring;
pub mod field_prime;
