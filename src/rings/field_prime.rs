//! Objects representing prime fields.

use crate::rings::ring::{Semiring, Ring};


//  ---------------------------------------------------------
//  2   ELEMENT FIELD
//  ---------------------------------------------------------

/// The field with two elements, `{0, 1}` under addition mod 2 and
/// multiplication mod 2. Elements are represented as `bool` (`false` = 0,
/// `true` = 1); addition and subtraction both coincide with XOR.
#[derive(Debug, Clone)]
pub struct GF2{}

impl GF2 {
    /// Create a new instance of `GF2`.
    ///
    /// `GF2::new()` and `GF2{}` are equivalent; `new` exists so that `GF2`
    /// can be constructed with the same syntax as other ring objects that
    /// are harder to build directly.
    pub fn new() -> GF2 { GF2{} }
}

impl Semiring<bool> for GF2
{
    fn is_0( &self, x: bool ) -> bool { ! x         }
    fn is_1( &self, x: bool ) -> bool {   x.clone() }
    fn zero() -> bool { false }
    fn one()  -> bool { true  }

    fn add( &self, x : bool, y : bool ) -> bool { x ^ y }
    fn multiply( &self, x : bool, y: bool ) -> bool { x && y }
}

impl Ring<bool> for GF2
{
    fn subtract( &self, x : bool, y: bool ) -> bool { x ^ y }
    fn negate( &self, x : bool ) -> bool { x }  // additive inverse of x in Z/2 is x itself
}
