//! Traits for semirings and rings.

//  ---------------------------------------------------------------------------
//  DESIGN NOTES
//  ---------------------------------------------------------------------------

//  * Advantage of this nested structure: makes it straightforward to define matrix multipication
//  over semirings.
//
//  * Reason for deprecating the function "field name" that tells you the underlying mathematical
//  field:
//  in general, you always know what struct you're working with; so it suffices to describe the
//  mathematical object underlying the struct in the struct's documentation

use auto_impl::auto_impl;


//  ---------------------------------------------------------------------------
//  THE SEMIRING TRAIT
//  ---------------------------------------------------------------------------

/// Basic operations for semirings.
#[auto_impl(&)] // auto-implement this trait on references to objects that implement the trait
pub trait Semiring < Element > {

    // IDENTITY ELEMENTS

    /// Return the additive identity.
    fn is_0( &self, x : Element ) -> bool;

    /// Return the multiplicative identity.
    fn is_1( &self, x : Element ) -> bool;

    /// Return the additive identity.
    fn zero() -> Element;

    /// Return the multiplicative identity.
    fn one() -> Element;

    // OPERATIONS

    /// Add
    fn add( &self, x : Element, y : Element ) -> Element;

    /// Multiply
    fn multiply( &self, x : Element, y: Element ) -> Element;

}


//  ---------------------------------------------------------------------------
//  THE RING TRAIT
//  ---------------------------------------------------------------------------

/// Basic operations for **unital** rings.
pub trait Ring <Element> : Semiring < Element > {

    /// Subtract y from x.
    fn subtract( &self, x : Element, y: Element ) -> Element;

    /// Reverse the sign of x.
    fn negate( &self, x : Element ) -> Element;

}
