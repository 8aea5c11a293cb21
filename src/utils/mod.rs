/*!
# Utilities

Provides a variety of utility traits/structs such as
- [`SlicedBuffer`]: the internal representation of [`CsrGraph`](crate::repr::CsrGraph),
- [`BitSet`]: the fixed-size bitset behind [`NodeBitSet`](crate::node::NodeBitSet),
- [`GeometricJumper`](self::geometric::GeometricJumper): the sampler for [`G(n,p)`](crate::gens::Gnp) graphs,
- [`Probability`]: validity checks for probabilities.

You probably do not need to interact with this module directly.
*/

use num::{One, Zero};

mod bitset;
pub mod geometric;
mod sliced_buffer;

pub use bitset::BitSet;
pub use sliced_buffer::SlicedBuffer;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probility(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probility(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}
