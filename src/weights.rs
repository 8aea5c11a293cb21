/*!
# Weight Functions

Weights are attached to vertex or edge *indices*. A [`WeightFunction`] maps an index to a
[`Weight`], which is any primitive integer. The constant-1 function [`Cardinality`] is special:
algorithms can recognise it via [`WeightFunction::is_cardinality`] and some of them (e.g.
the bidirectional BFS) accept nothing else.

```
use idxgraphs::prelude::*;

let by_slice = vec![3u32, 1, 4];
assert_eq!(by_slice.weight(2), 4);

let by_closure = WeightFn(|v: u32| 2 * v as i64);
assert_eq!(by_closure.weight(5), 10);

assert!(Cardinality.is_cardinality());
assert!(!by_slice.is_cardinality());
```
*/

use std::fmt::Debug;

use num::{PrimInt, Zero};

use crate::error::{GraphError, Result};

/// Weight values: any primitive (signed or unsigned) integer
pub trait Weight: PrimInt + Debug + Default {}

impl<T> Weight for T where T: PrimInt + Debug + Default {}

/// Maps vertex or edge indices to weights
pub trait WeightFunction {
    type Weight: Weight;

    /// Weight of index `idx`
    fn weight(&self, idx: u32) -> Self::Weight;

    /// Returns *true* if every index has weight `1`
    fn is_cardinality(&self) -> bool {
        false
    }

    /// Largest weight among the indices `0..len`, or zero if `len == 0`
    fn max_weight(&self, len: u32) -> Self::Weight {
        (0..len)
            .map(|i| self.weight(i))
            .max()
            .unwrap_or_else(Self::Weight::zero)
    }

    /// Number of indices with a weight, or `None` if every `u32` index has one
    fn number_of_weights(&self) -> Option<u32> {
        None
    }

    /// Returns `Err(MissingWeights { .. })` if fewer than `len` indices carry a weight and
    /// `Err(NegativeWeight(i))` for the first index in `0..len` with a negative weight
    fn check_non_negative(&self, len: u32) -> Result<()> {
        if let Some(available) = self.number_of_weights().filter(|&k| k < len) {
            return Err(GraphError::MissingWeights {
                available,
                required: len,
            });
        }
        if self.is_cardinality() {
            return Ok(());
        }
        match (0..len).find(|&i| self.weight(i) < Self::Weight::zero()) {
            Some(i) => Err(GraphError::NegativeWeight(i)),
            None => Ok(()),
        }
    }
}

/// The constant weight function `idx -> 1`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cardinality;

impl WeightFunction for Cardinality {
    type Weight = u64;

    #[inline(always)]
    fn weight(&self, _: u32) -> u64 {
        1
    }

    fn is_cardinality(&self) -> bool {
        true
    }

    fn max_weight(&self, len: u32) -> u64 {
        u64::from(len > 0)
    }
}

/// Adapter turning a closure `Fn(u32) -> W` into a [`WeightFunction`]
#[derive(Debug, Clone, Copy)]
pub struct WeightFn<F>(pub F);

impl<F, W> WeightFunction for WeightFn<F>
where
    F: Fn(u32) -> W,
    W: Weight,
{
    type Weight = W;

    fn weight(&self, idx: u32) -> W {
        (self.0)(idx)
    }
}

impl<W: Weight> WeightFunction for [W] {
    type Weight = W;

    fn weight(&self, idx: u32) -> W {
        self[idx as usize]
    }

    fn number_of_weights(&self) -> Option<u32> {
        Some(u32::try_from(self.len()).unwrap_or(u32::MAX))
    }
}

impl<W: Weight> WeightFunction for Vec<W> {
    type Weight = W;

    fn weight(&self, idx: u32) -> W {
        self[idx as usize]
    }

    fn number_of_weights(&self) -> Option<u32> {
        Some(u32::try_from(self.len()).unwrap_or(u32::MAX))
    }
}

impl<T> WeightFunction for &T
where
    T: WeightFunction + ?Sized,
{
    type Weight = T::Weight;

    fn weight(&self, idx: u32) -> Self::Weight {
        (**self).weight(idx)
    }

    fn is_cardinality(&self) -> bool {
        (**self).is_cardinality()
    }

    fn max_weight(&self, len: u32) -> Self::Weight {
        (**self).max_weight(len)
    }

    fn number_of_weights(&self) -> Option<u32> {
        (**self).number_of_weights()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn negative_weights_are_reported() {
        let weights = vec![4i32, 0, -2, 7];
        assert_eq!(weights.check_non_negative(4), Err(GraphError::NegativeWeight(2)));
        assert_eq!(weights.check_non_negative(2), Ok(()));
        assert_eq!(weights.max_weight(4), 7);
    }

    #[test]
    fn too_few_weights() {
        let weights = vec![1u32, 2];
        assert_eq!(weights.number_of_weights(), Some(2));
        assert_eq!(weights.check_non_negative(2), Ok(()));
        assert_eq!(
            weights.check_non_negative(3),
            Err(GraphError::MissingWeights {
                available: 2,
                required: 3
            })
        );
        assert_eq!(
            weights[..1].check_non_negative(3),
            Err(GraphError::MissingWeights {
                available: 1,
                required: 3
            })
        );

        // short and negative: the length is reported first
        assert!(matches!(
            vec![-1i8].check_non_negative(2),
            Err(GraphError::MissingWeights { .. })
        ));

        assert_eq!(Cardinality.number_of_weights(), None);
        assert_eq!(WeightFn(|_: u32| -1i8).number_of_weights(), None);
        assert_eq!((&weights).number_of_weights(), Some(2));
    }

    #[test]
    fn cardinality() {
        assert_eq!(Cardinality.max_weight(0), 0);
        assert_eq!(Cardinality.max_weight(10), 1);
        assert!((&Cardinality).is_cardinality());
        assert!(!WeightFn(|_: u32| 1u8).is_cardinality());
    }
}
