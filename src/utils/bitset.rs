/*!
# Fixed-Size Bitsets

A thin wrapper around [`stream_bitset`]'s `BitSetImpl` indexed by `u32`, which is the width of both
[`Node`](crate::node::Node) and [`EdgeId`](crate::edge::EdgeId). All traversal and connectivity
routines keep their visited/blocked markers in one of these.
*/

use std::hash::{Hash, Hasher};

use stream_bitset::bitset::BitSetImpl;

/// Bitset with a fixed number of bits, addressed by `u32` indices.
#[derive(Clone)]
pub struct BitSet {
    bits: BitSetImpl<u32>,
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter_set_bits()).finish()
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.number_of_bits() == other.number_of_bits()
            && self.iter_set_bits().eq(other.iter_set_bits())
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number_of_bits().hash(state);
        self.iter_set_bits().for_each(|i| i.hash(state));
    }
}

impl BitSet {
    /// Creates a bitset of `n` cleared bits
    pub fn new(n: u32) -> Self {
        Self {
            bits: BitSetImpl::new(n),
        }
    }

    /// Creates a bitset of `n` bits where exactly the bits yielded by `bits` are set
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::utils::BitSet;
    ///
    /// let set = BitSet::new_with_bits_set(8, [1, 5, 5]);
    /// assert_eq!(set.cardinality(), 2);
    /// assert!(set.get_bit(5));
    /// ```
    pub fn new_with_bits_set<I>(n: u32, bits: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = Self::new(n);
        for i in bits {
            set.set_bit(i);
        }
        set
    }

    /// Number of bits (set or not) in this bitset
    pub fn number_of_bits(&self) -> u32 {
        self.bits.number_of_bits() as u32
    }

    /// Sets bit `i` and returns its *previous* value.
    /// ** Panics if `i >= number_of_bits()` **
    #[inline]
    pub fn set_bit(&mut self, i: u32) -> bool {
        self.bits.set_bit(i)
    }

    /// Clears bit `i` and returns its *previous* value.
    /// ** Panics if `i >= number_of_bits()` **
    #[inline]
    pub fn clear_bit(&mut self, i: u32) -> bool {
        self.bits.clear_bit(i)
    }

    /// Returns *true* if bit `i` is set. Bits beyond the size are reported as cleared.
    #[inline]
    pub fn get_bit(&self, i: u32) -> bool {
        i < self.number_of_bits() && self.bits.get_bit(i)
    }

    /// Number of set bits
    pub fn cardinality(&self) -> u32 {
        self.bits.cardinality() as u32
    }

    /// Returns *true* if no bit is set
    pub fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Clears every bit while keeping the size
    pub fn clear_all(&mut self) {
        self.bits.clear_all();
    }

    /// Iterates over the indices of all set bits in increasing order
    pub fn iter_set_bits(&self) -> impl Iterator<Item = u32> + '_ {
        self.bits.iter_set_bits().map(|i| i as u32)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn set_and_clear() {
        let mut set = BitSet::new(70);
        assert!(set.is_empty());

        assert!(!set.set_bit(3));
        assert!(set.set_bit(3));
        assert!(!set.set_bit(69));
        assert_eq!(set.cardinality(), 2);

        assert!(set.clear_bit(3));
        assert!(!set.clear_bit(3));
        assert_eq!(set.iter_set_bits().collect_vec(), vec![69]);

        assert!(!set.get_bit(1000));

        set.clear_all();
        assert!(set.is_empty());
        assert_eq!(set.number_of_bits(), 70);
    }
}
