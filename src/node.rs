/*!
# Node Representation

Vertices are dense indices `0..n` of type `Node = u32`. Every per-vertex table in this crate
(visited markers, low-links, component ids, ...) is a plain array indexed by `Node`, so no hashing
is ever needed to look up vertex state.
*/

use std::num::NonZero;

use crate::utils::BitSet;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSet;

/// As `Option<u32>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>`. This instead uses the
/// `NonZero`-Wrapper to assign a constant value as the niche.
///
/// The wrapper is shared by node and edge indices as both are `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: u32>(NonZero<u32>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: u32> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: u32) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying value
    pub const fn get(&self) -> u32 {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn optional_node() {
        assert_eq!(size_of::<Option<OptionalNode>>(), size_of::<Node>());

        assert!(OptionalNode::new(INVALID_NODE).is_none());
        for u in [0, 1, 17, INVALID_NODE - 1] {
            assert_eq!(OptionalNode::new(u).map(|x| x.get()), Some(u));
        }
    }
}
