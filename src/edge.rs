/*!
# Edge Representation

Edges live in their own dense index space `0..m` (`EdgeId = u32`). Each id maps to exactly one
ordered endpoint pair [`Edge`]`(source, target)`; for undirected graphs the order is arbitrary
but fixed, and algorithms use [`IndexGraph::edge_endpoint`](crate::ops::IndexGraph::edge_endpoint)
to get "the other side".
*/

use std::fmt::{Debug, Display};

use crate::{
    node::{Node, OptionalNodeImpl},
    utils::BitSet,
};

/// An edge is defined by two nodes/endpoints.
/// Is is up to the graph whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// Index of an edge in `0..m`
pub type EdgeId = u32;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = EdgeId;

/// EdgeId-Value that is considered invalid
pub const INVALID_EDGE: EdgeId = EdgeId::MAX;

/// Compact `Option<EdgeId>` (see [`OptionalNodeImpl`])
pub type OptionalEdge = OptionalNodeImpl<INVALID_EDGE>;

/// A BitSet over edge ids
pub type EdgeBitSet = BitSet;

/// One entry of an incidence list: the id of the edge and the endpoint *opposite* to the vertex
/// whose list is iterated. For out-edges this is the target, for in-edges the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IncidentEdge {
    pub id: EdgeId,
    pub endpoint: Node,
}

impl IncidentEdge {
    pub const fn new(id: EdgeId, endpoint: Node) -> Self {
        Self { id, endpoint }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Given one endpoint, returns the other one.
    /// ** Panics (in debug builds) if `known` is no endpoint **
    pub fn opposite(&self, known: Node) -> Node {
        debug_assert!(known == self.0 || known == self.1);
        if known == self.0 { self.1 } else { self.0 }
    }

    /// Bijection from `0..n^2` to all possible (directed) edges of `n` nodes
    pub fn from_u64(x: u64, n: u64) -> Self {
        debug_assert!(x < n * n);
        Edge((x / n) as Node, (x % n) as Node)
    }

    /// Bijection from `0..(n choose 2)` to all normalized loop-free edges of `n` nodes.
    ///
    /// Row `u` of the strict upper triangle holds `n - 1 - u` edges; we walk rows until `x` falls
    /// into one of them.
    pub fn from_u64_undir(x: u64, n: u64) -> Self {
        debug_assert!(x < n * (n - 1) / 2);

        // closed form for the row: largest u with  u*n - u*(u+1)/2 <= x
        let nf = n as f64 - 0.5;
        let mut u = (nf - (nf * nf - 2.0 * x as f64).max(0.0).sqrt()).floor() as u64;
        let row_start = |u: u64| u * n - u * (u + 1) / 2;
        while u > 0 && row_start(u) > x {
            u -= 1;
        }
        while u + 1 < n && row_start(u + 1) <= x {
            u += 1;
        }

        let v = u + 1 + (x - row_start(u));
        Edge(u as Node, v as Node)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn from_u64_undir_is_bijective() {
        for n in 2..30u64 {
            let edges = (0..n * (n - 1) / 2)
                .map(|x| Edge::from_u64_undir(x, n))
                .collect_vec();

            assert!(edges.iter().all(|e| e.is_normalized() && !e.is_loop()));
            assert!(edges.iter().all(|e| (e.1 as u64) < n));
            assert!(edges.iter().tuple_windows().all(|(a, b)| a < b));
        }
    }

    #[test]
    fn opposite() {
        let e = Edge(3, 7);
        assert_eq!(e.opposite(3), 7);
        assert_eq!(e.opposite(7), 3);
        assert_eq!(Edge(2, 2).opposite(2), 2);
        assert_eq!(e.reverse().normalized(), e);
    }
}
