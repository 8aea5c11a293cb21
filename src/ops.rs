/*!
# Index Graph Operations

The capability set every algorithm in this crate runs against. A graph exposes

- its vertices `0..n` ([`GraphNodeOrder`]) and edges `0..m` ([`GraphEdgeOrder`]),
- a runtime directedness flag,
- per vertex the outgoing (and, if directed, incoming) incidences as [`IncidentEdge`]s,
  i.e. edge id plus opposite endpoint,
- random access to the endpoints of an edge id.

Directed and undirected graphs share one trait; algorithms that only make sense for one
flavour check the flag via [`IndexGraph::check_directed`] / [`IndexGraph::check_undirected`]
before touching any state.
*/

use std::ops::Range;

use crate::{error::*, prelude::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the range `0..n` of all vertices. The range does not borrow the graph.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns `Err(NodeOutOfRange)` if `u >= n`
    fn check_node(&self, u: Node) -> Result<()> {
        if u < self.number_of_nodes() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node: u,
                n: self.number_of_nodes(),
            })
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns the range `0..m` of all edge ids
    fn edge_ids(&self) -> Range<EdgeId> {
        0..self.number_of_edges()
    }

    /// Returns empty bitset with one entry per edge
    fn edge_bitset_unset(&self) -> EdgeBitSet {
        EdgeBitSet::new(self.number_of_edges())
    }

    /// Returns `Err(EdgeOutOfRange)` if `e >= m`
    fn check_edge(&self, e: EdgeId) -> Result<()> {
        if e < self.number_of_edges() {
            Ok(())
        } else {
            Err(GraphError::EdgeOutOfRange {
                edge: e,
                m: self.number_of_edges(),
            })
        }
    }
}

/// Graph whose vertices and edges are dense indices.
///
/// Implementations must be immutable while any algorithm borrows them.
pub trait IndexGraph: GraphNodeOrder + GraphEdgeOrder + Sized {
    /// Iterator over the incidences of a vertex
    type EdgeIter<'a>: Iterator<Item = IncidentEdge> + Clone
    where
        Self: 'a;

    /// Returns *true* if edges are ordered pairs
    fn is_directed(&self) -> bool;

    /// Returns *true* if edges are unordered pairs
    fn is_undirected(&self) -> bool {
        !self.is_directed()
    }

    /// Iterates over all edges leaving `u`, each with its target.
    /// For undirected graphs these are all edges incident to `u`.
    /// ** Panics if `u >= n` **
    fn out_edges_of(&self, u: Node) -> Self::EdgeIter<'_>;

    /// Iterates over all edges entering `u`, each with its source.
    /// For undirected graphs this equals [`IndexGraph::out_edges_of`].
    /// ** Panics if `u >= n` **
    fn in_edges_of(&self, u: Node) -> Self::EdgeIter<'_>;

    /// Number of edges leaving `u`
    /// ** Panics if `u >= n` **
    fn out_degree_of(&self, u: Node) -> NumEdges;

    /// Number of edges entering `u`
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: Node) -> NumEdges;

    /// Returns the endpoint pair of edge `e`
    /// ** Panics if `e >= m` **
    fn edge(&self, e: EdgeId) -> Edge;

    /// Source of edge `e` (an arbitrary but fixed endpoint for undirected graphs)
    /// ** Panics if `e >= m` **
    fn edge_source(&self, e: EdgeId) -> Node {
        self.edge(e).0
    }

    /// Target of edge `e` (the other endpoint for undirected graphs)
    /// ** Panics if `e >= m` **
    fn edge_target(&self, e: EdgeId) -> Node {
        self.edge(e).1
    }

    /// Given one endpoint of `e`, returns the other one
    /// ** Panics if `e >= m` **
    fn edge_endpoint(&self, e: EdgeId, known: Node) -> Node {
        self.edge(e).opposite(known)
    }

    /// Returns an edge from `u` to `v` if one exists (in any orientation if undirected)
    /// ** Panics if `u >= n` **
    fn find_edge(&self, u: Node, v: Node) -> Option<EdgeId> {
        self.out_edges_of(u)
            .find(|ie| ie.endpoint == v)
            .map(|ie| ie.id)
    }

    /// Returns *true* if there is an edge from `u` to `v` (in any orientation if undirected)
    /// ** Panics if `u >= n` **
    fn contains_edge(&self, u: Node, v: Node) -> bool {
        self.find_edge(u, v).is_some()
    }

    /// Iterates over all edge endpoint pairs in id order
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_ids().map(|e| self.edge(e))
    }

    /// Returns *true* if two edges share both endpoints (in the same orientation if directed).
    /// Self-loops are no parallel edges unless there are two of them at the same vertex.
    fn has_parallel_edges(&self) -> bool {
        let mut seen = self.vertex_bitset_unset();
        self.vertices().any(|u| {
            let found = self.out_edges_of(u).any(|ie| seen.set_bit(ie.endpoint));
            for ie in self.out_edges_of(u) {
                seen.clear_bit(ie.endpoint);
            }
            found
        })
    }

    /// Returns `Err(DirectedOnly(algo))` for undirected graphs
    fn check_directed(&self, algo: &'static str) -> Result<()> {
        if self.is_directed() {
            Ok(())
        } else {
            Err(GraphError::DirectedOnly(algo))
        }
    }

    /// Returns `Err(UndirectedOnly(algo))` for directed graphs
    fn check_undirected(&self, algo: &'static str) -> Result<()> {
        if self.is_undirected() {
            Ok(())
        } else {
            Err(GraphError::UndirectedOnly(algo))
        }
    }
}

/// Construction of a graph from a list of edges.
/// The `i`-th edge of the list receives edge id `i`.
pub trait GraphFromScratch: Sized {
    /// Creates a graph with `n` vertices and the given edges.
    /// ** Panics if an endpoint is `>= n` **
    fn from_edges<I, E>(n: NumNodes, directed: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>;

    /// Like [`GraphFromScratch::from_edges`] but reports invalid endpoints as an error
    fn try_from_edges<I, E>(n: NumNodes, directed: bool, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().map(|e| e.into()).collect();
        if let Some(node) = edges.iter().flat_map(|e| [e.0, e.1]).find(|&u| u >= n) {
            return Err(GraphError::NodeOutOfRange { node, n });
        }
        Ok(Self::from_edges(n, directed, edges))
    }
}
