use super::*;

/// A walk in an index graph, given as its source, its target and the ordered edge ids between
/// them. An empty edge list is the trivial path with `source == target`.
///
/// The edge ids alone do not determine the vertex sequence in undirected graphs, hence
/// [`Path::vertices`] needs the graph the path was computed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    source: Node,
    target: Node,
    edges: Vec<EdgeId>,
}

impl Path {
    /// Creates a path without validating it; see [`Path::is_path`]
    pub fn new(source: Node, target: Node, edges: Vec<EdgeId>) -> Self {
        debug_assert!(!edges.is_empty() || source == target);
        Self {
            source,
            target,
            edges,
        }
    }

    /// The trivial path consisting of a single vertex
    pub fn empty(vertex: Node) -> Self {
        Self::new(vertex, vertex, Vec::new())
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn target(&self) -> Node {
        self.target
    }

    /// Edge ids from source to target
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Consumes the path and returns its edge ids
    pub fn into_edges(self) -> Vec<EdgeId> {
        self.edges
    }

    /// Number of edges (the unweighted length)
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns *true* if the path is closed, i.e. source and target coincide
    pub fn is_cycle(&self) -> bool {
        self.source == self.target
    }

    /// Vertices visited by the path, starting with the source. A cycle lists its source twice.
    pub fn vertices<G: IndexGraph>(&self, graph: &G) -> Vec<Node> {
        let mut u = self.source;
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        vertices.push(u);
        for &e in &self.edges {
            u = graph.edge_endpoint(e, u);
            vertices.push(u);
        }
        vertices
    }

    /// Returns *true* if no vertex is visited twice, except for the source of a
    /// non-trivial cycle which is also its target.
    pub fn is_simple<G: IndexGraph>(&self, graph: &G) -> bool {
        let vertices = self.vertices(graph);
        let inner = if self.is_cycle() && !self.is_empty() {
            &vertices[1..]
        } else {
            &vertices[..]
        };

        let mut seen = graph.vertex_bitset_unset();
        inner.iter().all(|&u| !seen.set_bit(u))
    }

    /// Returns *true* if `edges` form a walk from `source` to `target` in `graph`, respecting
    /// edge orientation in directed graphs. Invalid ids yield *false* rather than panicking.
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// let g = CsrGraph::directed(3, [(0, 1), (1, 2), (2, 0)]);
    /// assert!(Path::is_path(&g, 0, 2, &[0, 1]));
    /// assert!(!Path::is_path(&g, 2, 0, &[1, 0]));
    /// assert!(Path::is_path(&g, 1, 1, &[]));
    /// ```
    pub fn is_path<G: IndexGraph>(graph: &G, source: Node, target: Node, edges: &[EdgeId]) -> bool {
        if graph.check_node(source).is_err() || graph.check_node(target).is_err() {
            return false;
        }

        let mut u = source;
        for &e in edges {
            if graph.check_edge(e).is_err() {
                return false;
            }

            let Edge(s, t) = graph.edge(e);
            u = if s == u {
                t
            } else if graph.is_undirected() && t == u {
                s
            } else {
                return false;
            };
        }

        u == target
    }
}
