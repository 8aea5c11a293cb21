/*!
# Compressed Sparse Row (CSR) Index Graph

[`CsrGraph`] stores the incidence lists of all vertices in a single flattened array, with offset
indices marking the start of each vertex's list. It is immutable after construction and designed
for fast sequential iteration, which is all the algorithms of this crate need.

- Edge ids are the positions of the edges in the construction list.
- Parallel edges and self-loops are kept.
- Directed graphs store out- *and* in-incidences.
- Undirected graphs store one list per vertex containing every incident edge; a self-loop appears
  once in the list of its vertex.
*/

use std::{iter::Copied, slice::Iter};

use super::*;
use crate::utils::SlicedBuffer;

/// Immutable edge-indexed graph in CSR layout.
///
/// # Examples
/// ```
/// use idxgraphs::prelude::*;
///
/// let g = CsrGraph::from_edges(3, true, [(0, 1), (1, 2), (0, 2)]);
/// assert_eq!(g.number_of_edges(), 3);
/// assert_eq!(g.edge_target(2), 2);
/// assert_eq!(g.out_degree_of(0), 2);
/// assert_eq!(g.in_edges_of(2).map(|ie| ie.endpoint).collect::<Vec<_>>(), vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct CsrGraph {
    directed: bool,
    endpoints: Vec<Edge>,
    out_edges: SlicedBuffer<IncidentEdge>,
    /// Only populated for directed graphs
    in_edges: SlicedBuffer<IncidentEdge>,
}

impl std::fmt::Debug for CsrGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrGraph")
            .field("directed", &self.directed)
            .field("n", &self.number_of_nodes())
            .field("edges", &self.endpoints)
            .finish()
    }
}

impl CsrGraph {
    /// Shorthand for `from_edges(n, true, edges)`
    pub fn directed<I, E>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Self::from_edges(n, true, edges)
    }

    /// Shorthand for `from_edges(n, false, edges)`
    pub fn undirected<I, E>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Self::from_edges(n, false, edges)
    }

    /// Returns a slice of all endpoint pairs, indexed by edge id
    pub fn edge_list(&self) -> &[Edge] {
        &self.endpoints
    }
}

impl GraphNodeOrder for CsrGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_edges.len() as NumNodes
    }
}

impl GraphEdgeOrder for CsrGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.endpoints.len() as NumEdges
    }
}

impl IndexGraph for CsrGraph {
    type EdgeIter<'a>
        = Copied<Iter<'a, IncidentEdge>>
    where
        Self: 'a;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn out_edges_of(&self, u: Node) -> Self::EdgeIter<'_> {
        self.out_edges[u].iter().copied()
    }

    fn in_edges_of(&self, u: Node) -> Self::EdgeIter<'_> {
        if self.directed {
            self.in_edges[u].iter().copied()
        } else {
            self.out_edges[u].iter().copied()
        }
    }

    fn out_degree_of(&self, u: Node) -> NumEdges {
        self.out_edges.size_of(u)
    }

    fn in_degree_of(&self, u: Node) -> NumEdges {
        if self.directed {
            self.in_edges.size_of(u)
        } else {
            self.out_edges.size_of(u)
        }
    }

    #[inline]
    fn edge(&self, e: EdgeId) -> Edge {
        self.endpoints[e as usize]
    }
}

impl GraphFromScratch for CsrGraph {
    fn from_edges<I, E>(n: NumNodes, directed: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let endpoints: Vec<Edge> = edges.into_iter().map(|e| e.into()).collect();
        assert!(
            endpoints.iter().all(|&Edge(u, v)| u < n && v < n),
            "Edge endpoint exceeds number of nodes!"
        );

        let ids = 0..endpoints.len() as EdgeId;

        if directed {
            let out_edges = SlicedBuffer::from_keyed(
                n,
                ids.clone()
                    .zip(&endpoints)
                    .map(|(e, &Edge(u, v))| (u, IncidentEdge::new(e, v))),
            );
            let in_edges = SlicedBuffer::from_keyed(
                n,
                ids.zip(&endpoints)
                    .map(|(e, &Edge(u, v))| (v, IncidentEdge::new(e, u))),
            );

            Self {
                directed,
                endpoints,
                out_edges,
                in_edges,
            }
        } else {
            let out_edges = SlicedBuffer::from_keyed(
                n,
                ids.zip(&endpoints).flat_map(|(e, &Edge(u, v))| {
                    let reverse = (!Edge(u, v).is_loop()).then_some((v, IncidentEdge::new(e, u)));
                    std::iter::once((u, IncidentEdge::new(e, v))).chain(reverse)
                }),
            );

            Self {
                directed,
                endpoints,
                out_edges,
                in_edges: SlicedBuffer::default(),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn undirected_incidences() {
        let g = CsrGraph::undirected(4, [(0, 1), (1, 2), (2, 2), (1, 0)]);

        assert!(g.is_undirected());
        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.number_of_edges(), 4);

        assert_eq!(
            g.out_edges_of(1).collect_vec(),
            vec![
                IncidentEdge::new(0, 0),
                IncidentEdge::new(1, 2),
                IncidentEdge::new(3, 0)
            ]
        );
        assert_eq!(g.out_edges_of(2).map(|ie| ie.id).collect_vec(), vec![1, 2]);
        assert_eq!(g.in_edges_of(3).count(), 0);

        assert!(g.contains_edge(2, 1));
        assert!(g.contains_edge(1, 2));
        assert!(!g.contains_edge(0, 2));
        assert_eq!(g.edge_endpoint(3, 0), 1);
        assert!(g.has_parallel_edges());
    }

    #[test]
    fn directed_incidences() {
        let g = CsrGraph::directed(3, [(0, 1), (1, 2), (2, 0), (0, 2)]);

        assert!(g.is_directed());
        assert_eq!(g.out_degree_of(0), 2);
        assert_eq!(g.in_degree_of(2), 2);
        assert_eq!(g.in_edges_of(0).collect_vec(), vec![IncidentEdge::new(2, 2)]);

        assert!(g.contains_edge(0, 2));
        assert!(g.contains_edge(2, 0));
        assert!(!g.contains_edge(1, 0));
        assert!(!g.has_parallel_edges());

        for e in g.edge_ids() {
            let Edge(u, v) = g.edge(e);
            assert!(g.out_edges_of(u).any(|ie| ie.id == e && ie.endpoint == v));
            assert!(g.in_edges_of(v).any(|ie| ie.id == e && ie.endpoint == u));
        }
    }

    #[test]
    fn try_from_edges() {
        assert!(CsrGraph::try_from_edges(2, true, [(0, 1)]).is_ok());
        assert_eq!(
            CsrGraph::try_from_edges(2, true, [(0, 2)]).err(),
            Some(GraphError::NodeOutOfRange { node: 2, n: 2 })
        );
    }
}
