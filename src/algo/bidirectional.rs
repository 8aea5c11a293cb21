/*!
# Bidirectional Shortest Paths

Unweighted shortest `(s, t)`-paths by a meet-in-the-middle breadth-first search. One search grows
from `s` along outgoing edges, the other one from `t` along incoming edges; the two alternate,
each expanding one complete layer per turn. Whenever a vertex discovered by one side is already
known to the other, the concatenation through it is a candidate path.

With `ds` and `dt` the layers about to be expanded, every vertex on a path of length at most
`ds + dt` has been discovered by both sides already. Hence the search stops as soon as
`ds + dt >= best`, or when either side runs out of vertices.

Only vertices touched by one of the searches are stored, so a query between nearby vertices
of a huge graph stays cheap.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;
use tracing::{debug, trace};

use super::{traversal::EdgeLayer, *};

/// One side of the search: discovered vertices with their parent edge and layer
#[derive(Debug, Default, Clone)]
struct Frontier {
    records: FxHashMap<Node, EdgeLayer>,
    queue: VecDeque<Node>,
}

impl Frontier {
    fn reset(&mut self, root: Node) {
        self.records.clear();
        self.queue.clear();
        self.records.insert(root, EdgeLayer::new(None, 0));
        self.queue.push_back(root);
    }

    fn layer_of(&self, u: Node) -> Option<NumNodes> {
        self.records.get(&u).map(|r| r.layer())
    }

    /// Layer of the vertices expanded next
    fn front_layer(&self) -> Option<NumNodes> {
        self.queue.front().and_then(|&u| self.layer_of(u))
    }

    /// Edges from `u` back to the root of this side, starting at `u`
    fn edges_to_root<G: IndexGraph>(&self, graph: &G, mut u: Node) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        while let Some(e) = self.records.get(&u).and_then(|r| r.edge()) {
            edges.push(e);
            u = graph.edge_endpoint(e, u);
        }
        edges
    }
}

/// Best meeting point found so far: `(length, vertex)`
type Meeting = Option<(NumNodes, Node)>;

/// Bidirectional breadth-first search. The search state is reused across queries.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// let g = CsrGraph::undirected(5, [(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)]);
/// let mut search = BidirectionalBfs::new(&g);
///
/// let path = search.shortest_path(0, 2).unwrap().unwrap();
/// assert_eq!(path.edges(), &[0, 1]);
/// assert_eq!(path.len(), 2);
/// ```
pub struct BidirectionalBfs<'a, G> {
    graph: &'a G,
    forward: Frontier,
    backward: Frontier,
}

impl<'a, G> BidirectionalBfs<'a, G>
where
    G: IndexGraph,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            forward: Frontier::default(),
            backward: Frontier::default(),
        }
    }

    /// Returns a shortest path from `source` to `target`, `None` if `target` is unreachable,
    /// and an empty path if both coincide.
    pub fn shortest_path(&mut self, source: Node, target: Node) -> Result<Option<Path>> {
        self.graph.check_node(source)?;
        self.graph.check_node(target)?;
        if source == target {
            return Ok(Some(Path::empty(source)));
        }

        self.forward.reset(source);
        self.backward.reset(target);

        let mut best: Meeting = None;
        let mut forward_turn = true;
        let mut rounds = 0usize;

        while let (Some(ds), Some(dt)) = (self.forward.front_layer(), self.backward.front_layer()) {
            if best.is_some_and(|(length, _)| ds + dt >= length) {
                break;
            }

            if forward_turn {
                Self::expand_layer(self.graph, &mut self.forward, &self.backward, false, &mut best);
            } else {
                Self::expand_layer(self.graph, &mut self.backward, &self.forward, true, &mut best);
            }
            forward_turn = !forward_turn;
            rounds += 1;
        }

        debug!(
            source,
            target,
            rounds,
            touched = self.forward.records.len() + self.backward.records.len(),
            length = ?best.map(|(length, _)| length),
            "bidirectional bfs finished"
        );

        Ok(best.map(|(_, meeting)| {
            let mut edges = self.forward.edges_to_root(self.graph, meeting);
            edges.reverse();
            edges.extend(self.backward.edges_to_root(self.graph, meeting));
            Path::new(source, target, edges)
        }))
    }

    /// Expands all vertices of the front layer of `side`
    fn expand_layer(
        graph: &G,
        side: &mut Frontier,
        other: &Frontier,
        reversed: bool,
        best: &mut Meeting,
    ) {
        let Some(layer) = side.front_layer() else {
            return;
        };

        while let Some(&u) = side.queue.front() {
            if side.layer_of(u) != Some(layer) {
                break;
            }
            side.queue.pop_front();

            let edges = if reversed {
                graph.in_edges_of(u)
            } else {
                graph.out_edges_of(u)
            };

            for IncidentEdge { id, endpoint: v } in edges {
                if side.records.contains_key(&v) {
                    continue;
                }
                side.records.insert(v, EdgeLayer::new(Some(id), layer + 1));
                side.queue.push_back(v);

                if let Some(other_layer) = other.layer_of(v) {
                    let length = layer + 1 + other_layer;
                    if best.is_none_or(|(b, _)| length < b) {
                        trace!(meeting = v, length, "improved meeting point");
                        *best = Some((length, v));
                    }
                }
            }
        }
    }
}

/// Unweighted shortest paths as methods on graphs
pub trait ShortestPaths: IndexGraph {
    /// Shortest path from `source` to `target` by [`BidirectionalBfs`]
    fn shortest_path(&self, source: Node, target: Node) -> Result<Option<Path>> {
        BidirectionalBfs::new(self).shortest_path(source, target)
    }

    /// Like [`ShortestPaths::shortest_path`], but takes edge weights. Only [`Cardinality`]
    /// weights are supported; anything else fails with `NotCardinality`.
    fn shortest_path_with_weights<F>(
        &self,
        weights: &F,
        source: Node,
        target: Node,
    ) -> Result<Option<Path>>
    where
        F: WeightFunction + ?Sized,
    {
        if !weights.is_cardinality() {
            return Err(GraphError::NotCardinality("bidirectional bfs"));
        }
        self.shortest_path(source, target)
    }
}

impl<G> ShortestPaths for G where G: IndexGraph {}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;
    use crate::testing::*;

    #[test]
    fn five_cycle() {
        let g = CsrGraph::undirected(5, [(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)]);

        let path = g.shortest_path(0, 2).unwrap().unwrap();
        assert_eq!(path.edges(), &[0, 1]);
        assert_eq!(path.vertices(&g), vec![0, 1, 2]);

        let path = g.shortest_path(3, 0).unwrap().unwrap();
        assert_eq!(path.edges(), &[3, 4]);
        assert_eq!((path.source(), path.target()), (3, 0));
    }

    #[test]
    fn directed_paths_follow_edge_direction() {
        // 0 -> 1 -> 2 -> 3 and a shortcut 3 -> 0 that must not be used backwards
        let g = CsrGraph::directed(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);

        assert_eq!(g.shortest_path(0, 3).unwrap().unwrap().edges(), &[0, 1, 2]);
        assert_eq!(g.shortest_path(3, 1).unwrap().unwrap().edges(), &[3, 0]);

        let g = CsrGraph::directed(3, [(0, 1), (2, 1)]);
        assert_eq!(g.shortest_path(0, 2).unwrap(), None);
        assert_eq!(g.shortest_path(2, 1).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn trivial_and_invalid_queries() {
        let g = CsrGraph::undirected(3, [(0, 1), (1, 1)]);

        let path = g.shortest_path(1, 1).unwrap().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.source(), 1);

        assert_eq!(g.shortest_path(0, 2).unwrap(), None);
        assert_eq!(
            g.shortest_path(0, 3),
            Err(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert_eq!(
            g.shortest_path_with_weights(&vec![1u32, 1], 0, 1),
            Err(GraphError::NotCardinality("bidirectional bfs"))
        );
        assert_eq!(
            g.shortest_path_with_weights(&Cardinality, 0, 1)
                .unwrap()
                .map(|p| p.into_edges()),
            Some(vec![0])
        );
    }

    #[test]
    fn search_state_is_reused() {
        let g = CsrGraph::undirected(4, [(0, 1), (1, 2), (2, 3)]);
        let mut search = BidirectionalBfs::new(&g);

        let lengths = (0..4)
            .cartesian_product(0..4)
            .map(|(s, t)| search.shortest_path(s, t).unwrap().map(|p| p.len()))
            .collect_vec();

        assert_eq!(lengths.iter().flatten().max(), Some(&3));
        assert_eq!(lengths[3], Some(3));
        assert_eq!(lengths[5], Some(0));
    }

    #[test]
    fn long_path() {
        let n = 20_000;
        let g = CsrGraph::undirected(n, (1..n).map(|u| (u - 1, u)));
        let path = g.shortest_path(0, n - 1).unwrap().unwrap();
        assert_eq!(path.len(), n as usize - 1);
        assert!(Path::is_path(&g, 0, n - 1, path.edges()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn matches_single_source_bfs(
            seed in any::<u64>(),
            n in 1u32..24,
            avg_deg in 0.5f64..4.0,
            directed in any::<bool>(),
        ) {
            let graph = random_small_graph(seed, n, avg_deg, directed);
            let mut search = BidirectionalBfs::new(&graph);

            for s in graph.vertices() {
                let mut bfs = graph.bfs(s).unwrap();
                bfs.by_ref().for_each(drop);

                for t in graph.vertices() {
                    let path = search.shortest_path(s, t).unwrap();
                    prop_assert_eq!(path.as_ref().map(|p| p.len() as NumNodes), bfs.distance_to(t));
                    if let Some(path) = path {
                        prop_assert!(Path::is_path(&graph, s, t, path.edges()));
                    }
                }
            }
        }
    }
}
