/*!
# Minimum Vertex Cuts

A *vertex cut* is a set of vertices whose removal leaves some vertex unable to reach another; an
`(s, t)`-vertex cut must separate `t` from `s` and may contain neither of them.
Minimum weight vertex cuts are reduced to minimum edge cuts by *vertex splitting*:

- every vertex `v` becomes `v_in = 2v` and `v_out = 2v + 1`, joined by the *internal* edge
  `v_in -> v_out` weighted with the weight of `v`;
- every edge `(u, v)` becomes `u_out -> v_in` (and `v_out -> u_in` if the graph is undirected)
  with a weight exceeding the total vertex weight, so no minimum cut ever contains it.

Any path through `v` must use its internal edge, hence the minimum `(s_out, t_in)`-edge-cut of
the [`AuxiliaryGraph`] consists of internal edges only and translates back to a minimum vertex cut.
The edge cut itself is delegated to a [`MinEdgeCutSt`] solver.
*/

use num::{NumCast, ToPrimitive, Zero};
use tracing::{debug, trace};

use super::*;

/// The split graph of the vertex cut reduction. It is always directed and has `2n` vertices.
///
/// Edge ids `0..threshold` are the copies of the original edges; edge `threshold + v` is the
/// internal edge of vertex `v`. Weights are widened to `u128`, so the copies can outweigh every
/// vertex set regardless of the range of the vertex weight type.
#[derive(Debug, Clone)]
pub struct AuxiliaryGraph {
    graph: CsrGraph,
    weights: Vec<u128>,
    threshold: EdgeId,
}

impl AuxiliaryGraph {
    /// Splits every vertex of `graph`, weighting internal edges by `vertex_weights`.
    /// Self-loops are dropped as they never lie on a path between two different vertices.
    ///
    /// Fails with [`GraphError::WeightOverflow`] if the total vertex weight exceeds `u128`.
    pub fn new<G, F>(graph: &G, vertex_weights: &F) -> Result<Self>
    where
        G: IndexGraph,
        F: WeightFunction + ?Sized,
    {
        let n = graph.number_of_nodes();
        vertex_weights.check_non_negative(n)?;

        let mut edges = Vec::with_capacity(graph.number_of_edges() as usize * 2 + n as usize);
        for Edge(u, v) in graph.edges().filter(|e| !e.is_loop()) {
            edges.push(Edge(Self::split_out(u), Self::split_in(v)));
            if graph.is_undirected() {
                edges.push(Edge(Self::split_out(v), Self::split_in(u)));
            }
        }
        let threshold = edges.len() as EdgeId;
        edges.extend(graph.vertices().map(|v| Edge(Self::split_in(v), Self::split_out(v))));

        let widened = graph
            .vertices()
            .map(|v| {
                vertex_weights
                    .weight(v)
                    .to_u128()
                    .ok_or(GraphError::NegativeWeight(v))
            })
            .collect::<Result<Vec<u128>>>()?;

        // exceeds the weight of any vertex set
        let huge = widened
            .iter()
            .try_fold(1u128, |acc, &w| acc.checked_add(w))
            .ok_or(GraphError::WeightOverflow)?;

        let mut weights = vec![huge; threshold as usize];
        weights.extend(widened);

        trace!(n, aux_edges = edges.len(), huge = ?huge, "built auxiliary graph");

        Ok(Self {
            graph: CsrGraph::directed(2 * n, edges),
            weights,
            threshold,
        })
    }

    /// Vertex `v_in` of the split graph
    #[inline]
    pub const fn split_in(v: Node) -> Node {
        2 * v
    }

    /// Vertex `v_out` of the split graph
    #[inline]
    pub const fn split_out(v: Node) -> Node {
        2 * v + 1
    }

    pub fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    /// Edge weights of the split graph, indexed by edge id
    pub fn weights(&self) -> &[u128] {
        &self.weights
    }

    /// Returns the original vertex if `e` is an internal edge
    pub fn vertex_of_edge(&self, e: EdgeId) -> Option<Node> {
        e.checked_sub(self.threshold)
    }
}

/// A set of vertices together with its total weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexCut<W> {
    vertices: Vec<Node>,
    weight: W,
}

impl<W: Weight> VertexCut<W> {
    /// Cut vertices in increasing order
    pub fn vertices(&self) -> &[Node] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Node> {
        self.vertices
    }

    /// Total weight of the cut vertices
    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Minimum vertex cuts via the auxiliary graph reduction and a minimum edge cut solver `S`.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// // two paths from 0 to 3, one through 1 and one through 2
/// let g = CsrGraph::undirected(4, [(0, 1), (1, 3), (0, 2), (2, 3)]);
/// let cut = MinVertexCut::new().min_st_cut(&g, &Cardinality, 0, 3).unwrap();
///
/// assert_eq!(cut.vertices(), &[1, 2]);
/// assert_eq!(cut.weight(), 2);
///
/// // adjacent vertices cannot be separated
/// assert_eq!(
///     MinVertexCut::new().min_st_cut(&g, &Cardinality, 0, 1).err(),
///     Some(GraphError::Infeasible("source and sink are adjacent"))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinVertexCut<S = EdmondsKarpMinCut> {
    solver: S,
}

impl MinVertexCut {
    /// Creates a reduction solving edge cuts with [`EdmondsKarpMinCut`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: MinEdgeCutSt> MinVertexCut<S> {
    /// Creates a reduction delegating edge cuts to `solver`
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// Computes a minimum weight vertex set whose removal leaves no path from `source` to `sink`.
    ///
    /// Fails with
    /// - `NodeOutOfRange` / `NegativeWeight` / `MissingWeights` on invalid input,
    /// - `IdenticalEndpoints` if `source == sink`,
    /// - `Infeasible` if there is an edge from `source` to `sink`, as no vertex set separates them,
    /// - `WeightOverflow` if the weight of the minimum cut does not fit into the weight type.
    pub fn min_st_cut<G, F>(
        &self,
        graph: &G,
        vertex_weights: &F,
        source: Node,
        sink: Node,
    ) -> Result<VertexCut<F::Weight>>
    where
        G: IndexGraph,
        F: WeightFunction + ?Sized,
    {
        graph.check_node(source)?;
        graph.check_node(sink)?;
        if source == sink {
            return Err(GraphError::IdenticalEndpoints(source));
        }
        vertex_weights.check_non_negative(graph.number_of_nodes())?;
        if graph.contains_edge(source, sink) {
            return Err(GraphError::Infeasible("source and sink are adjacent"));
        }

        let aux = AuxiliaryGraph::new(graph, vertex_weights)?;
        let cut: VertexCut<F::Weight> = self.reduce(&aux, source, sink)?;

        debug!(
            n = graph.number_of_nodes(),
            m = graph.number_of_edges(),
            source,
            sink,
            size = cut.len(),
            weight = ?cut.weight,
            "computed minimum st vertex cut"
        );
        Ok(cut)
    }

    /// Computes a minimum weight vertex set whose removal leaves at least two vertices of which
    /// one cannot reach the other. Undirected graphs become disconnected, directed graphs lose
    /// strong connectivity.
    ///
    /// This is the minimum of the `(s, t)`-cuts over all non-adjacent pairs; for undirected
    /// graphs each unordered pair is considered once. Fails with `Infeasible` if every pair of
    /// vertices is adjacent (e.g. complete graphs or fewer than two vertices).
    pub fn min_global_cut<G, F>(&self, graph: &G, vertex_weights: &F) -> Result<VertexCut<F::Weight>>
    where
        G: IndexGraph,
        F: WeightFunction + ?Sized,
    {
        vertex_weights.check_non_negative(graph.number_of_nodes())?;
        let aux = AuxiliaryGraph::new(graph, vertex_weights)?;

        let mut best: Option<VertexCut<F::Weight>> = None;
        'pairs: for source in graph.vertices() {
            let sinks = if graph.is_directed() {
                0..graph.number_of_nodes()
            } else {
                source + 1..graph.number_of_nodes()
            };

            for sink in sinks {
                if source == sink || graph.contains_edge(source, sink) {
                    continue;
                }

                let cut: VertexCut<F::Weight> = self.reduce(&aux, source, sink)?;
                if best.as_ref().is_none_or(|b| cut.weight < b.weight) {
                    let done = cut.weight.is_zero();
                    best = Some(cut);
                    if done {
                        break 'pairs;
                    }
                }
            }
        }

        let cut = best.ok_or(GraphError::Infeasible("every pair of vertices is adjacent"))?;
        debug!(
            n = graph.number_of_nodes(),
            m = graph.number_of_edges(),
            size = cut.len(),
            weight = ?cut.weight,
            "computed minimum global vertex cut"
        );
        Ok(cut)
    }

    fn reduce<W: Weight>(&self, aux: &AuxiliaryGraph, source: Node, sink: Node) -> Result<VertexCut<W>> {
        let edge_cut = self.solver.min_st_edge_cut(
            aux.graph(),
            aux.weights(),
            AuxiliaryGraph::split_out(source),
            AuxiliaryGraph::split_in(sink),
        )?;

        let vertices = edge_cut
            .edges()
            .iter()
            .map(|&e| {
                aux.vertex_of_edge(e)
                    .ok_or(GraphError::Infeasible("source and sink are adjacent"))
            })
            .collect::<Result<Vec<Node>>>()?;

        // the cut weight is the sum of some vertex weights and may exceed `W` nonetheless
        let weight = <W as NumCast>::from(edge_cut.weight()).ok_or(GraphError::WeightOverflow)?;

        Ok(VertexCut { vertices, weight })
    }
}

/// Minimum vertex cuts as methods on graphs, using [`MinVertexCut`] with its default solver
pub trait VertexCuts: IndexGraph {
    /// See [`MinVertexCut::min_st_cut`]
    fn min_st_vertex_cut<F>(
        &self,
        vertex_weights: &F,
        source: Node,
        sink: Node,
    ) -> Result<VertexCut<F::Weight>>
    where
        F: WeightFunction + ?Sized,
    {
        MinVertexCut::new().min_st_cut(self, vertex_weights, source, sink)
    }

    /// See [`MinVertexCut::min_global_cut`]
    fn min_vertex_cut<F>(&self, vertex_weights: &F) -> Result<VertexCut<F::Weight>>
    where
        F: WeightFunction + ?Sized,
    {
        MinVertexCut::new().min_global_cut(self, vertex_weights)
    }

    /// Returns the size of a smallest vertex set whose removal destroys (strong) connectivity,
    /// or `None` if every pair of vertices is adjacent
    fn vertex_connectivity(&self) -> Result<Option<NumNodes>> {
        match self.min_vertex_cut(&Cardinality) {
            Ok(cut) => Ok(Some(cut.len() as NumNodes)),
            Err(GraphError::Infeasible(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<G> VertexCuts for G where G: IndexGraph {}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::*;

    #[test]
    fn auxiliary_graph() {
        let g = CsrGraph::undirected(3, [(0, 1), (1, 2), (2, 2)]);
        let aux = AuxiliaryGraph::new(&g, &vec![4u32, 2, 7]).unwrap();

        assert!(aux.graph().is_directed());
        assert_eq!(aux.graph().number_of_nodes(), 6);
        assert_eq!(
            aux.graph().edge_list(),
            &[
                Edge(1, 2),
                Edge(3, 0),
                Edge(3, 4),
                Edge(5, 2),
                Edge(0, 1),
                Edge(2, 3),
                Edge(4, 5)
            ]
        );
        assert_eq!(aux.weights(), &[14, 14, 14, 14, 4, 2, 7]);
        assert_eq!(aux.vertex_of_edge(3), None);
        assert_eq!(aux.vertex_of_edge(5), Some(1));
    }

    #[test]
    fn narrow_weight_types() {
        // a single vertex of maximal weight separates the path
        let path = CsrGraph::undirected(3, [(0, 1), (1, 2)]);
        let cut = path.min_st_vertex_cut(&vec![0u8, 255, 0], 0, 2).unwrap();
        assert_eq!(cut.vertices(), &[1]);
        assert_eq!(cut.weight(), 255);

        let many = CsrGraph::directed(300, [(0, 1), (1, 2)]);
        let aux = AuxiliaryGraph::new(&many, &vec![200u8; 300]).unwrap();
        assert_eq!(aux.weights()[0], 200 * 300 + 1);
        let cut = many.min_st_vertex_cut(&vec![200u8; 300], 0, 2).unwrap();
        assert_eq!((cut.vertices(), cut.weight()), (&[1][..], 200));

        // two disjoint paths: the cut itself weighs more than `u8::MAX`
        let square = CsrGraph::undirected(4, [(0, 1), (1, 3), (0, 2), (2, 3)]);
        assert_eq!(
            square.min_st_vertex_cut(&vec![0u8, 200, 200, 0], 0, 3).err(),
            Some(GraphError::WeightOverflow)
        );
        let cut = square.min_st_vertex_cut(&vec![0u8, 100, 100, 0], 0, 3).unwrap();
        assert_eq!((cut.vertices(), cut.weight()), (&[1, 2][..], 200));

        let signed = CsrGraph::undirected(3, [(0, 1), (1, 2)]);
        let cut = signed.min_st_vertex_cut(&vec![i8::MAX; 3], 0, 2).unwrap();
        assert_eq!(cut.weight(), i8::MAX);
    }

    #[test]
    fn total_weight_overflows_u128() {
        let g = CsrGraph::undirected(3, [(0, 1), (1, 2)]);
        assert_eq!(
            AuxiliaryGraph::new(&g, &vec![u128::MAX, 0, 1]).err(),
            Some(GraphError::WeightOverflow)
        );
    }

    #[test]
    fn weighted_st_cut() {
        //   1 - 3
        //  /     \
        // 0 - 2 - 5
        //  \     /
        //   4 --
        let g = CsrGraph::undirected(6, [(0, 1), (1, 3), (3, 5), (0, 2), (2, 5), (0, 4), (4, 5)]);
        let weights = vec![0u32, 5, 3, 1, 2, 0];

        let cut = g.min_st_vertex_cut(&weights, 0, 5).unwrap();
        assert_eq!(cut.vertices(), &[2, 3, 4]);
        assert_eq!(cut.weight(), 6);

        let cut = g.min_st_vertex_cut(&Cardinality, 0, 5).unwrap();
        assert_eq!(cut.weight(), 3);
        assert_eq!(cut.len(), 3);
    }

    #[test]
    fn directed_st_cut() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3, but 3 reaches 0 only through 4
        let g = CsrGraph::directed(5, [(0, 1), (1, 3), (0, 2), (2, 3), (3, 4), (4, 0)]);

        assert_eq!(g.min_st_vertex_cut(&Cardinality, 0, 3).unwrap().weight(), 2);
        assert_eq!(g.min_st_vertex_cut(&Cardinality, 3, 0).unwrap().vertices(), &[4]);

        // edges in the wrong direction do not make the endpoints adjacent
        let g = CsrGraph::directed(2, [(1, 0)]);
        let cut = g.min_st_vertex_cut(&Cardinality, 0, 1).unwrap();
        assert!(cut.is_empty());
        assert_eq!(cut.weight(), 0);
    }

    #[test]
    fn st_cut_errors() {
        let g = CsrGraph::undirected(3, [(0, 1), (1, 2)]);

        assert_eq!(
            g.min_st_vertex_cut(&Cardinality, 1, 0).err(),
            Some(GraphError::Infeasible("source and sink are adjacent"))
        );
        assert_eq!(
            g.min_st_vertex_cut(&Cardinality, 2, 2).err(),
            Some(GraphError::IdenticalEndpoints(2))
        );
        assert_eq!(
            g.min_st_vertex_cut(&Cardinality, 0, 9).err(),
            Some(GraphError::NodeOutOfRange { node: 9, n: 3 })
        );
        assert_eq!(
            g.min_st_vertex_cut(&vec![1i64, -2, 1], 0, 2).err(),
            Some(GraphError::NegativeWeight(1))
        );
        assert_eq!(
            g.min_st_vertex_cut(&vec![1u32], 0, 2).err(),
            Some(GraphError::MissingWeights {
                available: 1,
                required: 3
            })
        );
        assert_eq!(
            g.min_vertex_cut(&[1u32, 1][..]).err(),
            Some(GraphError::MissingWeights {
                available: 2,
                required: 3
            })
        );
    }

    #[test]
    fn global_cut() {
        let cycle = CsrGraph::undirected(5, (0..5).map(|u| (u, (u + 1) % 5)));
        assert_eq!(cycle.min_vertex_cut(&Cardinality).unwrap().len(), 2);
        assert_eq!(cycle.vertex_connectivity().unwrap(), Some(2));

        let star = CsrGraph::undirected(4, [(0, 1), (0, 2), (0, 3)]);
        let cut = star.min_vertex_cut(&Cardinality).unwrap();
        assert_eq!(cut.vertices(), &[0]);

        let disconnected = CsrGraph::undirected(4, [(0, 1), (2, 3)]);
        let cut = disconnected.min_vertex_cut(&Cardinality).unwrap();
        assert!(cut.is_empty());
        assert_eq!(cut.weight(), 0);

        let complete = CsrGraph::undirected(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(
            complete.min_vertex_cut(&Cardinality).err(),
            Some(GraphError::Infeasible("every pair of vertices is adjacent"))
        );
        assert_eq!(complete.vertex_connectivity().unwrap(), None);
    }

    #[test]
    fn custom_solver() {
        let g = CsrGraph::undirected(3, [(0, 1), (1, 2)]);
        let cut = MinVertexCut::with_solver(EdmondsKarpMinCut)
            .min_st_cut(&g, &WeightFn(|_: u32| 3u16), 0, 2)
            .unwrap();
        assert_eq!((cut.vertices(), cut.weight()), (&[1][..], 3));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn st_cut_matches_brute_force(
            seed in any::<u64>(),
            n in 2u32..8,
            directed in any::<bool>(),
            weights in proptest::collection::vec(0u32..5, 8),
        ) {
            let graph = random_small_graph(seed, n, 2.0, directed);
            let (s, t) = (0, n - 1);
            prop_assume!(!graph.contains_edge(s, t));

            let cut = graph.min_st_vertex_cut(&weights, s, t).unwrap();
            prop_assert!(!cut.vertices().contains(&s) && !cut.vertices().contains(&t));
            prop_assert_eq!(
                cut.weight(),
                cut.vertices().iter().map(|&v| weights[v as usize]).sum::<u32>()
            );
            prop_assert!(!reachable_without(&graph, cut.vertices(), s).get_bit(t));
            prop_assert_eq!(cut.weight(), brute_force_st_vertex_cut(&graph, &weights, s, t));
        }

        #[test]
        fn global_cut_matches_brute_force(
            seed in any::<u64>(),
            n in 1u32..8,
            directed in any::<bool>(),
            weights in proptest::collection::vec(0u32..5, 8),
        ) {
            let graph = random_small_graph(seed, n, 3.0, directed);
            let expected = brute_force_global_vertex_cut(&graph, &weights);

            match graph.min_vertex_cut(&weights) {
                Ok(cut) => prop_assert_eq!(Some(cut.weight()), expected),
                Err(GraphError::Infeasible(_)) => prop_assert_eq!(None, expected),
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
    }
}
