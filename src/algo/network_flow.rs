/*!
# Network Flow and Minimum Edge Cuts

Maximum `(s, t)`-flow with the Edmonds–Karp augmenting path algorithm, and the minimum
`(s, t)`-edge-cut derived from it.

## Core concepts
- A [`ResidualNetwork`] stores two arcs per edge: arc `2e` runs along edge `e`, arc `2e + 1`
  against it. The reverse of arc `a` is `a ^ 1`. In directed graphs the backward arc starts with
  capacity zero, in undirected graphs both arcs carry the full edge weight.
- [`EdmondsKarp`] is an iterator; every step finds a shortest augmenting path by BFS, pushes
  its bottleneck capacity and returns the augmentation. After the last step the vertices still
  reachable from `s` form the source side of a minimum cut.
- [`MinEdgeCutSt`] is the interface of minimum `(s, t)`-edge-cut solvers, consumed by the vertex cut
  reduction in [`MinVertexCut`](super::MinVertexCut). [`EdmondsKarpMinCut`] implements it.
*/

use std::collections::VecDeque;

use num::{Saturating, Zero};
use tracing::{debug, trace};

use super::*;

/// Arc index of a [`ResidualNetwork`]
type Arc = u32;

const INVALID_ARC: Arc = Arc::MAX;

/// Residual capacities of a flow network with a designated source and target
#[derive(Debug, Clone)]
pub struct ResidualNetwork<W> {
    source: Node,
    target: Node,
    heads: Vec<Node>,
    residual: Vec<W>,
    out_arcs: SlicedBuffer<Arc>,
}

impl<W: Weight> ResidualNetwork<W> {
    /// Builds the residual network of `graph` with edge capacities `capacities`.
    ///
    /// Fails if `source` or `target` is out of range, if they coincide, or if a capacity is negative.
    pub fn new<G, F>(graph: &G, capacities: &F, source: Node, target: Node) -> Result<Self>
    where
        G: IndexGraph,
        F: WeightFunction<Weight = W> + ?Sized,
    {
        graph.check_node(source)?;
        graph.check_node(target)?;
        if source == target {
            return Err(GraphError::IdenticalEndpoints(source));
        }
        capacities.check_non_negative(graph.number_of_edges())?;

        let m = graph.number_of_edges() as usize;
        let mut heads = Vec::with_capacity(2 * m);
        let mut residual = Vec::with_capacity(2 * m);
        let mut tails = Vec::with_capacity(2 * m);

        for (e, Edge(u, v)) in graph.edges().enumerate() {
            let capacity = capacities.weight(e as EdgeId);
            let backward = if graph.is_directed() {
                W::zero()
            } else {
                capacity
            };

            tails.extend([(u, (2 * e) as Arc), (v, (2 * e + 1) as Arc)]);
            heads.extend([v, u]);
            residual.extend([capacity, backward]);
        }

        Ok(Self {
            source,
            target,
            heads,
            residual,
            out_arcs: SlicedBuffer::from_keyed(graph.number_of_nodes(), tails),
        })
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn target(&self) -> Node {
        self.target
    }

    /// Returns the number of vertices of the network
    pub fn number_of_nodes(&self) -> NumNodes {
        self.out_arcs.len() as NumNodes
    }

    /// Remaining capacity of edge `e` in its own direction
    pub fn residual_capacity(&self, e: EdgeId) -> W {
        self.residual[2 * e as usize]
    }

    #[inline]
    fn push(&mut self, arc: Arc, amount: W) {
        let arc = arc as usize;
        self.residual[arc] = self.residual[arc] - amount;
        self.residual[arc ^ 1] = self.residual[arc ^ 1].saturating_add(amount);
    }
}

/// Implementation of the Edmonds–Karp algorithm for maximum `(s, t)`-flows.
///
/// Each iteration step augments along one shortest path with positive residual capacity and
/// returns its edge ids (from `s` to `t`) together with the amount pushed.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// let g = CsrGraph::directed(4, [(0, 1), (0, 2), (1, 3), (2, 3), (1, 2)]);
/// let capacities = vec![3u32, 2, 1, 4, 5];
///
/// let mut flow = EdmondsKarp::new(ResidualNetwork::new(&g, &capacities, 0, 3).unwrap());
/// flow.by_ref().for_each(drop);
/// assert_eq!(flow.flow_value(), 5);
/// ```
pub struct EdmondsKarp<W> {
    network: ResidualNetwork<W>,
    predecessor: Vec<Arc>,
    source_side: NodeBitSet,
    queue: VecDeque<Node>,
    flow_value: W,
    exhausted: bool,
}

impl<W: Weight> EdmondsKarp<W> {
    pub fn new(network: ResidualNetwork<W>) -> Self {
        let n = network.number_of_nodes();
        Self {
            network,
            predecessor: vec![INVALID_ARC; n as usize],
            source_side: NodeBitSet::new(n),
            queue: VecDeque::new(),
            flow_value: W::zero(),
            exhausted: false,
        }
    }

    /// Searches a shortest augmenting path. Afterwards `source_side` holds all vertices
    /// reachable from the source in the residual network, or at least those discovered
    /// before the target was found.
    fn bfs(&mut self) -> bool {
        let (s, t) = (self.network.source, self.network.target);

        self.source_side.clear_all();
        self.source_side.set_bit(s);
        self.queue.clear();
        self.queue.push_back(s);

        while let Some(u) = self.queue.pop_front() {
            for &arc in &self.network.out_arcs[u] {
                if self.network.residual[arc as usize] <= W::zero() {
                    continue;
                }

                let v = self.network.heads[arc as usize];
                if !self.source_side.set_bit(v) {
                    self.predecessor[v as usize] = arc;
                    if v == t {
                        return true;
                    }
                    self.queue.push_back(v);
                }
            }
        }

        false
    }

    /// Value of the flow pushed so far
    pub fn flow_value(&self) -> W {
        self.flow_value
    }

    /// Runs the algorithm to completion and returns the maximum flow value
    pub fn max_flow_value(&mut self) -> W {
        self.by_ref().for_each(drop);
        self.flow_value
    }

    /// Vertices reachable from the source in the residual network.
    /// Once the iterator is exhausted this is the source side of a minimum cut.
    pub fn source_side(&self) -> &NodeBitSet {
        &self.source_side
    }

    /// Returns the residual network
    pub fn network(&self) -> &ResidualNetwork<W> {
        &self.network
    }
}

impl<W: Weight> Iterator for EdmondsKarp<W> {
    type Item = (Vec<EdgeId>, W);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || !self.bfs() {
            self.exhausted = true;
            return None;
        }

        let (s, t) = (self.network.source, self.network.target);

        let mut arcs = Vec::new();
        let mut v = t;
        while v != s {
            let arc = self.predecessor[v as usize];
            arcs.push(arc);
            v = self.network.heads[(arc ^ 1) as usize];
        }

        let amount = arcs
            .iter()
            .map(|&arc| self.network.residual[arc as usize])
            .min()
            .unwrap_or_else(W::zero);

        for &arc in &arcs {
            self.network.push(arc, amount);
        }
        self.flow_value = self.flow_value.saturating_add(amount);

        trace!(length = arcs.len(), amount = ?amount, "augmenting path");
        Some((arcs.into_iter().rev().map(|arc| arc / 2).collect(), amount))
    }
}

/// A set of edges separating a source from a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCut<W> {
    edges: Vec<EdgeId>,
    source_side: NodeBitSet,
    weight: W,
}

impl<W: Weight> EdgeCut<W> {
    /// Cut edges in increasing order
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Vertices on the source side of the cut
    pub fn source_side(&self) -> &NodeBitSet {
        &self.source_side
    }

    /// Total weight of the cut edges
    pub fn weight(&self) -> W {
        self.weight
    }
}

/// Solver for minimum `(s, t)`-edge-cuts with non-negative edge weights
pub trait MinEdgeCutSt {
    /// Returns a minimum weight edge set whose removal leaves no path from `source` to `sink`.
    /// In undirected graphs edges are usable in both directions.
    ///
    /// Fails if an endpoint is out of range, `source == sink`, or a weight is negative.
    fn min_st_edge_cut<G, F>(
        &self,
        graph: &G,
        weights: &F,
        source: Node,
        sink: Node,
    ) -> Result<EdgeCut<F::Weight>>
    where
        G: IndexGraph,
        F: WeightFunction + ?Sized;
}

/// [`MinEdgeCutSt`] via the maximum flow computed by [`EdmondsKarp`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EdmondsKarpMinCut;

impl MinEdgeCutSt for EdmondsKarpMinCut {
    fn min_st_edge_cut<G, F>(
        &self,
        graph: &G,
        weights: &F,
        source: Node,
        sink: Node,
    ) -> Result<EdgeCut<F::Weight>>
    where
        G: IndexGraph,
        F: WeightFunction + ?Sized,
    {
        let network = ResidualNetwork::new(graph, weights, source, sink)?;
        let mut flow = EdmondsKarp::new(network);
        let flow_value = flow.max_flow_value();
        let source_side = flow.source_side;

        let edges: Vec<EdgeId> = graph
            .edge_ids()
            .filter(|&e| {
                let Edge(u, v) = graph.edge(e);
                let (su, sv) = (source_side.get_bit(u), source_side.get_bit(v));
                if graph.is_directed() { su && !sv } else { su != sv }
            })
            .collect();

        let weight = edges.iter().fold(F::Weight::zero(), |acc, &e| {
            acc.saturating_add(weights.weight(e))
        });
        debug_assert_eq!(weight, flow_value);

        debug!(
            n = graph.number_of_nodes(),
            m = graph.number_of_edges(),
            source,
            sink,
            cut_edges = edges.len(),
            weight = ?weight,
            "computed minimum edge cut"
        );

        Ok(EdgeCut {
            edges,
            source_side,
            weight,
        })
    }
}
