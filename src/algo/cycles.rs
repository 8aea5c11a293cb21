/*!
# Elementary Cycles

Lazy enumeration of all elementary (simple) cycles of a directed graph following Johnson's
algorithm. Cycles are grouped by their smallest vertex `s`: for `s = 0, 1, ...` the search runs
inside the strongly connected component of `s` in the subgraph induced by the vertices `>= s`,
so every cycle is reported exactly once, at its smallest vertex.

A vertex on the current path is *blocked*. When the search backtracks over a vertex `u` whose
subtree closed no cycle, `u` stays blocked and is registered in the blocking sets of its
neighbors; it is only released once one of them takes part in a cycle. This bounds the work
between two consecutive cycles by `O(n + m)`.
*/

use std::iter::FusedIterator;

use fxhash::FxHashSet;
use tracing::{debug, trace};

use super::*;

/// Iterator over the elementary cycles of a directed graph without parallel edges.
///
/// Each call to `next` resumes the search where the previous cycle was reported and returns the
/// next cycle as a closed [`Path`] starting at its smallest vertex.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// // a directed triangle with one chord closing a second cycle
/// let g = CsrGraph::directed(3, [(0, 1), (1, 2), (2, 0), (2, 1)]);
/// let cycles: Vec<_> = g.elementary_cycles().unwrap().map(|c| c.into_edges()).collect();
///
/// assert_eq!(cycles, vec![vec![0, 1, 2], vec![1, 3]]);
/// ```
pub struct Cycles<'a, G>
where
    G: IndexGraph + 'a,
{
    graph: &'a G,
    start: Node,

    /// component labels of the subgraph induced by `scc_bound..n`
    scc_labels: Vec<NumNodes>,
    scc_sizes: Vec<NumNodes>,
    scc_bound: Node,

    is_blocked: NodeBitSet,
    blocking_sets: Vec<FxHashSet<Node>>,
    unblock_stack: Vec<Node>,

    path: Vec<EdgeId>,
    edge_iters: Vec<G::EdgeIter<'a>>,

    /// Deepest path length at which a cycle was closed since that depth was last left.
    /// A cycle found at depth `d` counts as found for every depth `< d` as well, so one
    /// value replaces a flag per depth.
    cycle_found_depth: Option<usize>,

    cycles_found: u64,
}

impl<'a, G> Cycles<'a, G>
where
    G: IndexGraph,
{
    /// Prepares the enumeration.
    ///
    /// Returns `Err(DirectedOnly)` for undirected graphs and `Err(ParallelEdges)` if two edges
    /// share source and target, as blocking works on vertices and cannot tell parallel routes apart.
    pub fn new(graph: &'a G) -> Result<Self> {
        graph.check_directed("cycle enumeration")?;
        if graph.has_parallel_edges() {
            return Err(GraphError::ParallelEdges("cycle enumeration"));
        }

        let n = graph.len();
        let mut cycles = Self {
            graph,
            start: 0,
            scc_labels: vec![INVALID_NODE; n],
            scc_sizes: Vec::new(),
            scc_bound: 0,
            is_blocked: graph.vertex_bitset_unset(),
            blocking_sets: vec![FxHashSet::default(); n],
            unblock_stack: Vec::new(),
            path: Vec::new(),
            edge_iters: Vec::new(),
            cycle_found_depth: None,
            cycles_found: 0,
        };

        cycles.choose_component();
        cycles.begin_start_vertex();
        Ok(cycles)
    }

    /// Number of cycles returned so far
    pub fn number_of_cycles_found(&self) -> u64 {
        self.cycles_found
    }

    /// Like `next` but reports exhaustion as [`GraphError::ExhaustedIterator`]
    pub fn try_next(&mut self) -> Result<Path> {
        self.next().ok_or(GraphError::ExhaustedIterator)
    }

    /// Computes the strongly connected components of the subgraph induced by `start..n` and
    /// moves `start` forward to the first vertex that lies on a cycle within it.
    fn choose_component(&mut self) {
        let n = self.graph.number_of_nodes();
        if self.start >= n {
            return;
        }

        self.scc_bound = self.start;
        self.scc_labels.fill(INVALID_NODE);
        self.scc_sizes.clear();
        for component in StronglyConnectedComponents::new(self.graph).lower_bound(self.start) {
            let label = self.scc_sizes.len() as NumNodes;
            for &u in &component {
                self.scc_labels[u as usize] = label;
            }
            self.scc_sizes.push(component.len() as NumNodes);
        }

        // removing vertices outside of any cycle does not change the other components
        while self.start < n {
            let label = self.scc_labels[self.start as usize];
            if self.scc_sizes[label as usize] > 1 || self.graph.contains_edge(self.start, self.start)
            {
                break;
            }
            self.start += 1;
        }
    }

    /// Clears the blocking state and puts the root frame of `start` on the stack
    fn begin_start_vertex(&mut self) {
        if self.start >= self.graph.number_of_nodes() {
            return;
        }

        debug_assert!(self.path.is_empty() && self.unblock_stack.is_empty());
        self.is_blocked.clear_all();
        self.blocking_sets.iter_mut().for_each(|set| set.clear());
        self.cycle_found_depth = None;

        self.edge_iters.push(self.graph.out_edges_of(self.start));
        self.is_blocked.set_bit(self.start);
        trace!(start = self.start, "searching cycles");
    }

    fn unblock(&mut self, mut v: Node) {
        self.is_blocked.clear_bit(v);
        loop {
            for u in self.blocking_sets[v as usize].drain() {
                if self.is_blocked.clear_bit(u) {
                    self.unblock_stack.push(u);
                }
            }

            match self.unblock_stack.pop() {
                Some(u) => v = u,
                None => break,
            }
        }
    }
}

impl<G> Iterator for Cycles<'_, G>
where
    G: IndexGraph,
{
    type Item = Path;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.graph.number_of_nodes();

        while self.start < n {
            let start = self.start;
            let component = self.scc_labels[start as usize];

            'dfs: while let Some(edges) = self.edge_iters.last_mut() {
                for IncidentEdge { id, endpoint: v } in edges.by_ref() {
                    if v < self.scc_bound || self.scc_labels[v as usize] != component {
                        continue;
                    }

                    if v == start {
                        let mut cycle = self.path.clone();
                        cycle.push(id);
                        self.cycle_found_depth = Some(self.path.len());
                        self.cycles_found += 1;
                        trace!(start, length = cycle.len(), "cycle");
                        return Some(Path::new(start, start, cycle));
                    } else if !self.is_blocked.get_bit(v) {
                        self.path.push(id);
                        self.edge_iters.push(self.graph.out_edges_of(v));
                        self.is_blocked.set_bit(v);
                        continue 'dfs;
                    }
                }

                // backtrack over the vertex at the end of the path
                debug_assert!(self.cycle_found_depth.is_none_or(|d| d <= self.path.len()));
                let cycle_found = self.cycle_found_depth == Some(self.path.len());

                let u = self
                    .path
                    .pop()
                    .map_or(start, |e| self.graph.edge_target(e));

                if let Some(depth) = self.cycle_found_depth.filter(|_| cycle_found) {
                    self.unblock(u);
                    self.cycle_found_depth = depth.checked_sub(1);
                } else {
                    for IncidentEdge { endpoint: v, .. } in self.graph.out_edges_of(u) {
                        if v >= self.scc_bound && self.scc_labels[v as usize] == component {
                            self.blocking_sets[v as usize].insert(u);
                        }
                    }
                }

                self.edge_iters.pop();
            }

            self.start += 1;
            self.choose_component();
            self.begin_start_vertex();
        }

        if self.start == n {
            // report only once
            self.start += 1;
            debug!(
                n,
                m = self.graph.number_of_edges(),
                cycles = self.cycles_found,
                "enumerated elementary cycles"
            );
        }
        None
    }
}

impl<G> FusedIterator for Cycles<'_, G> where G: IndexGraph {}

/// Cycle enumeration as methods on graphs
pub trait CycleEnumeration: IndexGraph {
    /// Lazily enumerates all elementary cycles of a directed graph without parallel edges,
    /// see [`Cycles`]
    fn elementary_cycles(&self) -> Result<Cycles<'_, Self>> {
        Cycles::new(self)
    }

    /// Returns *true* if the directed graph has no cycle, self-loops included
    fn is_acyclic(&self) -> Result<bool> {
        self.check_directed("acyclicity test")?;
        let sccs = self.strongly_connected_components();
        Ok(sccs.number_of_classes() == self.number_of_nodes()
            && self.vertices().all(|u| !self.contains_edge(u, u)))
    }
}

impl<G> CycleEnumeration for G where G: IndexGraph {}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;
    use crate::testing::*;

    fn cycles_of(graph: &CsrGraph) -> Vec<Vec<EdgeId>> {
        graph
            .elementary_cycles()
            .unwrap()
            .map(|c| c.into_edges())
            .collect()
    }

    #[test]
    fn triangle_with_chord() {
        let graph = CsrGraph::directed(3, [(0, 1), (1, 2), (2, 0), (2, 1)]);
        let mut cycles = graph.elementary_cycles().unwrap();

        let first = cycles.try_next().unwrap();
        assert_eq!((first.source(), first.edges()), (0, &[0, 1, 2][..]));
        let second = cycles.try_next().unwrap();
        assert_eq!((second.source(), second.edges()), (1, &[1, 3][..]));

        assert_eq!(cycles.try_next(), Err(GraphError::ExhaustedIterator));
        assert_eq!(cycles.try_next(), Err(GraphError::ExhaustedIterator));
        assert_eq!(cycles.number_of_cycles_found(), 2);
    }

    #[test]
    fn self_loops_and_acyclic_parts() {
        // 0 -> 1 -> 2 -> 3 with a loop at 2 and the two cycle 3 <-> 4
        let graph = CsrGraph::directed(5, [(0, 1), (1, 2), (2, 2), (2, 3), (3, 4), (4, 3)]);
        assert_eq!(cycles_of(&graph), vec![vec![2], vec![4, 5]]);
        assert!(!graph.is_acyclic().unwrap());

        let dag = CsrGraph::directed(4, [(0, 1), (1, 2), (0, 2), (2, 3)]);
        assert!(cycles_of(&dag).is_empty());
        assert!(dag.is_acyclic().unwrap());
    }

    #[test]
    fn complete_digraph() {
        // K_4 with both orientations: 6 two-cycles, 8 triangles and 6 four-cycles
        let graph = CsrGraph::directed(
            4,
            (0..4).flat_map(|u| (0..4).filter(move |&v| v != u).map(move |v| (u, v))),
        );

        let cycles = cycles_of(&graph);
        assert_eq!(cycles.len(), 20);
        assert_eq!(cycles.iter().unique().count(), 20);
        for edges in &cycles {
            let source = graph.edge_source(edges[0]);
            let path = Path::new(source, source, edges.clone());
            assert!(Path::is_path(&graph, source, source, edges));
            assert!(path.is_simple(&graph));
            assert_eq!(path.vertices(&graph).into_iter().min(), Some(source));
        }
    }

    #[test]
    fn long_cycle() {
        // assert that we can deal with very deep stacks
        let n: Node = 10_000;
        let graph = CsrGraph::directed(n, (0..n).map(|u| (u, (u + 1) % n)));
        let cycles = cycles_of(&graph);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n as usize);
    }

    #[test]
    fn preconditions() {
        let undirected = CsrGraph::undirected(2, [(0, 1)]);
        assert_eq!(
            undirected.elementary_cycles().err(),
            Some(GraphError::DirectedOnly("cycle enumeration"))
        );

        let parallel = CsrGraph::directed(2, [(0, 1), (1, 0), (0, 1)]);
        assert_eq!(
            parallel.elementary_cycles().err(),
            Some(GraphError::ParallelEdges("cycle enumeration"))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        // the single depth counter must unblock exactly like a flag per depth
        #[test]
        fn matches_brute_force(seed in any::<u64>(), n in 1u32..8, deg in 0.5f64..3.5) {
            let graph = random_small_graph(seed, n, deg, true);
            prop_assume!(!graph.has_parallel_edges());

            let mut found = cycles_of(&graph);
            let total = found.len();
            found.sort();
            found.dedup();
            prop_assert_eq!(found.len(), total);

            let mut expected = brute_force_cycles(&graph);
            expected.sort();
            prop_assert_eq!(found, expected);
        }
    }
}
