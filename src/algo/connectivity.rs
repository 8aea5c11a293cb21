use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// Strong and weak connectivity of index graphs
pub trait Connectivity: IndexGraph {
    /// Returns the lazy Tarjan iterator over the strongly connected components.
    /// In undirected graphs its components are the connected components.
    fn strongly_connected_components_iter(&self) -> StronglyConnectedComponents<'_, Self> {
        StronglyConnectedComponents::new(self)
    }

    /// Partitions the graph into its strongly connected components. Class ids follow the order
    /// in which Tarjan's algorithm completes the components, i.e. a reverse topological order of
    /// the condensation. Undirected graphs are partitioned into their (weakly) connected components.
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// let g = CsrGraph::directed(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
    /// let sccs = g.strongly_connected_components();
    ///
    /// assert_eq!(sccs.number_of_classes(), 2);
    /// assert!(sccs.in_same_class(0, 2));
    /// assert!(!sccs.in_same_class(2, 3));
    /// ```
    fn strongly_connected_components(&self) -> VertexPartition {
        if self.is_undirected() {
            return self.weakly_connected_components();
        }

        let mut classes = vec![INVALID_NODE; self.len()];
        let mut number_of_classes = 0;
        for component in self.strongly_connected_components_iter() {
            for u in component {
                classes[u as usize] = number_of_classes;
            }
            number_of_classes += 1;
        }

        debug!(
            n = self.number_of_nodes(),
            m = self.number_of_edges(),
            components = number_of_classes,
            "computed strongly connected components"
        );
        VertexPartition::from_classes(number_of_classes, classes)
    }

    /// Partitions the graph into the connected components of its underlying undirected graph.
    /// Class ids follow the order of the smallest vertex of each component.
    fn weakly_connected_components(&self) -> VertexPartition {
        let mut classes = vec![INVALID_NODE; self.len()];
        let mut number_of_classes = 0;

        if let Ok(bfs) = Bfs::new(self, 0) {
            let mut bfs = bfs.direction(EdgeDirection::Both);
            loop {
                for u in bfs.by_ref() {
                    classes[u as usize] = number_of_classes;
                }
                number_of_classes += 1;

                if bfs.try_restart_at_unvisited().is_none() {
                    break;
                }
            }
        }

        debug!(
            n = self.number_of_nodes(),
            m = self.number_of_edges(),
            components = number_of_classes,
            "computed weakly connected components"
        );
        VertexPartition::from_classes(number_of_classes, classes)
    }

    /// Returns *true* if every vertex can reach every other vertex. Stops as soon as the first
    /// component is complete, without computing the full partition. The empty graph is
    /// strongly connected.
    fn is_strongly_connected(&self) -> bool {
        if self.is_undirected() {
            return self.is_weakly_connected();
        }

        self.strongly_connected_components_iter()
            .next()
            .is_none_or(|first| first.len() == self.len())
    }

    /// Returns *true* if the underlying undirected graph is connected.
    /// The empty graph is weakly connected.
    fn is_weakly_connected(&self) -> bool {
        match Bfs::new(self, 0) {
            Ok(bfs) => bfs.direction(EdgeDirection::Both).count() == self.len(),
            Err(_) => true,
        }
    }
}

impl<G> Connectivity for G where G: IndexGraph {}

/// Lazy Tarjan search yielding one strongly connected component per step.
///
/// A component is emitted as soon as its root is finished, so components arrive in reverse
/// topological order of the condensation: no emitted component has an edge into a later one.
/// Within a component the root comes first, the remaining vertices follow in visiting order.
///
/// The search can be restricted to the vertices `>= bound` via [`Self::lower_bound`] and can
/// skip components of a single vertex without a self-loop via [`Self::include_singletons`].
pub struct StronglyConnectedComponents<'a, G>
where
    G: IndexGraph + 'a,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: Node,
    lower_bound: Node,

    include_singletons: bool,

    path_stack: Vec<Node>,

    call_stack: Vec<StackFrame<'a, G>>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: IndexGraph,
{
    /// Creates the search over all vertices, emitting singletons
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,
            lower_bound: 0,

            include_singletons: true,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// With `include = false`, a vertex lying on no cycle (self-loops count as cycles) is
    /// dropped instead of being emitted as a component of its own
    pub fn set_include_singletons(&mut self, include: bool) {
        self.include_singletons = include;
    }

    pub fn include_singletons(mut self, include: bool) -> Self {
        self.set_include_singletons(include);
        self
    }

    /// Restricts the search to the subgraph induced by the vertices `>= bound`; edges into
    /// smaller vertices are ignored. The first search tree is rooted at `bound`.
    /// Must be called before the first step.
    pub fn set_lower_bound(&mut self, bound: Node) {
        debug_assert!(self.call_stack.is_empty() && self.idx == 0);
        self.lower_bound = bound;
        self.potentially_unvisited = bound;
    }

    pub fn lower_bound(mut self, bound: Node) -> Self {
        self.set_lower_bound(bound);
        self
    }

    /// Roots the next search tree at the smallest unvisited vertex `>= lower_bound`
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.number_of_nodes() {
            if !self.states[self.potentially_unvisited as usize].visited {
                let v = self.potentially_unvisited;
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            has_loop: false,
            edges: self.graph.out_edges_of(node),
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        // Every frame of `call_stack` is a suspended DFS call together with its remaining
        // out-edges. A vertex is the root of its component iff no vertex of its subtree reaches
        // a vertex with smaller index that is still on `path_stack`; the component is then the
        // suffix of `path_stack` starting at the root. Returning a component suspends the
        // search, the next call continues with the topmost frame.
        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len() as Node;

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            for IncidentEdge { endpoint: w, .. } in frame.edges.by_ref() {
                if w < self.lower_bound {
                    continue;
                }

                let w_state = self.states[w as usize];
                frame.has_loop |= w == v;

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
            }

            let frame = self.call_stack.pop()?;
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                if !self.include_singletons && self.path_stack.last() == Some(&v) && !frame.has_loop
                {
                    // acyclic singleton
                    self.states[v as usize].on_stack = false;
                    self.path_stack.pop();
                } else {
                    let component = self
                        .path_stack
                        .drain(frame.initial_stack_len as usize..)
                        .collect_vec();

                    for &w in &component {
                        self.states[w as usize].on_stack = false;
                    }

                    debug_assert_eq!(component.first(), Some(&v));
                    trace!(root = v, size = component.len(), "strongly connected component");

                    return Some(component);
                }
            }
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: IndexGraph,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: IndexGraph {}

struct StackFrame<'a, G>
where
    G: IndexGraph + 'a,
{
    node: Node,
    parent: Node,
    initial_stack_len: Node,
    first_call: bool,
    has_loop: bool,
    edges: G::EdgeIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, u: Node) {
        debug_assert!(!self.visited);
        self.index = u;
        self.low_link = u;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// Sorts the nodes in each component increasingly and then the components themselves lexicographically.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}
