/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- [`Dfs`]: a depth-first search producing vertices in preorder, with the edge path from the start
  to the most recently produced vertex maintained incrementally.
- [`Bfs`]: a breadth-first search recording, per discovered vertex, the edge it was reached by
  and its layer (distance from the start).
- [`TraversalTree`]: turns a traversal into its implied tree of parent edges.
- [`Traversal`]: exposes traversals and reachability queries directly as methods on graphs.

Both searches are lazy, single-pass iterators. Calling [`Dfs::try_next`] / [`Bfs::try_next`]
after the end yields [`GraphError::ExhaustedIterator`]; plain `Iterator::next` simply keeps
returning `None`. The graph must not change while a search is alive.
*/

use std::{collections::VecDeque, iter::FusedIterator};

use super::*;

/// Which incidences of a vertex a search follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeDirection {
    /// Follow edges from source to target (all edges in undirected graphs)
    #[default]
    Outgoing,
    /// Follow edges from target to source
    Incoming,
    /// Ignore orientation, i.e. search the underlying undirected graph
    Both,
}

impl EdgeDirection {
    /// Calls `f` for every incidence of `u` selected by this direction
    #[inline]
    pub(crate) fn for_each_incidence<G, F>(self, graph: &G, u: Node, mut f: F)
    where
        G: IndexGraph,
        F: FnMut(IncidentEdge),
    {
        match self {
            EdgeDirection::Outgoing => graph.out_edges_of(u).for_each(f),
            EdgeDirection::Incoming => graph.in_edges_of(u).for_each(f),
            EdgeDirection::Both => {
                graph.out_edges_of(u).for_each(&mut f);
                if graph.is_directed() {
                    graph.in_edges_of(u).for_each(f);
                }
            }
        }
    }
}

/// Iterative depth-first search.
///
/// The recursion of the textbook algorithm is replaced by a stack of frames, one per vertex on
/// the current path, each holding the cursor into that vertex's outgoing edges. The path
/// itself is kept as a list of edge ids that grows and shrinks with the frame stack, so
/// [`Dfs::edge_path`] is available after every step without any reconstruction.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// let g = CsrGraph::directed(4, [(0, 1), (1, 2), (0, 3)]);
/// let mut dfs = g.dfs(0).unwrap();
///
/// assert_eq!(dfs.next(), Some(0));
/// assert_eq!(dfs.next(), Some(1));
/// assert_eq!(dfs.next(), Some(2));
/// assert_eq!(dfs.edge_path(), &[0, 1]);
/// assert_eq!(dfs.next(), Some(3));
/// assert_eq!(dfs.edge_path(), &[2]);
/// assert_eq!(dfs.next(), None);
/// assert_eq!(dfs.try_next(), Err(GraphError::ExhaustedIterator));
/// ```
pub struct Dfs<'a, G>
where
    G: IndexGraph + 'a,
{
    graph: &'a G,
    start: Node,
    visited: NodeBitSet,
    frames: Vec<(Node, G::EdgeIter<'a>)>,
    edge_path: Vec<EdgeId>,
    started: bool,
}

impl<'a, G> Dfs<'a, G>
where
    G: IndexGraph,
{
    /// Creates a new search starting at `start`
    pub fn new(graph: &'a G, start: Node) -> Result<Self> {
        graph.check_node(start)?;

        let mut visited = graph.vertex_bitset_unset();
        visited.set_bit(start);

        Ok(Self {
            graph,
            start,
            visited,
            frames: vec![(start, graph.out_edges_of(start))],
            edge_path: Vec::new(),
            started: false,
        })
    }

    /// Excludes a node from the search. It will be treated as if it was already visited.
    /// Has no effect on the start node or on nodes already produced.
    pub fn exclude_node(&mut self, u: Node) {
        self.visited.set_bit(u);
    }

    /// Excludes multiple nodes from the search (see [`Dfs::exclude_node`])
    pub fn with_nodes_excluded<I>(mut self, us: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        for u in us {
            self.exclude_node(u);
        }
        self
    }

    /// Edge ids from the start to the vertex most recently returned by `next`
    pub fn edge_path(&self) -> &[EdgeId] {
        &self.edge_path
    }

    /// The path from the start to the vertex most recently returned by `next`
    pub fn path(&self) -> Path {
        let target = self.frames.last().map_or(self.start, |&(u, _)| u);
        Path::new(self.start, target, self.edge_path.clone())
    }

    /// Number of edges on the current path
    pub fn depth(&self) -> usize {
        self.edge_path.len()
    }

    /// Returns *true* if `u` was already produced or excluded
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Like `next` but reports exhaustion as [`GraphError::ExhaustedIterator`]
    pub fn try_next(&mut self) -> Result<Node> {
        self.next().ok_or(GraphError::ExhaustedIterator)
    }
}

impl<G> Iterator for Dfs<'_, G>
where
    G: IndexGraph,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.start);
        }

        while let Some((_, edges)) = self.frames.last_mut() {
            if let Some(ie) = edges.find(|ie| !self.visited.get_bit(ie.endpoint)) {
                self.visited.set_bit(ie.endpoint);
                self.frames
                    .push((ie.endpoint, self.graph.out_edges_of(ie.endpoint)));
                self.edge_path.push(ie.id);
                return Some(ie.endpoint);
            }

            // only the root frame has no edge on the path
            self.frames.pop();
            self.edge_path.pop();
        }

        None
    }
}

impl<G> FusedIterator for Dfs<'_, G> where G: IndexGraph {}

/// `(edge, layer)` of a vertex discovered by a [`Bfs`], packed into one word:
/// the upper half holds the edge id (or [`INVALID_EDGE`] for the start), the lower half the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeLayer(u64);

impl EdgeLayer {
    pub(crate) const UNDISCOVERED: Self = Self(u64::MAX);

    #[inline]
    pub(crate) fn new(edge: Option<EdgeId>, layer: NumNodes) -> Self {
        let edge = edge.unwrap_or(INVALID_EDGE);
        debug_assert!(edge != INVALID_EDGE || layer == 0);
        Self(((edge as u64) << 32) | layer as u64)
    }

    #[inline]
    pub(crate) fn edge(self) -> Option<EdgeId> {
        let e = (self.0 >> 32) as EdgeId;
        (e != INVALID_EDGE).then_some(e)
    }

    #[inline]
    pub(crate) fn layer(self) -> NumNodes {
        self.0 as NumNodes
    }
}

/// Breadth-first search with a FIFO frontier.
///
/// For every discovered vertex the search stores the edge it was discovered by and its layer,
/// i.e. its (unweighted) distance from the start. Vertices are returned in non-decreasing layer
/// order.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// let g = CsrGraph::undirected(4, [(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let mut bfs = g.bfs(0).unwrap();
///
/// let layers: Vec<_> = std::iter::from_fn(|| bfs.next().map(|_| bfs.layer())).collect();
/// assert_eq!(layers, vec![0, 1, 1, 2]);
/// assert_eq!(bfs.distance_to(3), Some(2));
/// ```
pub struct Bfs<'a, G>
where
    G: IndexGraph,
{
    graph: &'a G,
    start: Node,
    direction: EdgeDirection,
    visited: NodeBitSet,
    records: Vec<EdgeLayer>,
    queue: VecDeque<Node>,
    last: Option<Node>,
    stop_at: Option<Node>,
    potentially_unvisited: Node,
}

impl<'a, G> Bfs<'a, G>
where
    G: IndexGraph,
{
    /// Creates a new search starting at `start`
    pub fn new(graph: &'a G, start: Node) -> Result<Self> {
        graph.check_node(start)?;

        let mut bfs = Self {
            graph,
            start,
            direction: EdgeDirection::Outgoing,
            visited: graph.vertex_bitset_unset(),
            records: vec![EdgeLayer::UNDISCOVERED; graph.len()],
            queue: VecDeque::with_capacity(32),
            last: None,
            stop_at: None,
            potentially_unvisited: 0,
        };
        bfs.discover(start, None, 0);
        Ok(bfs)
    }

    fn discover(&mut self, u: Node, edge: Option<EdgeId>, layer: NumNodes) {
        self.visited.set_bit(u);
        self.records[u as usize] = EdgeLayer::new(edge, layer);
        self.queue.push_back(u);
    }

    /// Sets which incidences are followed. Must be called before the first step.
    pub fn set_direction(&mut self, direction: EdgeDirection) {
        self.direction = direction;
    }

    /// Sets which incidences are followed (see [`Bfs::set_direction`])
    pub fn direction(mut self, direction: EdgeDirection) -> Self {
        self.set_direction(direction);
        self
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node (see [`Bfs::set_stop_at`])
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Excludes a node from the search. It will be treated as if it was already visited,
    /// i.e. no edges to or from that node will be taken. No effect on already discovered nodes.
    pub fn exclude_node(&mut self, u: Node) {
        self.visited.set_bit(u);
    }

    /// Excludes multiple nodes from the search (see [`Bfs::exclude_node`])
    pub fn with_nodes_excluded<I>(mut self, us: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        for u in us {
            self.exclude_node(u);
        }
        self
    }

    /// Tries to restart the search at a yet unvisited node and returns it if successful.
    /// Requires that the search came to a hold earlier, i.e. `next()` returned `None`.
    /// The restarted tree gets layer `0` at its new root.
    pub fn try_restart_at_unvisited(&mut self) -> Option<Node> {
        debug_assert!(self.queue.is_empty());
        let n = self.graph.number_of_nodes();
        while self.potentially_unvisited < n && self.visited.get_bit(self.potentially_unvisited) {
            self.potentially_unvisited += 1;
        }

        let u = self.potentially_unvisited;
        (u < n).then(|| {
            self.discover(u, None, 0);
            u
        })
    }

    /// Edge by which the vertex most recently returned was discovered (`None` for a root)
    pub fn last_edge(&self) -> Option<EdgeId> {
        self.last.and_then(|u| self.records[u as usize].edge())
    }

    /// Layer of the vertex most recently returned, i.e. its distance from the root
    /// (`0` before the first step)
    pub fn layer(&self) -> NumNodes {
        self.last.map_or(0, |u| self.records[u as usize].layer())
    }

    /// Edge by which `u` was discovered, if it was discovered and is no root
    pub fn parent_edge_of(&self, u: Node) -> Option<EdgeId> {
        self.records[u as usize].edge()
    }

    /// Distance of `u` from its root if `u` was discovered
    pub fn distance_to(&self, u: Node) -> Option<NumNodes> {
        let record = self.records[u as usize];
        (record != EdgeLayer::UNDISCOVERED).then(|| record.layer())
    }

    /// Reconstructs the path between the start and `u` from the discovery edges, if `u` was
    /// discovered in the tree of the start.
    ///
    /// For [`EdgeDirection::Incoming`] the path runs from `u` to the start, otherwise from the
    /// start to `u` (for [`EdgeDirection::Both`] in the underlying undirected graph).
    pub fn path_to(&self, u: Node) -> Option<Path> {
        self.distance_to(u)?;

        let mut edges = Vec::new();
        let mut v = u;
        while let Some(e) = self.records[v as usize].edge() {
            edges.push(e);
            v = self.graph.edge_endpoint(e, v);
        }

        if v != self.start {
            return None;
        }

        Some(if self.direction == EdgeDirection::Incoming {
            Path::new(u, self.start, edges)
        } else {
            edges.reverse();
            Path::new(self.start, u, edges)
        })
    }

    /// Returns *true* if `u` was discovered or excluded
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Like `next` but reports exhaustion as [`GraphError::ExhaustedIterator`]
    pub fn try_next(&mut self) -> Result<Node> {
        self.next().ok_or(GraphError::ExhaustedIterator)
    }
}

impl<G> Iterator for Bfs<'_, G>
where
    G: IndexGraph,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;
        self.last = Some(u);

        if self.stop_at == Some(u) {
            self.queue.clear();
        } else {
            let layer = self.records[u as usize].layer() + 1;
            self.direction.for_each_incidence(self.graph, u, |ie| {
                if !self.visited.set_bit(ie.endpoint) {
                    self.records[ie.endpoint as usize] = EdgeLayer::new(Some(ie.id), layer);
                    self.queue.push_back(ie.endpoint);
                }
            });
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.graph.len()))
    }
}

/// Extension trait for traversals that can report the edge by which the most recently
/// returned vertex was reached, enabling extraction of the implied spanning tree.
pub trait TraversalTree: Iterator<Item = Node> + Sized {
    /// Edge by which the vertex most recently returned was reached (`None` for a root)
    fn reaching_edge(&self) -> Option<EdgeId>;

    /// Number of vertices of the traversed graph
    fn graph_len(&self) -> usize;

    /// Consumes the traversal and returns for each vertex the edge to its parent in the
    /// traversal tree. Roots and unreached vertices get `None`.
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// let g = CsrGraph::undirected(4, [(0, 1), (1, 2), (0, 2), (2, 3)]);
    /// let parents = g.bfs(0).unwrap().parent_edges();
    /// let parents: Vec<_> = parents.iter().map(|e| e.map(|e| e.get())).collect();
    /// assert_eq!(parents, vec![None, Some(0), Some(2), Some(3)]);
    /// ```
    fn parent_edges(mut self) -> Vec<Option<OptionalEdge>> {
        let mut parents = vec![None; self.graph_len()];
        while let Some(u) = self.next() {
            parents[u as usize] = self.reaching_edge().and_then(OptionalEdge::new);
        }
        parents
    }

    /// Consumes the traversal and returns the tree edges in discovery order
    fn tree_edges(mut self) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        while self.next().is_some() {
            edges.extend(self.reaching_edge());
        }
        edges
    }
}

impl<G> TraversalTree for Dfs<'_, G>
where
    G: IndexGraph,
{
    fn reaching_edge(&self) -> Option<EdgeId> {
        self.edge_path.last().copied()
    }

    fn graph_len(&self) -> usize {
        self.graph.len()
    }
}

impl<G> TraversalTree for Bfs<'_, G>
where
    G: IndexGraph,
{
    fn reaching_edge(&self) -> Option<EdgeId> {
        self.last_edge()
    }

    fn graph_len(&self) -> usize {
        self.graph.len()
    }
}

/// Traversal algorithms as methods on graphs
pub trait Traversal: IndexGraph {
    /// Depth-first search from `start` following outgoing edges
    fn dfs(&self, start: Node) -> Result<Dfs<'_, Self>> {
        Dfs::new(self, start)
    }

    /// Breadth-first search from `start` following outgoing edges
    fn bfs(&self, start: Node) -> Result<Bfs<'_, Self>> {
        Bfs::new(self, start)
    }

    /// Returns the set of all vertices reachable from `start` (including `start`)
    fn reachable_vertices(&self, start: Node) -> Result<NodeBitSet> {
        let mut reachable = self.vertex_bitset_unset();
        for u in self.bfs(start)? {
            reachable.set_bit(u);
        }
        Ok(reachable)
    }

    /// Returns a shortest (unweighted) path from `source` to `target`, or `None` if `target`
    /// is unreachable
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// let g = CsrGraph::directed(4, [(0, 1), (1, 2), (2, 3), (0, 2)]);
    /// assert_eq!(g.find_path(0, 3).unwrap().unwrap().edges(), &[3, 2]);
    /// assert!(g.find_path(3, 0).unwrap().is_none());
    /// ```
    fn find_path(&self, source: Node, target: Node) -> Result<Option<Path>> {
        self.check_node(target)?;
        let mut bfs = self.bfs(source)?.stop_at(target);
        bfs.by_ref().for_each(drop);
        Ok(bfs.path_to(target))
    }
}

impl<G> Traversal for G where G: IndexGraph {}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn bfs_order() {
        //  / 2 --- \
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = CsrGraph::directed(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        {
            let order = graph.bfs(1).unwrap().collect_vec();
            assert_eq!(order, vec![1, 2, 0, 4, 5, 3]);
        }

        {
            let order = Bfs::new(&graph, 5).unwrap().collect_vec();
            assert_eq!(order, [5, 4, 3]);
        }
    }

    #[test]
    fn bfs_layers_and_edges() {
        let graph = CsrGraph::directed(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);
        let mut bfs = graph.bfs(1).unwrap();

        let mut visits = Vec::new();
        while let Ok(u) = bfs.try_next() {
            visits.push((u, bfs.last_edge(), bfs.layer()));
        }

        assert_eq!(
            visits,
            vec![
                (1, None, 0),
                (2, Some(0), 1),
                (0, Some(1), 1),
                (4, Some(4), 2),
                (5, Some(3), 2),
                (3, Some(2), 3)
            ]
        );
        assert_eq!(bfs.try_next(), Err(GraphError::ExhaustedIterator));
        assert_eq!(bfs.path_to(3).unwrap().edges(), &[0, 4, 2]);
    }

    #[test]
    fn bfs_directions() {
        let graph = CsrGraph::directed(4, [(0, 1), (2, 1), (3, 2)]);

        assert_eq!(graph.bfs(1).unwrap().collect_vec(), vec![1]);
        assert_eq!(
            graph
                .bfs(1)
                .unwrap()
                .direction(EdgeDirection::Incoming)
                .collect_vec(),
            vec![1, 0, 2, 3]
        );

        let mut bfs = graph.bfs(1).unwrap().direction(EdgeDirection::Incoming);
        bfs.by_ref().for_each(drop);
        let path = bfs.path_to(3).unwrap();
        assert_eq!((path.source(), path.target()), (3, 1));
        assert!(Path::is_path(&graph, 3, 1, path.edges()));

        let mut bfs = graph.bfs(0).unwrap().direction(EdgeDirection::Both);
        assert_eq!(bfs.by_ref().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(bfs.distance_to(3), Some(3));
    }

    #[test]
    fn bfs_stopper_and_restart() {
        let graph = CsrGraph::directed(5, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.bfs(0).unwrap().stop_at(1).collect_vec(), vec![0, 1]);

        let mut bfs = graph.bfs(2).unwrap().with_nodes_excluded([3]);
        assert_eq!(bfs.by_ref().collect_vec(), vec![2]);
        assert_eq!(bfs.try_restart_at_unvisited(), Some(0));
        assert_eq!(bfs.by_ref().collect_vec(), vec![0, 1]);
        assert_eq!(bfs.try_restart_at_unvisited(), Some(4));
        assert_eq!(bfs.by_ref().collect_vec(), vec![4]);
        assert_eq!(bfs.try_restart_at_unvisited(), None);
    }

    #[test]
    fn dfs_order() {
        //  / 2
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = CsrGraph::directed(6, [(1, 2), (1, 0), (4, 3), (0, 5), (5, 4)]);

        assert_eq!(graph.dfs(1).unwrap().collect_vec(), vec![1, 2, 0, 5, 4, 3]);
        assert_eq!(graph.dfs(5).unwrap().collect_vec(), vec![5, 4, 3]);
    }

    #[test]
    fn dfs_edge_path_tracks_current_vertex() {
        let graph = CsrGraph::undirected(7, [(0, 1), (2, 1), (1, 3), (0, 4), (5, 4), (6, 6)]);
        let mut dfs = graph.dfs(0).unwrap();

        let mut seen = Vec::new();
        while let Some(u) = dfs.next() {
            assert_eq!(dfs.depth(), dfs.edge_path().len());

            let path = dfs.path();
            assert_eq!(path.target(), u);
            assert!(Path::is_path(&graph, 0, u, dfs.edge_path()));
            assert!(path.is_simple(&graph));
            seen.push(u);
        }

        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn dfs_tree() {
        let graph = CsrGraph::directed(6, [(1, 2), (1, 0), (4, 3), (0, 5), (5, 4)]);
        let tree = graph.dfs(1).unwrap().parent_edges();
        let tree = tree.iter().map(|e| e.map(|e| e.get())).collect_vec();
        assert_eq!(tree, vec![Some(1), None, Some(0), Some(2), Some(4), Some(3)]);

        assert_eq!(graph.dfs(1).unwrap().tree_edges(), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn dfs_deep_path() {
        // assert that we can deal with very deep stacks
        let n: Node = 100_000;
        let graph = CsrGraph::directed(n, (0..n - 1).map(|u| (u, u + 1)));

        let mut dfs = graph.dfs(0).unwrap();
        assert_eq!(dfs.by_ref().count(), n as usize);
        assert_eq!(dfs.try_next(), Err(GraphError::ExhaustedIterator));
    }

    #[test]
    fn find_path_and_reachability() {
        let graph = CsrGraph::directed(5, [(0, 1), (1, 2), (2, 0), (3, 4)]);

        let reachable = graph.reachable_vertices(1).unwrap();
        assert_eq!(reachable.iter_set_bits().collect_vec(), vec![0, 1, 2]);

        let path = graph.find_path(1, 0).unwrap().unwrap();
        assert_eq!(path.edges(), &[1, 2]);
        assert_eq!(graph.find_path(2, 2).unwrap(), Some(Path::empty(2)));
        assert_eq!(graph.find_path(0, 4).unwrap(), None);

        assert_eq!(
            graph.find_path(0, 5).err(),
            Some(GraphError::NodeOutOfRange { node: 5, n: 5 })
        );
        assert!(graph.dfs(9).is_err());
    }
}
