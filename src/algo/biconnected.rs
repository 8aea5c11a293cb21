/*!
# Biconnected Components

A *block* (biconnected component) of an undirected graph is a maximal set of edges in which every
two edges lie on a common simple cycle; a bridge forms a block of its own and an isolated vertex
forms a block without edges. Every edge belongs to exactly one block, except for self-loops
which are attached to every block of their vertex. A *cut vertex* (articulation point) belongs to
more than one block.

Blocks are found by the low-point scan of Hopcroft and Tarjan, run on an explicit frame stack:
for a tree edge `(u, v)`, if no vertex in the subtree of `v` reaches strictly above `u`, the edges
pushed since `(u, v)` form a block.
*/

use itertools::Itertools;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::*;

/// Identifier of a block in [`BiconnectedComponents`]
pub type BlockId = NumNodes;

/// The blocks and cut vertices of an undirected graph
#[derive(Debug, Clone)]
pub struct BiconnectedComponents {
    block_vertices: SlicedBuffer<Node>,
    block_edges: SlicedBuffer<EdgeId>,
    node_blocks: Vec<SmallVec<[BlockId; 2]>>,
}

impl BiconnectedComponents {
    /// Computes the blocks of an undirected graph.
    /// Returns `Err(UndirectedOnly)` for directed graphs.
    pub fn compute<G: IndexGraph>(graph: &G) -> Result<Self> {
        graph.check_undirected("biconnected components")?;
        Ok(BlockSearch::new(graph).run())
    }

    /// Returns the number of vertices of the underlying graph
    pub fn number_of_nodes(&self) -> NumNodes {
        self.node_blocks.len() as NumNodes
    }

    /// Returns the number of blocks
    pub fn number_of_blocks(&self) -> NumNodes {
        self.block_vertices.len() as NumNodes
    }

    /// Vertices of a block in increasing order
    /// ** Panics if `block >= number_of_blocks` **
    pub fn block_vertices(&self, block: BlockId) -> &[Node] {
        assert!(block < self.number_of_blocks());
        &self.block_vertices[block]
    }

    /// Edges of a block in increasing order, including parallel edges and the self-loops
    /// of its vertices
    /// ** Panics if `block >= number_of_blocks` **
    pub fn block_edges(&self, block: BlockId) -> &[EdgeId] {
        assert!(block < self.number_of_blocks());
        &self.block_edges[block]
    }

    /// Blocks containing `u` in increasing order; every vertex is in at least one block
    /// ** Panics if `u >= n` **
    pub fn blocks_of_node(&self, u: Node) -> &[BlockId] {
        &self.node_blocks[u as usize]
    }

    /// Returns *true* if removing `u` disconnects some of its neighbors from each other
    /// ** Panics if `u >= n` **
    pub fn is_cut_vertex(&self, u: Node) -> bool {
        self.node_blocks[u as usize].len() > 1
    }

    /// All cut vertices in increasing order
    pub fn cut_vertices(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.number_of_nodes()).filter(|&u| self.is_cut_vertex(u))
    }

    /// Builds the block-cut tree (a forest if the graph is disconnected).
    ///
    /// Vertex `b < number_of_blocks` of the tree is block `b`; vertex `number_of_blocks + i` is
    /// the cut vertex at position `i` of the returned vector. Every cut vertex is joined to each
    /// block containing it.
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// // two triangles sharing vertex 2
    /// let g = CsrGraph::undirected(5, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
    /// let bicc = g.biconnected_components().unwrap();
    /// let (tree, cuts) = bicc.block_cut_tree();
    ///
    /// assert_eq!(cuts, vec![2]);
    /// assert_eq!(tree.number_of_nodes(), 3);
    /// assert_eq!(tree.edge_list(), &[Edge(0, 2), Edge(1, 2)]);
    /// ```
    pub fn block_cut_tree(&self) -> (CsrGraph, Vec<Node>) {
        let cuts = self.cut_vertices().collect_vec();
        let b = self.number_of_blocks();

        let mut edges = cuts
            .iter()
            .enumerate()
            .flat_map(|(i, &u)| {
                self.blocks_of_node(u)
                    .iter()
                    .map(move |&block| Edge(block, b + i as Node))
            })
            .collect_vec();
        edges.sort_unstable();

        (
            CsrGraph::undirected(b + cuts.len() as NumNodes, edges),
            cuts,
        )
    }
}

struct Frame<'a, G>
where
    G: IndexGraph + 'a,
{
    node: Node,
    edges: G::EdgeIter<'a>,
    parent_edge: Option<EdgeId>,
    /// smallest depth reachable from the subtree via one back edge
    lowpoint: NumNodes,
}

/// State of one Hopcroft-Tarjan scan
struct BlockSearch<'a, G>
where
    G: IndexGraph + 'a,
{
    graph: &'a G,
    depths: Vec<NumNodes>,
    frames: Vec<Frame<'a, G>>,
    edge_stack: Vec<EdgeId>,
    blocks: Vec<Vec<EdgeId>>,
    /// vertices without any edge but self-loops
    singletons: Vec<(BlockId, Node)>,
    loops: Vec<EdgeId>,
}

impl<'a, G> BlockSearch<'a, G>
where
    G: IndexGraph,
{
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            depths: vec![INVALID_NODE; graph.len()],
            frames: Vec::with_capacity(32),
            edge_stack: Vec::new(),
            blocks: Vec::new(),
            singletons: Vec::new(),
            loops: Vec::new(),
        }
    }

    fn push_frame(&mut self, node: Node, parent_edge: Option<EdgeId>) {
        let depth = self.frames.len() as NumNodes;
        self.depths[node as usize] = depth;
        self.frames.push(Frame {
            node,
            edges: self.graph.out_edges_of(node),
            parent_edge,
            lowpoint: depth,
        });
    }

    fn search_from(&mut self, root: Node) {
        let blocks_before = self.blocks.len();
        self.push_frame(root, None);

        while !self.frames.is_empty() {
            let depth = self.frames.len() as NumNodes - 1;
            let Some(frame) = self.frames.last_mut() else {
                break;
            };

            if let Some(IncidentEdge { id, endpoint: v }) = frame.edges.next() {
                // parallel edges to the parent have other ids and thus count as back edges
                if Some(id) == frame.parent_edge {
                    continue;
                }

                if v == frame.node {
                    self.loops.push(id);
                    continue;
                }

                let v_depth = self.depths[v as usize];
                if v_depth == INVALID_NODE {
                    self.edge_stack.push(id);
                    self.push_frame(v, Some(id));
                } else if v_depth < depth {
                    frame.lowpoint = frame.lowpoint.min(v_depth);
                    self.edge_stack.push(id);
                }
                continue;
            }

            let Some(child) = self.frames.pop() else {
                break;
            };
            let Some(parent) = self.frames.last_mut() else {
                break;
            };

            if child.lowpoint >= depth - 1 {
                // the parent separates the subtree of the child
                let Some(tree_edge) = child.parent_edge else {
                    break;
                };
                let Some(start) = self.edge_stack.iter().rposition(|&e| e == tree_edge) else {
                    break;
                };
                let block = self.edge_stack.split_off(start);
                trace!(separator = parent.node, edges = block.len(), "block");
                self.blocks.push(block);
            } else {
                parent.lowpoint = parent.lowpoint.min(child.lowpoint);
            }
        }

        debug_assert!(self.edge_stack.is_empty());
        if self.blocks.len() == blocks_before {
            self.singletons.push((self.blocks.len() as BlockId, root));
            self.blocks.push(Vec::new());
        }
    }

    fn run(mut self) -> BiconnectedComponents {
        for root in self.graph.vertices() {
            if self.depths[root as usize] == INVALID_NODE {
                self.search_from(root);
                self.frames.clear();
            }
        }

        let n = self.graph.number_of_nodes();
        let number_of_blocks = self.blocks.len() as NumNodes;

        // vertices per block; `stamp` avoids listing a vertex twice in one block
        let mut stamp = vec![INVALID_NODE; n as usize];
        let mut block_members = Vec::new();
        for (block, edges) in self.blocks.iter().enumerate() {
            let block = block as BlockId;
            for &e in edges {
                let Edge(u, v) = self.graph.edge(e);
                for w in [u, v] {
                    if stamp[w as usize] != block {
                        stamp[w as usize] = block;
                        block_members.push((block, w));
                    }
                }
            }
        }
        block_members.extend(self.singletons.iter().copied());

        let mut node_blocks: Vec<SmallVec<[BlockId; 2]>> = vec![SmallVec::new(); n as usize];
        for &(block, u) in &block_members {
            node_blocks[u as usize].push(block);
        }
        node_blocks.iter_mut().for_each(|blocks| blocks.sort_unstable());

        // a self-loop lies in every block of its vertex
        let mut block_edge_items = self
            .blocks
            .iter()
            .enumerate()
            .flat_map(|(block, edges)| edges.iter().map(move |&e| (block as BlockId, e)))
            .collect_vec();
        for &e in &self.loops {
            let u = self.graph.edge_source(e);
            block_edge_items.extend(node_blocks[u as usize].iter().map(|&block| (block, e)));
        }
        block_edge_items.sort_unstable();
        block_members.sort_unstable();

        let result = BiconnectedComponents {
            block_vertices: SlicedBuffer::from_keyed(number_of_blocks, block_members),
            block_edges: SlicedBuffer::from_keyed(number_of_blocks, block_edge_items),
            node_blocks,
        };

        debug!(
            n,
            m = self.graph.number_of_edges(),
            blocks = number_of_blocks,
            cut_vertices = result.cut_vertices().count(),
            "computed biconnected components"
        );
        result
    }
}

/// Biconnected components as methods on graphs
pub trait Biconnectivity: IndexGraph {
    /// Computes the blocks and cut vertices of an undirected graph.
    /// Returns `Err(UndirectedOnly)` for directed graphs.
    ///
    /// # Examples
    /// ```
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// let path = CsrGraph::undirected(4, [(0, 1), (1, 2), (2, 3)]);
    /// let bicc = path.biconnected_components().unwrap();
    ///
    /// assert_eq!(bicc.number_of_blocks(), 3);
    /// assert_eq!(bicc.cut_vertices().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    fn biconnected_components(&self) -> Result<BiconnectedComponents> {
        BiconnectedComponents::compute(self)
    }

    /// Returns the cut vertices of an undirected graph in increasing order
    fn cut_vertices(&self) -> Result<Vec<Node>> {
        Ok(self.biconnected_components()?.cut_vertices().collect())
    }

    /// Returns *true* if the undirected graph is connected and has no cut vertex
    fn is_biconnected(&self) -> Result<bool> {
        let bicc = self.biconnected_components()?;
        Ok(bicc.number_of_blocks() <= 1)
    }
}

impl<G> Biconnectivity for G where G: IndexGraph {}
