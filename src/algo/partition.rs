/*!
# Partitioning of Nodes

A [`VertexPartition`] assigns every vertex of a graph to exactly one **class** in
`0..number_of_classes`. It is the result type of the component algorithms, e.g.

- strongly connected components,
- weakly connected components.

Besides the vertex-to-class mapping it stores the members of every class contiguously, so
[`VertexPartition::members_of_class`] is a slice access. Edge-related queries
([`VertexPartition::edges_of_class`], [`VertexPartition::cross_edges`],
[`VertexPartition::quotient_graph`]) take the graph the partition was computed on.

# Example

```rust
use idxgraphs::{prelude::*, algo::*};

let part = vec![vec![0, 1], vec![3], vec![2]].into_partition(4);

assert_eq!(part.number_of_classes(), 3);
assert_eq!(part.class_of_node(2), 2);
assert_eq!(part.members_of_class(0), &[0, 1]);
```
*/

use itertools::Itertools;

use super::*;

/// Identifier of a class in a [`VertexPartition`]
pub type PartitionClass = NumNodes;

/// A partition of the vertex set `0..n` into the classes `0..k`.
///
/// Invariant: every vertex belongs to exactly one class and every class is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexPartition {
    classes: Vec<PartitionClass>,
    members: SlicedBuffer<Node>,
}

impl VertexPartition {
    /// Builds a partition from the class id of every vertex.
    ///
    /// # Panics
    /// If some id is `>= number_of_classes` or some class in `0..number_of_classes` is empty.
    ///
    /// # Example
    /// ```rust
    /// use idxgraphs::algo::VertexPartition;
    ///
    /// let part = VertexPartition::from_classes(2, vec![1, 0, 1]);
    /// assert_eq!(part.members_of_class(1), &[0, 2]);
    /// assert_eq!(part.number_in_class(0), 1);
    /// ```
    pub fn from_classes(number_of_classes: NumNodes, classes: Vec<PartitionClass>) -> Self {
        let members = SlicedBuffer::from_keyed(
            number_of_classes,
            classes.iter().enumerate().map(|(u, &c)| {
                assert!(c < number_of_classes, "class id {c} out of range");
                (c, u as Node)
            }),
        );
        assert!(
            (0..number_of_classes).all(|c| members.size_of(c) > 0),
            "partition classes must not be empty"
        );

        Self { classes, members }
    }

    /// Returns the number of vertices covered by the partition
    pub fn number_of_nodes(&self) -> NumNodes {
        self.classes.len() as NumNodes
    }

    /// Returns the number of classes
    pub fn number_of_classes(&self) -> NumNodes {
        self.members.len() as NumNodes
    }

    /// Returns the class of `u`
    /// ** Panics if `u >= n` **
    pub fn class_of_node(&self, u: Node) -> PartitionClass {
        self.classes[u as usize]
    }

    /// Returns the class of every vertex, indexed by vertex
    pub fn classes(&self) -> &[PartitionClass] {
        &self.classes
    }

    /// Returns *true* if `u` and `v` are in the same class
    pub fn in_same_class(&self, u: Node, v: Node) -> bool {
        self.class_of_node(u) == self.class_of_node(v)
    }

    /// Returns the members of a class in increasing order
    /// ** Panics if `class_id >= number_of_classes` **
    pub fn members_of_class(&self, class_id: PartitionClass) -> &[Node] {
        assert!(class_id < self.number_of_classes());
        &self.members[class_id]
    }

    /// Returns the number of vertices in the specified class
    pub fn number_in_class(&self, class_id: PartitionClass) -> NumNodes {
        self.members.size_of(class_id)
    }

    /// Iterates over all classes, each as the slice of its members
    pub fn iter_classes(&self) -> impl Iterator<Item = &[Node]> + '_ {
        (0..self.number_of_classes()).map(|c| &self.members[c])
    }

    /// Returns the edges with both endpoints in `class_id`, in increasing id order
    pub fn edges_of_class<G: IndexGraph>(&self, graph: &G, class_id: PartitionClass) -> Vec<EdgeId> {
        debug_assert_eq!(graph.number_of_nodes(), self.number_of_nodes());
        self.members_of_class(class_id)
            .iter()
            .flat_map(|&u| graph.out_edges_of(u))
            .filter(|ie| self.class_of_node(ie.endpoint) == class_id)
            .map(|ie| ie.id)
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Returns the edges running from class `from` into class `to`, in increasing id order.
    /// In undirected graphs the orientation is ignored, so the result is symmetric.
    ///
    /// # Example
    /// ```rust
    /// use idxgraphs::{prelude::*, algo::*};
    ///
    /// let g = CsrGraph::directed(4, [(0, 1), (1, 2), (3, 0), (2, 3)]);
    /// let part = vec![vec![0, 1], vec![2, 3]].into_partition(4);
    ///
    /// assert_eq!(part.cross_edges(&g, 0, 1), vec![1]);
    /// assert_eq!(part.cross_edges(&g, 1, 0), vec![2]);
    /// ```
    pub fn cross_edges<G: IndexGraph>(
        &self,
        graph: &G,
        from: PartitionClass,
        to: PartitionClass,
    ) -> Vec<EdgeId> {
        debug_assert_eq!(graph.number_of_nodes(), self.number_of_nodes());
        self.members_of_class(from)
            .iter()
            .flat_map(|&u| graph.out_edges_of(u))
            .filter(|ie| self.class_of_node(ie.endpoint) == to)
            .map(|ie| ie.id)
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Contracts every class into a single vertex. Vertex `c` of the result is class `c`, the
    /// result has the same directedness as `graph`.
    ///
    /// - `self_edges`: keep edges inside a class as self-loops
    /// - `parallel_edges`: keep one edge per original edge instead of one per class pair
    ///
    /// Edges of the quotient graph are ordered by the id of the (first) original edge.
    pub fn quotient_graph<G: IndexGraph>(
        &self,
        graph: &G,
        self_edges: bool,
        parallel_edges: bool,
    ) -> CsrGraph {
        debug_assert_eq!(graph.number_of_nodes(), self.number_of_nodes());
        let mut seen = fxhash::FxHashSet::default();

        let edges = graph
            .edges()
            .map(|Edge(u, v)| Edge(self.class_of_node(u), self.class_of_node(v)))
            .filter(|e| self_edges || !e.is_loop())
            .filter(|e| {
                parallel_edges
                    || seen.insert(if graph.is_directed() {
                        *e
                    } else {
                        e.normalized()
                    })
            })
            .collect_vec();

        CsrGraph::from_edges(self.number_of_classes(), graph.is_directed(), edges)
    }

    /// Consumes the partition and returns the members of each class
    pub fn into_components(self) -> Vec<Vec<Node>> {
        self.iter_classes().map(|c| c.to_vec()).collect()
    }
}

/// Convenience trait for converting a collection of classes into a [`VertexPartition`].
///
/// Each inner collection is interpreted as one partition class; class ids follow the order of
/// the collection.
pub trait IntoPartition {
    /// Consumes the collection and builds a [`VertexPartition`] over `n` nodes.
    ///
    /// # Panics
    /// If the classes do not cover every vertex exactly once or a class is empty.
    fn into_partition(self, n: NumNodes) -> VertexPartition;
}

impl<N, I> IntoPartition for I
where
    N: IntoIterator<Item = Node>,
    I: IntoIterator<Item = N>,
{
    fn into_partition(self, n: NumNodes) -> VertexPartition {
        let mut classes = vec![INVALID_NODE; n as usize];
        let mut number_of_classes = 0;
        for class in self {
            for u in class {
                assert_eq!(classes[u as usize], INVALID_NODE, "node {u} assigned twice");
                classes[u as usize] = number_of_classes;
            }
            number_of_classes += 1;
        }

        assert!(
            !classes.contains(&INVALID_NODE),
            "every node must be assigned to a class"
        );
        VertexPartition::from_classes(number_of_classes, classes)
    }
}
