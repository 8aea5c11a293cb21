/*!
`idxgraphs` is a library of connectivity, cut and cycle algorithms for graphs whose vertices and
edges are dense integer indices.

# Representation

We represent **nodes** as `u32` in the range `0..n` and **edges** as `u32` ids in the range
`0..m`. Every edge id maps to one ordered endpoint pair [`Edge`](crate::edge::Edge)`(source, target)`.
All per-vertex and per-edge bookkeeping of the algorithms is kept in plain arrays indexed by
these ids.

### Directed vs Undirected

Directedness is a runtime flag of the graph ([`IndexGraph::is_directed`](crate::ops::IndexGraph::is_directed)).
In an undirected graph, the endpoints of an edge are interchangeable and algorithms ask for "the
other side" of an edge via [`IndexGraph::edge_endpoint`](crate::ops::IndexGraph::edge_endpoint).
Algorithms restricted to one flavour return a precondition error for the other one.

# Design

All algorithms are provided as configurable structs that one can alter to their needs using the
*Builder* / *Setter* pattern before running them on a graph. The commonly used functionality is
also implemented via extension traits on every graph, making it usable without configuring
anything beforehand. Where results can be produced lazily (traversals, strongly connected
components, elementary cycles) the algorithms are iterators that perform one step per call and
keep their entire state, including their simulated call stack, in the iterator itself. No
algorithm recurses, so graph depth is only bounded by memory.

Errors are reported through [`GraphError`](crate::error::GraphError); progress is logged through
the `tracing` facade.

# Usage

- [`prelude`] includes definitions for nodes, edges, weights, errors, basic graph operations and
  the [`CsrGraph`](crate::repr::CsrGraph) representation,
- [`algo`] includes traversals, strongly/weakly connected components, biconnected components,
  cycle enumeration, minimum vertex cuts and bidirectional BFS,
- [`gens`] includes random graph generators,
- [`utils`] includes lower level helpers.

In most use-cases, `use idxgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use idxgraphs::{prelude::*, algo::*};

let graph = CsrGraph::directed(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
let sccs = graph.strongly_connected_components();
assert_eq!(sccs.number_of_classes(), 2);
assert!(!graph.is_strongly_connected());
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;
pub mod weights;

/// `idxgraphs::prelude` includes definitions for nodes and edges, weights, errors, all basic
/// graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{GraphError, Result},
        node::*,
        ops::*,
        repr::*,
        weights::*,
    };
}

pub use prelude::*;
