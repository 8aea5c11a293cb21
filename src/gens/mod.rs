/*!
# Graph Generators

Random edge generators for index graphs, configured with the *Builder* / *Setter* pattern:

1. Create a generator instance (e.g. `Gnp::new()`).
2. Set parameters (e.g. `.nodes(n).prob(p).directed(true)`).
3. Produce edges via `generate()` or lazily via `stream()`.

Supported models:
- `G(n,p)`: every possible edge is present independently with probability `p`,
- `G(n,m)`: a uniformly random set of exactly `m` distinct edges.

[`RandomGraph`] wraps both into constructors for every [`GraphFromScratch`] representation.

```
use idxgraphs::{prelude::*, gens::*};
use rand::SeedableRng;
use rand_pcg::Pcg64;

let rng = &mut Pcg64::seed_from_u64(7);

let g = CsrGraph::gnm(rng, 10, 20, false);
assert_eq!(g.number_of_edges(), 20);
assert!(!g.has_parallel_edges());
```
*/

use rand::Rng;

use crate::prelude::*;

mod gnm;
mod gnp;

pub use gnm::*;
pub use gnp::*;

/// Generators with a configurable number of nodes
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Generators with a configurable number of edges
pub trait NumEdgesGen: Sized {
    /// Sets the number of edges
    fn set_edges(&mut self, m: NumEdges);

    /// Sets the number of edges
    fn edges(mut self, m: NumEdges) -> Self {
        self.set_edges(m);
        self
    }
}

/// Generators whose density can be given as the expected average degree
pub trait AverageDegreeGen: Sized {
    /// Sets the average degree. The conversion into the model parameter happens on generation.
    fn set_avg_deg(&mut self, deg: f64);

    /// Sets the average degree
    fn avg_deg(mut self, deg: f64) -> Self {
        self.set_avg_deg(deg);
        self
    }
}

/// A configured random edge generator
pub trait GraphGenerator {
    /// Generates all edges at once
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Lazily generates the edges
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

/// Random graph constructors for graph representations.
///
/// Graphs contain neither self-loops nor parallel edges.
pub trait RandomGraph: Sized {
    /// Creates a `G(n,p)` graph
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64, directed: bool) -> Self
    where
        R: Rng;

    /// Creates a `G(n,m)` graph with exactly `m` edges
    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges, directed: bool) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch,
{
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64, directed: bool) -> Self
    where
        R: Rng,
    {
        let generator = Gnp::new().nodes(n).prob(p).directed(directed);
        Self::from_edges(n, directed, generator.stream(rng))
    }

    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges, directed: bool) -> Self
    where
        R: Rng,
    {
        let generator = Gnm::new().nodes(n).edges(m).directed(directed);
        Self::from_edges(n, directed, generator.stream(rng))
    }
}
