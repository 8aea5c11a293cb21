use thiserror::Error;

use crate::{edge::EdgeId, node::Node};

/// Every error an algorithm of this crate can report.
///
/// # Error Categories
///
/// ## Precondition violations
/// Detected before any algorithm state is touched:
/// - [`GraphError::NodeOutOfRange`] / [`GraphError::EdgeOutOfRange`]
/// - [`GraphError::DirectedOnly`] / [`GraphError::UndirectedOnly`]
/// - [`GraphError::NotCardinality`], [`GraphError::NegativeWeight`],
///   [`GraphError::MissingWeights`]
/// - [`GraphError::IdenticalEndpoints`], [`GraphError::ParallelEdges`]
///
/// ## Structural infeasibility
/// - [`GraphError::Infeasible`]: the question has no finite answer, e.g. a vertex cut between
///   adjacent vertices. Never reported as an empty result.
///
/// ## Iterator misuse
/// - [`GraphError::ExhaustedIterator`]: `try_next` was called on a finished lazy sequence.
///
/// ## Weighted collaborators
/// - [`GraphError::NegativeCycle`]: kept distinct from "no path", which is `Ok(None)`.
/// - [`GraphError::WeightOverflow`]: the weight of a result does not fit into the weight type.
///
/// # Examples
/// ```
/// use idxgraphs::{prelude::*, algo::*};
///
/// let graph = CsrGraph::from_edges(3, true, [(0, 1), (1, 2)]);
/// match graph.biconnected_components() {
///     Ok(bicc) => println!("{} blocks", bicc.number_of_blocks()),
///     Err(GraphError::UndirectedOnly(algo)) => eprintln!("{algo} needs an undirected graph"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex index is not in `0..n`
    #[error("vertex {node} is out of range for a graph with {n} vertices")]
    NodeOutOfRange { node: Node, n: Node },

    /// An edge index is not in `0..m`
    #[error("edge {edge} is out of range for a graph with {m} edges")]
    EdgeOutOfRange { edge: EdgeId, m: EdgeId },

    /// The named algorithm only supports directed graphs
    #[error("{0} requires a directed graph")]
    DirectedOnly(&'static str),

    /// The named algorithm only supports undirected graphs
    #[error("{0} requires an undirected graph")]
    UndirectedOnly(&'static str),

    /// The named algorithm only supports the constant-1 weight function
    #[error("{0} only supports cardinality weights")]
    NotCardinality(&'static str),

    /// The weight of the given index is negative
    #[error("weight of index {0} is negative")]
    NegativeWeight(u32),

    /// A weight slice is shorter than the number of indices it has to cover
    #[error("{required} weights are required but only {available} are given")]
    MissingWeights { available: u32, required: u32 },

    /// A weight sum does not fit into the weight type
    #[error("weight sum overflows the weight type")]
    WeightOverflow,

    /// Source and sink of an s-t query coincide
    #[error("source and sink are the same vertex {0}")]
    IdenticalEndpoints(Node),

    /// The named algorithm does not support parallel edges
    #[error("{0} does not support parallel edges")]
    ParallelEdges(&'static str),

    /// The problem has no (finite) solution on this input
    #[error("no feasible solution: {0}")]
    Infeasible(&'static str),

    /// A lazy sequence was advanced after it was exhausted
    #[error("iterator is exhausted")]
    ExhaustedIterator,

    /// A negative-weight cycle prevents shortest distances from being defined
    #[error("graph contains a negative cycle")]
    NegativeCycle,
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, GraphError>;
