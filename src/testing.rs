//! Small random graphs and exhaustive reference algorithms for cross-checking in tests.
//! Everything here is intentionally naive and only meant for graphs with a handful of vertices.

use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::{gens::*, prelude::*};

/// A `G(n,p)` graph with self-loops but without parallel edges, where `p` is chosen such that the
/// expected (out-)degree is about `avg_deg`
pub fn random_small_graph(seed: u64, n: NumNodes, avg_deg: f64, directed: bool) -> CsrGraph {
    let rng = &mut Pcg64::seed_from_u64(seed);
    let p = if n == 0 {
        0.0
    } else {
        (avg_deg / n as f64).clamp(0.0, 1.0)
    };

    let edges = Gnp::new()
        .nodes(n)
        .prob(p)
        .directed(directed)
        .loops(true)
        .generate(rng);
    CsrGraph::from_edges(n, directed, edges)
}

/// Vertices reachable from `start` if the vertices in `removed` are deleted.
/// `start` must not be removed.
pub fn reachable_without<G: IndexGraph>(graph: &G, removed: &[Node], start: Node) -> NodeBitSet {
    let mut visited = graph.vertex_bitset_unset();
    for &u in removed {
        visited.set_bit(u);
    }
    debug_assert!(!visited.get_bit(start));

    let mut stack = vec![start];
    visited.set_bit(start);
    while let Some(u) = stack.pop() {
        for ie in graph.out_edges_of(u) {
            if !visited.set_bit(ie.endpoint) {
                stack.push(ie.endpoint);
            }
        }
    }

    for &u in removed {
        visited.clear_bit(u);
    }
    visited
}

/// `matrix[u][v]` is *true* iff `v` is reachable from `u`, computed by transitive closure
pub fn reachability_matrix<G: IndexGraph>(graph: &G) -> Vec<Vec<bool>> {
    let n = graph.len();
    let mut reach = vec![vec![false; n]; n];
    for u in 0..n {
        reach[u][u] = true;
    }
    for Edge(u, v) in graph.edges() {
        reach[u as usize][v as usize] = true;
        if graph.is_undirected() {
            reach[v as usize][u as usize] = true;
        }
    }

    for k in 0..n {
        for i in 0..n {
            if reach[i][k] {
                for j in 0..n {
                    reach[i][j] |= reach[k][j];
                }
            }
        }
    }
    reach
}

/// Number of connected components of the graph without the vertices in `removed`,
/// ignoring edge directions
pub fn number_of_components_without<G: IndexGraph>(graph: &G, removed: &[Node]) -> usize {
    let n = graph.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut u: usize) -> usize {
        while parent[u] != u {
            parent[u] = parent[parent[u]];
            u = parent[u];
        }
        u
    }

    for Edge(u, v) in graph.edges() {
        if removed.contains(&u) || removed.contains(&v) {
            continue;
        }
        let (ru, rv) = (find(&mut parent, u as usize), find(&mut parent, v as usize));
        parent[ru] = rv;
    }

    (0..n)
        .filter(|&u| !removed.contains(&(u as Node)) && find(&mut parent, u) == u)
        .count()
}

/// All elementary cycles of a directed graph without parallel edges. Every cycle is given by its
/// edges starting at its smallest vertex.
pub fn brute_force_cycles<G: IndexGraph>(graph: &G) -> Vec<Vec<EdgeId>> {
    fn extend<G: IndexGraph>(
        graph: &G,
        start: Node,
        u: Node,
        on_path: &mut Vec<bool>,
        path: &mut Vec<EdgeId>,
        cycles: &mut Vec<Vec<EdgeId>>,
    ) {
        for ie in graph.out_edges_of(u) {
            let v = ie.endpoint;
            if v == start {
                path.push(ie.id);
                cycles.push(path.clone());
                path.pop();
            } else if v > start && !on_path[v as usize] {
                on_path[v as usize] = true;
                path.push(ie.id);
                extend(graph, start, v, on_path, path, cycles);
                path.pop();
                on_path[v as usize] = false;
            }
        }
    }

    let mut cycles = Vec::new();
    for start in graph.vertices() {
        let mut on_path = vec![false; graph.len()];
        on_path[start as usize] = true;
        extend(graph, start, start, &mut on_path, &mut Vec::new(), &mut cycles);
    }
    cycles
}

/// Subsets of `candidates` as vertex lists
fn subsets(candidates: &[Node]) -> impl Iterator<Item = Vec<Node>> + '_ {
    assert!(candidates.len() < 16);
    (0u32..1 << candidates.len()).map(move |mask| {
        candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &u)| u)
            .collect()
    })
}

/// Weight of a minimum `(s, t)`-vertex cut by trying all vertex subsets
pub fn brute_force_st_vertex_cut<G: IndexGraph>(graph: &G, weights: &[u32], s: Node, t: Node) -> u32 {
    let candidates: Vec<Node> = graph.vertices().filter(|&u| u != s && u != t).collect();
    subsets(&candidates)
        .filter(|cut| !reachable_without(graph, cut, s).get_bit(t))
        .map(|cut| cut.iter().map(|&u| weights[u as usize]).sum::<u32>())
        .min()
        .unwrap_or(u32::MAX)
}

/// Weight of a minimum vertex set whose removal leaves at least two vertices, one of which cannot
/// reach another. `None` if no such set exists.
pub fn brute_force_global_vertex_cut<G: IndexGraph>(graph: &G, weights: &[u32]) -> Option<u32> {
    let all: Vec<Node> = graph.vertices().collect();
    subsets(&all)
        .filter(|cut| {
            let remaining: Vec<Node> = all.iter().copied().filter(|u| !cut.contains(u)).collect();
            remaining.len() >= 2
                && remaining.iter().any(|&u| {
                    let reachable = reachable_without(graph, cut, u);
                    remaining.iter().any(|&v| !reachable.get_bit(v))
                })
        })
        .map(|cut| cut.iter().map(|&u| weights[u as usize]).sum::<u32>())
        .min()
}
