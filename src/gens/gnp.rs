use super::*;
use crate::utils::{Probability, geometric::GeometricJumper};

/// A `G(n,p)` graph can be defined by either a probability or the average degree which is more
/// common in practice
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    #[default]
    NotSet,
    Prob(f64),
    AvgDeg(f64),
}

/// `G(n,p)` graphs contain every possible edge of `n` nodes independently with probability `p`.
///
/// Instead of one trial per candidate edge, successes are found by geometric jumps over the
/// enumeration of all candidates, so generation takes time linear in the number of edges.
/// Directed graphs enumerate the `n^2` ordered pairs, undirected graphs the `n(n-1)/2` normalized
/// ones. Self-loops are only drawn if enabled via [`Gnp::loops`].
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: u64,
    p: GnpType,
    directed: bool,
    loops: bool,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `p` directly.
    /// ** Panics if `prob` is no probability **
    pub fn set_prob(&mut self, prob: f64) {
        assert!(prob.is_valid_probility());
        self.p = GnpType::Prob(prob);
    }

    /// Sets `p` directly
    pub fn prob(mut self, prob: f64) -> Self {
        self.set_prob(prob);
        self
    }

    /// Sets whether ordered pairs are drawn
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Sets whether ordered pairs are drawn
    pub fn directed(mut self, directed: bool) -> Self {
        self.set_directed(directed);
        self
    }

    /// Sets whether self-loops are drawn (each with probability `p`)
    pub fn set_loops(&mut self, loops: bool) {
        self.loops = loops;
    }

    /// Sets whether self-loops are drawn (each with probability `p`)
    pub fn loops(mut self, loops: bool) -> Self {
        self.set_loops(loops);
        self
    }

    fn probability(&self) -> f64 {
        match self.p {
            GnpType::NotSet => panic!("Probability of Gnp was not set!"),
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(d) => {
                let p = if self.n > 1 {
                    d / (self.n - 1) as f64
                } else {
                    0.0
                };
                assert!(
                    p.is_valid_probility(),
                    "The average degree is invalid for the given n!"
                );
                p
            }
        }
    }
}

impl NumNodesGen for Gnp {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n as u64;
    }
}

impl AverageDegreeGen for Gnp {
    /// Sets `p = d / (n - 1)`, the expected (out-)degree of a vertex without loops
    fn set_avg_deg(&mut self, deg: f64) {
        self.p = GnpType::AvgDeg(deg);
    }
}

impl GraphGenerator for Gnp {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.probability();
        let n = self.n;

        let (space, loops): (u64, Vec<Edge>) = if self.directed {
            (n * n, Vec::new())
        } else {
            let loops = if self.loops {
                GeometricJumper::new(p)
                    .stop_at(n)
                    .iter(rng)
                    .map(|u| Edge(u as Node, u as Node))
                    .collect()
            } else {
                Vec::new()
            };
            (n * n.saturating_sub(1) / 2, loops)
        };

        let directed = self.directed;
        let with_loops = self.loops;

        let edges = GeometricJumper::new(p)
            .stop_at(space)
            .iter(rng)
            .map(move |x| {
                if directed {
                    Edge::from_u64(x, n)
                } else {
                    Edge::from_u64_undir(x, n)
                }
            })
            .filter(move |e| with_loops || !e.is_loop());

        loops.into_iter().chain(edges)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn extreme_probabilities() {
        let rng = &mut Pcg64::seed_from_u64(1);

        assert!(Gnp::new().nodes(10).prob(0.0).generate(rng).is_empty());

        let complete = Gnp::new().nodes(6).prob(1.0).directed(true).generate(rng);
        assert_eq!(complete.len(), 30);
        assert!(complete.iter().all(|e| !e.is_loop()));

        let complete = Gnp::new().nodes(6).prob(1.0).generate(rng);
        assert_eq!(complete.len(), 15);
        assert!(complete.iter().all(|e| e.is_normalized() && !e.is_loop()));

        let with_loops = Gnp::new().nodes(6).prob(1.0).loops(true).directed(true).generate(rng);
        assert_eq!(with_loops.iter().filter(|e| e.is_loop()).count(), 6);
        assert_eq!(with_loops.len(), 36);

        let with_loops = Gnp::new().nodes(6).prob(1.0).loops(true).generate(rng);
        assert_eq!(with_loops.len(), 21);
    }

    #[test]
    fn distinct_edges_and_density() {
        let rng = &mut Pcg64::seed_from_u64(2);
        let n = 300;

        for directed in [false, true] {
            let edges = Gnp::new().nodes(n).avg_deg(8.0).directed(directed).generate(rng);
            assert_eq!(edges.iter().unique().count(), edges.len());

            let avg_deg = if directed {
                edges.len() as f64 / n as f64
            } else {
                2.0 * edges.len() as f64 / n as f64
            };
            assert!((7.0..9.0).contains(&avg_deg), "{avg_deg}");
        }
    }

    #[test]
    #[should_panic]
    fn unset_probability() {
        let rng = &mut Pcg64::seed_from_u64(3);
        Gnp::new().nodes(3).generate(rng);
    }
}
