use fxhash::FxHashMap;

use super::*;

/// `G(n,m)` can be parameterized by the number of edges or by the average degree
#[derive(Debug, Copy, Clone, Default)]
enum GnmType {
    #[default]
    NotSet,
    Edges(NumEdges),
    AvgDeg(f64),
}

/// Generator for uniform `G(n,m)` graphs: `m` distinct edges drawn uniformly without replacement
/// from all loop-free candidates (`n(n-1)` ordered pairs if directed, `n(n-1)/2` normalized pairs
/// otherwise).
///
/// The sampling follows
/// > *V. Batagelj and U. Brandes. Efficient Generation of Large Random Networks.
/// > Physical Review E 71.3 (2005): 036113.*
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnm {
    n: u64,
    m: GnmType,
    directed: bool,
}

impl Gnm {
    /// Creates a new empty `G(n,m)` generator
    pub fn new() -> Self {
        Self::default()
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

    /// Number of candidate edges
    fn space(&self) -> u64 {
        let pairs = self.n * self.n.saturating_sub(1);
        if self.directed { pairs } else { pairs / 2 }
    }
}

impl NumNodesGen for Gnm {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n as u64;
    }
}

impl NumEdgesGen for Gnm {
    fn set_edges(&mut self, m: NumEdges) {
        self.m = GnmType::Edges(m);
    }
}

impl AverageDegreeGen for Gnm {
    /// Sets `m = d * n` for directed and `m = d * n / 2` for undirected graphs
    fn set_avg_deg(&mut self, deg: f64) {
        self.m = GnmType::AvgDeg(deg);
    }
}

impl GraphGenerator for Gnm {
    /// # Panics
    /// - if neither `edges(m)` nor `avg_deg(d)` was set
    /// - if `m` exceeds the number of candidate edges
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let m = match self.m {
            GnmType::NotSet => panic!("Number of edges of Gnm was not set!"),
            GnmType::Edges(m) => m as u64,
            GnmType::AvgDeg(d) if self.directed => (self.n as f64 * d) as u64,
            GnmType::AvgDeg(d) => (self.n as f64 * d / 2.0) as u64,
        };

        let space = self.space();
        assert!(m <= space, "Cannot draw {m} distinct edges out of {space}!");

        let (n, directed) = (self.n, self.directed);
        GnmSampler::new(rng, space, m).map(move |x| {
            if directed {
                directed_loop_free(x, n)
            } else {
                Edge::from_u64_undir(x, n)
            }
        })
    }
}

/// Bijection from `0..n(n-1)` to all loop-free ordered pairs of `n` nodes
fn directed_loop_free(x: u64, n: u64) -> Edge {
    let u = x / (n - 1);
    let v = x % (n - 1);
    Edge(u as Node, (v + (v >= u) as u64) as Node)
}

/// Draws `m` distinct values of `0..end` uniformly at random.
///
/// This is a Fisher-Yates shuffle of `0..end` stopped after `m` steps, where only the displaced
/// positions are stored in a map.
pub struct GnmSampler<'a, R>
where
    R: Rng,
{
    rng: &'a mut R,
    cur: u64,
    end: u64,
    remaining: u64,
    displaced: FxHashMap<u64, u64>,
}

impl<'a, R> GnmSampler<'a, R>
where
    R: Rng,
{
    /// ** Panics (in debug builds) if `m > end` **
    pub fn new(rng: &'a mut R, end: u64, m: u64) -> Self {
        debug_assert!(m <= end);
        Self {
            rng,
            cur: 0,
            end,
            remaining: m,
            displaced: FxHashMap::with_capacity_and_hasher(m as usize, Default::default()),
        }
    }
}

impl<R> Iterator for GnmSampler<'_, R>
where
    R: Rng,
{
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }

        let pos = self.rng.random_range(self.cur..self.end);
        let value = self.displaced.get(&pos).copied().unwrap_or(pos);

        // position `cur` leaves the window, its value moves to `pos`
        let replacement = self.displaced.remove(&self.cur).unwrap_or(self.cur);
        if pos != self.cur {
            self.displaced.insert(pos, replacement);
        }

        self.cur += 1;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl<R> ExactSizeIterator for GnmSampler<'_, R> where R: Rng {}
