/*!
# Geometric Jumps

Sampling every one of `N` Bernoulli trials with success probability `p` costs `O(N)` draws. A
[`GeometricJumper`] instead draws the *gaps* between successes from a geometric distribution and
therefore only needs `O(pN)` draws, which is what makes sparse `G(n,p)` generation linear in the
number of edges.
*/

use rand::Rng;
use rand_distr::{Distribution, Geometric, StandardGeometric};

use crate::utils::Probability;

/// A geometric distribution.
/// As the case for `p = 1/2` can be sped up by using `StandardGeometric` instead of
/// `Geometric`, we abstract over both.
#[derive(Debug, Copy, Clone)]
pub enum GeometricDistribution {
    /// General geometric distribution
    General(Geometric),
    /// Geometric distribution for `p = 1/2`
    OneHalf(StandardGeometric),
}

impl Distribution<u64> for GeometricDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self {
            GeometricDistribution::General(distr) => distr.sample(rng),
            GeometricDistribution::OneHalf(distr) => distr.sample(rng),
        }
    }
}

impl GeometricDistribution {
    /// Creates a geometric distribution counting the failures before the first success.
    /// Returns `None` for `p = 0` (no success ever) or an invalid probability.
    pub fn from_prob(prob: f64) -> Option<Self> {
        if prob == 0.5 {
            Some(Self::OneHalf(StandardGeometric))
        } else if prob > 0.0 {
            Geometric::new(prob).ok().map(Self::General)
        } else {
            None
        }
    }
}

/// Enumerates the indices of successful trials in an (optionally bounded) sequence of
/// independent Bernoulli trials with success probability `prob`.
#[derive(Debug, Copy, Clone)]
pub struct GeometricJumper {
    prob: f64,
    /// Only indices `< stop` are produced
    stop: Option<u64>,
}

impl GeometricJumper {
    /// Creates a new geometric jumper from a probability with no stop value
    pub fn new(prob: f64) -> Self {
        assert!(prob.is_valid_probility());

        Self { prob, stop: None }
    }

    /// Updates the stop value of the jumper
    pub fn stop_at(mut self, stop: u64) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Creates an iterator over the indices of successful trials
    pub fn iter<R: Rng>(self, rng: &mut R) -> GeometricJumperIter<'_, R> {
        GeometricJumperIter {
            distr: GeometricDistribution::from_prob(self.prob),
            rng,
            stop: self.stop.unwrap_or(u64::MAX),
            next_trial: 0,
        }
    }
}

/// An iterator over geometric jumps starting at `0`
#[derive(Debug)]
pub struct GeometricJumperIter<'a, R>
where
    R: Rng,
{
    /// `None` once exhausted or if no trial can succeed
    distr: Option<GeometricDistribution>,
    rng: &'a mut R,
    stop: u64,
    next_trial: u64,
}

impl<R> Iterator for GeometricJumperIter<'_, R>
where
    R: Rng,
{
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let distr = self.distr?;
        let gap = self.rng.sample(distr);

        match self.next_trial.checked_add(gap) {
            Some(hit) if hit < self.stop => {
                self.next_trial = hit + 1;
                Some(hit)
            }
            _ => {
                self.distr = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn wrong_prob() {
        for prob in [-10.0, -0.001, 1.0001, 3.4] {
            assert!(std::panic::catch_unwind(|| GeometricJumper::new(prob)).is_err());
        }
    }

    #[test]
    fn edge_cases() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for stop in [3, 10] {
            assert_eq!(
                GeometricJumper::new(1.0).stop_at(stop).iter(rng).collect::<Vec<_>>(),
                (0..stop).collect::<Vec<_>>()
            );
        }

        assert_eq!(GeometricJumper::new(0.0).iter(rng).count(), 0);
    }

    #[test]
    fn occurences() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        let stop = 100u64;
        let mut occurences = vec![0; stop as usize];
        for _ in 0..1000 {
            for x in GeometricJumper::new(0.25).stop_at(stop).iter(rng) {
                occurences[x as usize] += 1;
            }
        }

        assert!(occurences.into_iter().all(|x| (150..350).contains(&x)));
    }
}
