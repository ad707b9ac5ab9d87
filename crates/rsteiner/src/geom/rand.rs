//! Reproducible random terminal sets (replay tokens + lattice sampling).
//!
//! Purpose
//! - Feed benches, property tests and the CLI with terminal sets that can be
//!   regenerated from a `(seed, index)` pair.
//!
//! Model
//! - Coordinates are drawn uniformly from a box. With `lattice = true` they
//!   are rounded to integers, which makes shared rows/columns (and therefore
//!   small grids) likely, the regime where the exhaustive solver is usable.

use super::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Terminal count distribution.
#[derive(Clone, Copy, Debug)]
pub enum TerminalCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl TerminalCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            TerminalCount::Fixed(n) => n,
            TerminalCount::Uniform { min, max } => {
                let hi = max.max(min);
                rng.gen_range(min..=hi)
            }
        }
    }
}

/// Sampling box and count.
#[derive(Clone, Copy, Debug)]
pub struct TerminalCfg {
    pub count: TerminalCount,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Round coordinates to integers.
    pub lattice: bool,
}

impl Default for TerminalCfg {
    fn default() -> Self {
        Self {
            count: TerminalCount::Fixed(4),
            x_range: (0.0, 10.0),
            y_range: (0.0, 10.0),
            lattice: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    /// Seeded RNG for this token. Solvers that need randomness take it from here
    /// in tests and the CLI.
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

/// Draw a terminal set. Duplicates are possible on a coarse lattice and are
/// left in place.
pub fn draw_terminals(cfg: TerminalCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.to_std_rng();
    let n = cfg.count.sample(&mut rng);
    (0..n)
        .map(|_| {
            let x = draw_coord(&mut rng, cfg.x_range, cfg.lattice);
            let y = draw_coord(&mut rng, cfg.y_range, cfg.lattice);
            Point::new(x, y)
        })
        .collect()
}

fn draw_coord<R: Rng>(rng: &mut R, (lo, hi): (f64, f64), lattice: bool) -> f64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lattice {
        let (a, b) = (lo.ceil() as i64, hi.floor() as i64);
        if a > b {
            return lo;
        }
        rng.gen_range(a..=b) as f64
    } else if lo == hi {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}
