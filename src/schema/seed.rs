//! Seed types for initializing lattice generations.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ConfigError, lattice_len};

/// Probability of a cell starting alive under the default random seed.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.5;

fn default_probability() -> f64 {
    DEFAULT_ALIVE_PROBABILITY
}

/// Complete seed specification for lattice initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self::random(DEFAULT_ALIVE_PROBABILITY, None)
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Every cell independently alive with `probability`.
    Random {
        #[serde(default = "default_probability")]
        probability: f64,
        /// Fixed RNG seed. `None` draws from OS entropy on every build.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Every cell alive.
    Solid,
    /// Every cell dead.
    Empty,
    /// Listed `(i, j, k)` coordinates alive, all others dead.
    Custom { cells: Vec<(usize, usize, usize)> },
}

impl Seed {
    /// Random seed with the given alive probability.
    pub fn random(probability: f64, seed: Option<u64>) -> Self {
        Self {
            pattern: Pattern::Random { probability, seed },
        }
    }

    pub fn solid() -> Self {
        Self {
            pattern: Pattern::Solid,
        }
    }

    pub fn empty() -> Self {
        Self {
            pattern: Pattern::Empty,
        }
    }

    pub fn custom(cells: Vec<(usize, usize, usize)>) -> Self {
        Self {
            pattern: Pattern::Custom { cells },
        }
    }

    /// Generate alive flags for a `side³` lattice, flattened as
    /// `i * side * side + j * side + k`.
    ///
    /// Fails with `LatticeTooLarge` when `side³` exceeds the cell limit.
    pub fn generate(&self, side: usize) -> Result<Vec<bool>, ConfigError> {
        let len = lattice_len(side)?;

        let alive = match &self.pattern {
            Pattern::Random { probability, seed } => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(*s),
                    None => StdRng::from_entropy(),
                };
                let p = if probability.is_nan() {
                    0.0
                } else {
                    probability.clamp(0.0, 1.0)
                };
                (0..len).map(|_| rng.gen_bool(p)).collect()
            }
            Pattern::Solid => vec![true; len],
            Pattern::Empty => vec![false; len],
            Pattern::Custom { cells } => {
                let mut alive = vec![false; len];
                for &(i, j, k) in cells {
                    if i < side && j < side && k < side {
                        alive[i * side * side + j * side + k] = true;
                    }
                }
                alive
            }
        };
        Ok(alive)
    }
}
