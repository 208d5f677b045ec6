//! Stepper - advances a lattice by one generation.
//!
//! A step is two whole-lattice passes. The count phase reads only the alive
//! flags of the current generation and writes into a scratch buffer; the
//! apply phase then writes every cell. No cell is ever counted against a
//! neighbor that was already updated in the same step.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::{Lattice, count_neighbors_at, next_state};

/// Generation driver with a reusable count buffer.
#[derive(Debug, Default)]
pub struct Stepper {
    /// Pre-allocated neighbor counts, one per cell.
    counts: Vec<u8>,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `lattice` by one generation. No-op on an empty lattice.
    pub fn step(&mut self, lattice: &mut Lattice) {
        if lattice.is_empty() {
            return;
        }

        self.counts.resize(lattice.len(), 0);

        // 1. Count phase
        let current = &*lattice;

        #[cfg(not(target_arch = "wasm32"))]
        self.counts
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, count)| *count = count_neighbors_at(current, idx));

        #[cfg(target_arch = "wasm32")]
        for (idx, count) in self.counts.iter_mut().enumerate() {
            *count = count_neighbors_at(current, idx);
        }

        // 2. Apply phase
        for (cell, &n) in lattice.cells_mut().iter_mut().zip(&self.counts) {
            cell.neighbor_count = n;
            cell.alive = next_state(n).is_alive();
        }

        lattice.generation += 1;
        log::debug!(
            "Generation {}: {} of {} alive",
            lattice.generation,
            lattice.alive_count(),
            lattice.len()
        );
    }

    /// Run `steps` generations.
    pub fn run(&mut self, lattice: &mut Lattice, steps: u64) {
        for _ in 0..steps {
            self.step(lattice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::candidate_count;
    use crate::schema::Seed;
    use proptest::prelude::*;

    #[test]
    fn test_solid_3x3x3_generation() {
        let mut lattice = Lattice::from_seed(&Seed::solid(), 3).unwrap();
        let mut stepper = Stepper::new();
        stepper.step(&mut lattice);

        for idx in 0..lattice.len() {
            let (i, j, k) = lattice.coords(idx);
            let cell = lattice.get(i, j, k).unwrap();
            let expected = candidate_count(3, i, j, k) as u8;
            assert_eq!(cell.neighbor_count, expected, "count at {:?}", (i, j, k));
            assert_eq!(cell.alive, (4..=8).contains(&expected), "state at {:?}", (i, j, k));
        }

        // Centre saw all 12 offsets alive and dies of overcrowding.
        let centre = lattice.get(1, 1, 1).unwrap();
        assert_eq!(centre.neighbor_count, 12);
        assert!(!centre.alive);

        // Corners only have six candidates and survive.
        assert_eq!(lattice.get(0, 0, 0).unwrap().neighbor_count, 6);
        assert!(lattice.is_alive(0, 0, 0));
        assert_eq!(lattice.generation, 1);
    }

    #[test]
    fn test_counts_use_previous_generation() {
        // Plus shape in the middle slice; in-place updates would skew the counts.
        let seed = Seed::custom(vec![(1, 1, 0), (1, 1, 1), (1, 1, 2), (1, 0, 1), (1, 2, 1)]);
        let mut lattice = Lattice::from_seed(&seed, 3).unwrap();
        let before = lattice.clone();

        let expected: Vec<u8> = (0..before.len())
            .map(|idx| count_neighbors_at(&before, idx))
            .collect();

        Stepper::new().step(&mut lattice);

        for (idx, cell) in lattice.cells().iter().enumerate() {
            assert_eq!(cell.neighbor_count, expected[idx]);
            assert_eq!(cell.alive, next_state(expected[idx]).is_alive());
        }
    }

    #[test]
    fn test_empty_lattice_is_noop() {
        let mut lattice = Lattice::from_seed(&Seed::solid(), 0).unwrap();
        let mut stepper = Stepper::new();
        stepper.run(&mut lattice, 3);
        assert!(lattice.is_empty());
        assert_eq!(lattice.generation, 0);
    }

    #[test]
    fn test_dead_lattice_stays_dead() {
        let mut lattice = Lattice::from_seed(&Seed::empty(), 4).unwrap();
        let mut stepper = Stepper::new();
        stepper.run(&mut lattice, 2);
        assert_eq!(lattice.alive_count(), 0);
        assert_eq!(lattice.generation, 2);
    }

    #[test]
    fn test_scratch_resizes_between_lattices() {
        let mut stepper = Stepper::new();
        let mut big = Lattice::from_seed(&Seed::solid(), 5).unwrap();
        stepper.step(&mut big);

        let mut small = Lattice::from_seed(&Seed::solid(), 3).unwrap();
        stepper.step(&mut small);
        assert_eq!(small.get(1, 1, 1).unwrap().neighbor_count, 12);
        assert_eq!(small.cells().len(), 27);
    }

    proptest! {
        #[test]
        fn prop_step_is_deterministic(side in 0usize..7, seed in any::<u64>()) {
            let start = Lattice::from_seed(&Seed::random(0.5, Some(seed)), side).unwrap();
            let mut a = start.clone();
            let mut b = start;
            Stepper::new().run(&mut a, 3);
            Stepper::new().run(&mut b, 3);
            prop_assert_eq!(a.alive_flags(), b.alive_flags());
        }
    }
}
