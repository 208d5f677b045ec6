//! Neighbor counting over the fixed 12-offset sampling set.
//!
//! The sampling set is not the 26-cell Moore neighborhood: it takes the
//! axis and diagonal directions listed in [`NEIGHBOR_OFFSETS`] and nothing
//! else. Boundaries are hard, so offsets that leave the lattice are skipped
//! rather than wrapped.

use super::Lattice;

/// Relative `(di, dj, dk)` offsets examined when counting alive neighbors.
pub const NEIGHBOR_OFFSETS: [(isize, isize, isize); 12] = [
    (-1, 0, 0),
    (-1, -1, 0),
    (-1, -1, -1),
    (0, -1, 0),
    (0, 0, -1),
    (0, -1, -1),
    (0, 1, 0),
    (0, 0, 1),
    (1, 0, 0),
    (1, 1, 0),
    (1, 1, 1),
    (0, 1, 1),
];

/// Apply an offset, returning `None` when the result leaves `[0, side)`.
#[inline]
fn offset(
    side: usize,
    (i, j, k): (usize, usize, usize),
    (di, dj, dk): (isize, isize, isize),
) -> Option<(usize, usize, usize)> {
    let ni = i.checked_add_signed(di).filter(|&n| n < side)?;
    let nj = j.checked_add_signed(dj).filter(|&n| n < side)?;
    let nk = k.checked_add_signed(dk).filter(|&n| n < side)?;
    Some((ni, nj, nk))
}

/// Count alive neighbors of `(i, j, k)`. Always in `[0, 12]`.
pub fn count_neighbors(lattice: &Lattice, i: usize, j: usize, k: usize) -> u8 {
    let side = lattice.side();
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&d| offset(side, (i, j, k), d))
        .filter(|&(ni, nj, nk)| lattice.is_alive(ni, nj, nk))
        .count() as u8
}

/// [`count_neighbors`] addressed by flat index.
#[inline]
pub fn count_neighbors_at(lattice: &Lattice, idx: usize) -> u8 {
    let (i, j, k) = lattice.coords(idx);
    count_neighbors(lattice, i, j, k)
}

/// Number of sampling offsets that stay inside a `side³` lattice from `(i, j, k)`.
pub fn candidate_count(side: usize, i: usize, j: usize, k: usize) -> usize {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&d| offset(side, (i, j, k), d).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Seed;
    use proptest::prelude::*;

    #[test]
    fn test_offsets_are_distinct_and_exclude_centre() {
        for (a, da) in NEIGHBOR_OFFSETS.iter().enumerate() {
            assert_ne!(*da, (0, 0, 0));
            for db in &NEIGHBOR_OFFSETS[a + 1..] {
                assert_ne!(da, db);
            }
        }
    }

    #[test]
    fn test_solid_lattice_counts_candidates() {
        let lattice = Lattice::from_seed(&Seed::solid(), 3).unwrap();

        assert_eq!(count_neighbors(&lattice, 1, 1, 1), 12);
        // Only the six positive directions exist from the origin corner.
        assert_eq!(count_neighbors(&lattice, 0, 0, 0), 6);
        assert_eq!(count_neighbors(&lattice, 2, 2, 2), 6);
        // (2, 0, 0): (-1,0,0), (0,1,0), (0,0,1), (0,1,1)
        assert_eq!(count_neighbors(&lattice, 2, 0, 0), 4);

        for idx in 0..lattice.len() {
            let (i, j, k) = lattice.coords(idx);
            assert_eq!(
                count_neighbors(&lattice, i, j, k) as usize,
                candidate_count(3, i, j, k)
            );
        }
    }

    #[test]
    fn test_ignores_cells_outside_sampling_set() {
        // (1,1,1) + (1,-1,0) and (1,1,1) + (-1,1,1) are Moore neighbors
        // that the sampling set does not include.
        let lattice = Lattice::from_seed(&Seed::custom(vec![(2, 0, 1), (0, 2, 2)]), 3).unwrap();
        assert_eq!(count_neighbors(&lattice, 1, 1, 1), 0);

        let lattice = Lattice::from_seed(&Seed::custom(vec![(0, 0, 0), (2, 2, 2)]), 3).unwrap();
        assert_eq!(count_neighbors(&lattice, 1, 1, 1), 2);
    }

    #[test]
    fn test_empty_and_single_cell_lattices() {
        let single = Lattice::from_seed(&Seed::solid(), 1).unwrap();
        assert_eq!(count_neighbors(&single, 0, 0, 0), 0);
        assert_eq!(candidate_count(1, 0, 0, 0), 0);
        assert_eq!(candidate_count(0, 0, 0, 0), 0);
    }

    #[test]
    fn test_count_at_matches_coordinates() {
        let lattice = Lattice::from_seed(&Seed::random(0.5, Some(11)), 5).unwrap();
        for idx in 0..lattice.len() {
            let (i, j, k) = lattice.coords(idx);
            assert_eq!(
                count_neighbors_at(&lattice, idx),
                count_neighbors(&lattice, i, j, k)
            );
        }
    }

    proptest! {
        #[test]
        fn prop_count_bounded_by_candidates(
            side in 1usize..8,
            seed in any::<u64>(),
            pick in any::<usize>(),
        ) {
            let lattice = Lattice::from_seed(&Seed::random(0.5, Some(seed)), side).unwrap();
            let (i, j, k) = lattice.coords(pick % lattice.len());
            let count = count_neighbors(&lattice, i, j, k) as usize;
            let candidates = candidate_count(side, i, j, k);
            prop_assert!(count <= candidates);
            prop_assert!(candidates <= 12);
            if side >= 3 && (i, j, k) == (0, 0, 0) {
                prop_assert!(candidates < 12);
            }
        }
    }
}
