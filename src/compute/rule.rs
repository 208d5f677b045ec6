//! Birth/death transition rule.

use std::ops::RangeInclusive;

/// Upper survival band.
pub const UPPER_BAND: RangeInclusive<u8> = 5..=8;
/// Lower survival band. Overlaps [`UPPER_BAND`]; a cell lives in either.
pub const LOWER_BAND: RangeInclusive<u8> = 4..=7;

/// Life state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Next state for a cell that saw `neighbors` alive neighbors in the
/// previous generation. Independent of the cell's own current state.
#[inline]
pub fn next_state(neighbors: u8) -> CellState {
    (UPPER_BAND.contains(&neighbors) || LOWER_BAND.contains(&neighbors)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_band_is_four_to_eight() {
        for n in 0..=12u8 {
            let expected = (4..=8).contains(&n);
            assert_eq!(next_state(n).is_alive(), expected, "n = {n}");
        }
    }

    #[test]
    fn test_edge_counts() {
        assert_eq!(next_state(0), CellState::Dead);
        assert_eq!(next_state(3), CellState::Dead);
        assert_eq!(next_state(4), CellState::Alive);
        assert_eq!(next_state(8), CellState::Alive);
        assert_eq!(next_state(9), CellState::Dead);
        assert_eq!(next_state(12), CellState::Dead);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(CellState::from(true), CellState::Alive);
        assert_eq!(CellState::from(false), CellState::Dead);
    }
}
