//! Lattice state container and cell access helpers.

use crate::schema::{ConfigError, Seed, SimulationConfig};

/// One lattice site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Life state of the current generation.
    pub alive: bool,
    /// Alive neighbors seen by the count phase of the most recent step.
    /// Only meaningful as the input of that step's apply phase.
    pub neighbor_count: u8,
}

/// Cubic lattice of `side³` cells.
///
/// Data is stored flat with indexing `i * side * side + j * side + k`, where
/// `i` maps to the Z axis, `j` to Y and `k` to X.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    cells: Vec<Cell>,
    side: usize,
    /// Completed steps since the lattice was built.
    pub generation: u64,
}

impl Lattice {
    /// Build a lattice sized and seeded from configuration.
    pub fn build(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let side = config.side();
        let lattice = Self::from_seed(&config.seed, side)?;
        log::info!(
            "Built {side}x{side}x{side} lattice (cell_size={}, gap={}, extent={}), {} alive",
            config.cell_size,
            config.gap,
            config.outer_extent,
            lattice.alive_count()
        );
        Ok(lattice)
    }

    /// Build a `side³` lattice from a seed pattern.
    pub fn from_seed(seed: &Seed, side: usize) -> Result<Self, ConfigError> {
        let cells = seed
            .generate(side)?
            .into_iter()
            .map(|alive| Cell {
                alive,
                neighbor_count: 0,
            })
            .collect();

        Ok(Self {
            cells,
            side,
            generation: 0,
        })
    }

    /// Cells per axis.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells (`side³`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert `(i, j, k)` to a flat index.
    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        i * self.side * self.side + j * self.side + k
    }

    /// Convert a flat index back to `(i, j, k)`.
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize, usize) {
        let plane = self.side * self.side;
        (idx / plane, (idx % plane) / self.side, idx % self.side)
    }

    /// Check if coordinates are inside the lattice.
    #[inline]
    pub fn in_bounds(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.side && j < self.side && k < self.side
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<&Cell> {
        if self.in_bounds(i, j, k) {
            Some(&self.cells[self.idx(i, j, k)])
        } else {
            None
        }
    }

    /// Alive flag at `(i, j, k)`; out-of-range coordinates read as dead.
    #[inline]
    pub fn is_alive(&self, i: usize, j: usize, k: usize) -> bool {
        self.get(i, j, k).is_some_and(|cell| cell.alive)
    }

    /// Set the alive flag at `(i, j, k)`. Returns false if out of range.
    pub fn set_alive(&mut self, i: usize, j: usize, k: usize, alive: bool) -> bool {
        if !self.in_bounds(i, j, k) {
            return false;
        }
        let idx = self.idx(i, j, k);
        self.cells[idx].alive = alive;
        true
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of alive cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Copy of the alive flags in flat order.
    pub fn alive_flags(&self) -> Vec<bool> {
        self.cells.iter().map(|c| c.alive).collect()
    }
}
