//! Geometry projection from lattice coordinates to world space.
//!
//! The lattice is centred in a cube of edge `outer_extent`. Along each axis
//! the centre of cell `n` sits at
//! `-floor(outer_extent / 2) + (cell_size / 2 + gap / 2) + n * (cell_size + 2 * gap)`.

use serde::Serialize;

use crate::schema::SimulationConfig;

/// Affine map from lattice index to world-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projector {
    /// Position of the first cell centre on every axis.
    origin: f32,
    /// Distance between adjacent cell centres.
    pitch: f32,
    cell_size: f32,
}

impl Projector {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let base = -(config.outer_extent / 2.0).floor();
        Self {
            origin: base + (config.cell_size / 2.0 + config.gap / 2.0),
            pitch: config.pitch(),
            cell_size: config.cell_size,
        }
    }

    /// World coordinate of index `n` along one axis.
    #[inline]
    pub fn axis(&self, n: usize) -> f32 {
        self.origin + n as f32 * self.pitch
    }

    /// World position `[x, y, z]` of cell `(i, j, k)`: x from `k`, y from `j`, z from `i`.
    #[inline]
    pub fn position(&self, i: usize, j: usize, k: usize) -> [f32; 3] {
        [self.axis(k), self.axis(j), self.axis(i)]
    }

    /// Edge length the renderer should draw each cell with.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

/// What the renderer needs to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellView {
    pub index: (usize, usize, usize),
    pub alive: bool,
    pub position: [f32; 3],
}
