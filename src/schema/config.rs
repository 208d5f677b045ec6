//! Configuration types for lattice simulation parameters.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Pattern, Seed};

/// Slider range offered for the gap by the settings panel.
pub const GAP_RANGE: RangeInclusive<f32> = 10.0..=30.0;

/// Slider range offered for the cell size by the settings panel.
pub const CELL_SIZE_RANGE: RangeInclusive<f32> = 20.0..=30.0;

/// Default generation period of the stepping timer, in milliseconds.
pub const DEFAULT_STEP_PERIOD_MS: u64 = 1200;

/// Largest lattice the engine will allocate (a 256-cell side).
pub const MAX_CELLS: usize = 1 << 24;

/// Cell count of a `side³` lattice, or `LatticeTooLarge` if it overflows
/// or exceeds [`MAX_CELLS`].
pub fn lattice_len(side: usize) -> Result<usize, ConfigError> {
    side.checked_pow(3)
        .filter(|&len| len <= MAX_CELLS)
        .ok_or(ConfigError::LatticeTooLarge { side })
}

/// Top-level simulation configuration.
///
/// `cell_size` and `gap` are geometry-affecting: changing either one
/// rebuilds the lattice. `outer_extent` is fixed for the lifetime of a
/// [`Simulation`](crate::compute::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Edge length of one cell cube.
    pub cell_size: f32,
    /// Half-distance between adjacent cells beyond the cell's own half-width.
    pub gap: f32,
    /// Edge length of the bounding box the lattice has to fit in.
    pub outer_extent: f32,
    /// Whether the stepper advances generations.
    pub running: bool,
    /// Period of the generation timer in milliseconds.
    pub step_period_ms: u64,
    /// Initial alive-state assignment, reapplied on every rebuild.
    pub seed: Seed,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            gap: 10.0,
            outer_extent: 250.0,
            running: false,
            step_period_ms: DEFAULT_STEP_PERIOD_MS,
            seed: Seed::default(),
        }
    }
}

impl SimulationConfig {
    /// Distance between the centres of two adjacent cells.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.cell_size + 2.0 * self.gap
    }

    /// Number of cells per axis: `floor(outer_extent / (cell_size + 2 * gap))`.
    #[inline]
    pub fn side(&self) -> usize {
        let side = (self.outer_extent / self.pitch()).floor();
        if side.is_finite() && side > 0.0 {
            side as usize
        } else {
            0
        }
    }

    /// Total cell count (`side³`), `None` if it does not fit in `usize`.
    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        self.side().checked_pow(3)
    }

    /// True when `cell_size` and `gap` both sit inside the settings panel's
    /// slider ranges.
    pub fn within_panel_ranges(&self) -> bool {
        CELL_SIZE_RANGE.contains(&self.cell_size) && GAP_RANGE.contains(&self.gap)
    }

    /// True when `other` differs in a parameter that changes lattice geometry.
    pub fn geometry_differs(&self, other: &SimulationConfig) -> bool {
        self.cell_size != other.cell_size || self.gap != other.gap
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cell_size", self.cell_size),
            ("gap", self.gap),
            ("outer_extent", self.outer_extent),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.gap < 0.0 {
            return Err(ConfigError::InvalidGap(self.gap));
        }
        if self.outer_extent <= 0.0 {
            return Err(ConfigError::InvalidOuterExtent(self.outer_extent));
        }
        if self.step_period_ms == 0 {
            return Err(ConfigError::InvalidStepPeriod);
        }
        lattice_len(self.side())?;
        if let Pattern::Random { probability, .. } = self.seed.pattern {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ConfigError::InvalidProbability(probability));
            }
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("Cell size must be positive, got {0}")]
    InvalidCellSize(f32),
    #[error("Gap must be non-negative, got {0}")]
    InvalidGap(f32),
    #[error("Outer extent must be positive, got {0}")]
    InvalidOuterExtent(f32),
    #[error("Step period must be non-zero")]
    InvalidStepPeriod,
    #[error("Alive probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("Outer extent is fixed at {current}, cannot change to {requested}")]
    ExtentChanged { current: f32, requested: f32 },
    #[error("Lattice side {side} exceeds the {MAX_CELLS}-cell limit")]
    LatticeTooLarge { side: usize },
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}
