//! Simulation - the single owned engine object.
//!
//! Holds the configuration, the lattice and the stepper. Configuration
//! changes come in through explicit calls; a change to `cell_size`, `gap`
//! or the seed rebuilds the lattice, discarding the previous history.

use serde::{Deserialize, Serialize};

use crate::schema::{ConfigError, Seed, SimulationConfig};

use super::{CellView, Lattice, Projector, Stepper};

/// Outcome of a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconfigured {
    pub old_side: usize,
    pub new_side: usize,
    /// True if the lattice was rebuilt and every cell position moved.
    pub rebuilt: bool,
}

/// Lattice simulation engine.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    lattice: Lattice,
    stepper: Stepper,
}

impl Simulation {
    /// Validate `config` and build the initial lattice.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lattice = Lattice::build(&config)?;
        Ok(Self {
            config,
            lattice,
            stepper: Stepper::new(),
        })
    }

    /// Advance one generation if running. Returns whether a step happened.
    pub fn step(&mut self) -> bool {
        if !self.config.running || self.lattice.is_empty() {
            return false;
        }
        self.stepper.step(&mut self.lattice);
        true
    }

    /// Call [`step`](Self::step) up to `steps` times. Returns the number of
    /// generations actually advanced.
    pub fn run(&mut self, steps: u64) -> u64 {
        let mut advanced = 0;
        for _ in 0..steps {
            if !self.step() {
                break;
            }
            advanced += 1;
        }
        advanced
    }

    /// Start or stop stepping without touching the lattice.
    pub fn set_running(&mut self, running: bool) {
        if self.config.running != running {
            log::info!("Simulation {}", if running { "started" } else { "stopped" });
        }
        self.config.running = running;
    }

    /// Change cell size and gap, rebuilding the lattice.
    pub fn resize(&mut self, cell_size: f32, gap: f32) -> Result<Reconfigured, ConfigError> {
        let next = SimulationConfig {
            cell_size,
            gap,
            ..self.config.clone()
        };
        next.validate()?;

        let old_side = self.lattice.side();
        self.rebuild(next)?;

        Ok(Reconfigured {
            old_side,
            new_side: self.lattice.side(),
            rebuilt: true,
        })
    }

    /// Apply a full configuration from the host application.
    ///
    /// `outer_extent` is fixed for the engine's lifetime; a different value is
    /// rejected. Geometry or seed changes rebuild the lattice; `running` and
    /// `step_period_ms` are adopted without touching it.
    pub fn on_config_changed(
        &mut self,
        config: SimulationConfig,
    ) -> Result<Reconfigured, ConfigError> {
        if let Err(e) = self.check_change(&config) {
            log::warn!("Rejected configuration change: {e}");
            return Err(e);
        }

        let old_side = self.lattice.side();
        let rebuilt = self.config.geometry_differs(&config) || self.config.seed != config.seed;
        let running = config.running;
        let config = SimulationConfig {
            running: self.config.running,
            ..config
        };
        if rebuilt {
            self.rebuild(config)?;
        } else {
            self.config = config;
        }
        self.set_running(running);

        Ok(Reconfigured {
            old_side,
            new_side: self.lattice.side(),
            rebuilt,
        })
    }

    fn check_change(&self, config: &SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.outer_extent != self.config.outer_extent {
            return Err(ConfigError::ExtentChanged {
                current: self.config.outer_extent,
                requested: config.outer_extent,
            });
        }
        Ok(())
    }

    /// Rebuild with a new seed, keeping geometry.
    pub fn reseed(&mut self, seed: Seed) -> Result<(), ConfigError> {
        let next = SimulationConfig {
            seed,
            ..self.config.clone()
        };
        next.validate()?;
        self.rebuild(next)
    }

    /// Build a fresh lattice for `config`, committing both only on success.
    fn rebuild(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        self.lattice = Lattice::build(&config)?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn is_running(&self) -> bool {
        self.config.running
    }

    pub fn side(&self) -> usize {
        self.lattice.side()
    }

    pub fn generation(&self) -> u64 {
        self.lattice.generation
    }

    pub fn projector(&self) -> Projector {
        Projector::from_config(&self.config)
    }

    /// Every cell with its alive flag and world position, in flat order.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        let projector = self.projector();
        self.lattice
            .cells()
            .iter()
            .enumerate()
            .map(move |(idx, cell)| {
                let (i, j, k) = self.lattice.coords(idx);
                CellView {
                    index: (i, j, k),
                    alive: cell.alive,
                    position: projector.position(i, j, k),
                }
            })
    }

    /// Alive flags as bytes (1 = alive), in flat order.
    pub fn alive_bytes(&self) -> Vec<u8> {
        self.lattice.cells().iter().map(|c| c.alive as u8).collect()
    }

    /// Cell positions as packed `[x, y, z]` triples, in flat order.
    pub fn positions(&self) -> Vec<f32> {
        self.cells().flat_map(|view| view.position).collect()
    }

    pub fn stats(&self) -> LatticeStats {
        LatticeStats::from_lattice(&self.lattice)
    }
}

/// Lattice statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeStats {
    pub side: usize,
    pub total_cells: usize,
    pub alive_cells: usize,
    pub dead_cells: usize,
    pub generation: u64,
    pub alive_fraction: f32,
}

impl LatticeStats {
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let total_cells = lattice.len();
        let alive_cells = lattice.alive_count();
        let alive_fraction = if total_cells == 0 {
            0.0
        } else {
            alive_cells as f32 / total_cells as f32
        };

        Self {
            side: lattice.side(),
            total_cells,
            alive_cells,
            dead_cells: total_cells - alive_cells,
            generation: lattice.generation,
            alive_fraction,
        }
    }
}
