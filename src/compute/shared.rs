//! Thread-safe handle for hosts that step and render on different threads.
//!
//! A step holds the write lock across both of its phases, and readers copy a
//! whole generation under the read lock, so a snapshot is always entirely
//! pre-step or entirely post-step.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::schema::{ConfigError, SimulationConfig};

use super::{LatticeStats, Reconfigured, Simulation};

/// Copy of one complete generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatticeSnapshot {
    pub side: usize,
    pub generation: u64,
    pub alive: Vec<bool>,
}

/// Shared, lock-protected [`Simulation`].
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    inner: Arc<RwLock<Simulation>>,
}

impl SharedSimulation {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(RwLock::new(simulation)),
        }
    }

    // Poisoned locks are recovered; the engine holds no cross-call invariants
    // that a panicking writer could break.
    fn read(&self) -> RwLockReadGuard<'_, Simulation> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Simulation> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance one generation under the write lock.
    pub fn step(&self) -> bool {
        self.write().step()
    }

    pub fn set_running(&self, running: bool) {
        self.write().set_running(running);
    }

    pub fn resize(&self, cell_size: f32, gap: f32) -> Result<Reconfigured, ConfigError> {
        self.write().resize(cell_size, gap)
    }

    pub fn on_config_changed(&self, config: SimulationConfig) -> Result<Reconfigured, ConfigError> {
        self.write().on_config_changed(config)
    }

    /// Copy the current generation under the read lock.
    pub fn snapshot(&self) -> LatticeSnapshot {
        let sim = self.read();
        LatticeSnapshot {
            side: sim.side(),
            generation: sim.generation(),
            alive: sim.lattice().alive_flags(),
        }
    }

    pub fn stats(&self) -> LatticeStats {
        self.read().stats()
    }

    /// Run `f` with read access to the simulation.
    pub fn with_read<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        f(&self.read())
    }
}
