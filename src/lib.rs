//! Lattice Life - a 3D Game of Life variant on a cubic lattice.
//!
//! The engine owns a `side³` lattice of cells whose size is derived from the
//! cell edge length, the inter-cell gap and a fixed outer extent. Each
//! generation counts alive neighbors over a fixed 12-offset sampling set and
//! keeps a cell alive when it saw between 4 and 8 of them.
//!
//! Nothing here depends on a graphics context: a renderer reads alive flags
//! and world positions, a timer calls `step`, and a settings panel calls
//! `on_config_changed`.
//!
//! # Architecture
//!
//! - `schema`: Configuration and seed types
//! - `compute`: Lattice, neighbor counter, transition rule, stepper and the
//!   `Simulation` engine that ties them together
//!
//! # Example
//!
//! ```rust
//! use lattice_life::{
//!     compute::Simulation,
//!     schema::{Seed, SimulationConfig},
//! };
//!
//! let config = SimulationConfig {
//!     running: true,
//!     seed: Seed::random(0.5, Some(42)),
//!     ..Default::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! assert_eq!(sim.side(), 6);
//!
//! sim.run(10);
//!
//! // Shrinking the lattice rebuilds it from the seed.
//! let change = sim.resize(30.0, 10.0).unwrap();
//! assert_eq!(change.new_side, 5);
//!
//! for cell in sim.cells().filter(|c| c.alive) {
//!     let [_x, _y, _z] = cell.position;
//! }
//! ```

pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::{Lattice, LatticeStats, SharedSimulation, Simulation, StepClock};
pub use schema::{ConfigError, Pattern, Seed, SimulationConfig};
